use std::fs;
use std::sync::Arc;

use tempfile::Builder;

use lexguard::artifacts::{ArtifactStore, CLASSIFIER_FILE, MANIFEST_FILE, VECTORIZER_FILE};
use lexguard::detector::{CascadeConfig, FakeWordDetector};
use lexguard::error::LexGuardError;
use lexguard::lexicon::BuiltinLexicon;
use lexguard::training::{Trainer, TrainingConfig};

fn trained_store(prefix: &str) -> (tempfile::TempDir, ArtifactStore) {
    let dir = Builder::new().prefix(prefix).tempdir().unwrap();
    let lexicon = BuiltinLexicon::english();
    let config = TrainingConfig {
        real_samples: 60,
        random_fakes: 30,
        typo_fakes: 30,
        ..Default::default()
    };
    let outcome = Trainer::new(config)
        .train(&lexicon.known_words(), &lexicon)
        .unwrap();
    let store = ArtifactStore::new(dir.path());
    store.save(&outcome.artifacts).unwrap();
    (dir, store)
}

#[test]
fn test_manifest_describes_model() {
    let (_dir, store) = trained_store("test_manifest");
    let manifest = store.load_manifest().unwrap();
    let artifacts = store.load().unwrap();

    assert_eq!(manifest.vocabulary_size, artifacts.vectorizer.vocabulary_size());
    assert_eq!(manifest.known_words, artifacts.known_words.len());
    assert_eq!(manifest.numeric_features, 4);
    assert_eq!(manifest.seed, 42);
    assert!(manifest.holdout_accuracy.is_some());
}

#[test]
fn test_truncated_blob_fails_to_load() {
    let (dir, store) = trained_store("test_truncated");
    let path = dir.path().join(VECTORIZER_FILE);
    let bytes = fs::read(&path).unwrap();
    fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();

    let err = store.load().unwrap_err();
    assert!(matches!(err, LexGuardError::CorruptArtifact { .. }));
    assert!(err.is_artifact_error());
}

#[test]
fn test_interrupted_save_is_rejected() {
    let (dir, store) = trained_store("test_interrupted");
    fs::remove_file(dir.path().join(MANIFEST_FILE)).unwrap();

    assert!(matches!(
        store.load(),
        Err(LexGuardError::ArtifactMissing { .. })
    ));
    let result = FakeWordDetector::load(
        dir.path(),
        Arc::new(BuiltinLexicon::english()),
        CascadeConfig::default(),
    );
    assert!(result.is_err());
}

#[test]
fn test_blob_from_another_run_is_rejected() {
    let (first_dir, first) = trained_store("test_mixed_a");
    let (second_dir, _second) = trained_store("test_mixed_b");
    fs::copy(
        second_dir.path().join(CLASSIFIER_FILE),
        first_dir.path().join(CLASSIFIER_FILE),
    )
    .unwrap();

    assert!(matches!(
        first.load(),
        Err(LexGuardError::ArtifactVersion { .. })
    ));
}

#[test]
fn test_newer_manifest_version_is_rejected() {
    let (dir, store) = trained_store("test_version");
    let path = dir.path().join(MANIFEST_FILE);
    let mut manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    manifest["format_version"] = serde_json::json!(99);
    fs::write(&path, serde_json::to_string(&manifest).unwrap()).unwrap();

    assert!(matches!(
        store.load(),
        Err(LexGuardError::ArtifactVersion { .. })
    ));
}

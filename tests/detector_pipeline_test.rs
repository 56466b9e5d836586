use std::sync::Arc;

use tempfile::Builder;

use lexguard::artifacts::ArtifactStore;
use lexguard::detector::{CascadeConfig, DetectionContext, EditDistancePolicy, FakeWordDetector};
use lexguard::lexicon::{BuiltinLexicon, LexicalResource};
use lexguard::training::{Trainer, TrainingConfig};
use lexguard::types::{Label, Tier};

fn small_config() -> TrainingConfig {
    TrainingConfig {
        real_samples: 150,
        random_fakes: 75,
        typo_fakes: 75,
        ..Default::default()
    }
}

/// Every word gets frequency 3.0, inside the ambiguous band.
struct AmbiguousResource;

impl LexicalResource for AmbiguousResource {
    fn contains(&self, _word: &str) -> bool {
        false
    }

    fn frequency(&self, _word: &str) -> f64 {
        3.0
    }
}

#[test]
fn test_train_save_load_classify() {
    let dir = Builder::new().prefix("test_pipeline").tempdir().unwrap();
    let lexicon = BuiltinLexicon::english();
    let outcome = Trainer::new(small_config())
        .train(&lexicon.known_words(), &lexicon)
        .unwrap();

    let store = ArtifactStore::new(dir.path());
    store.save(&outcome.artifacts).unwrap();

    let detector = FakeWordDetector::load(
        dir.path(),
        Arc::new(BuiltinLexicon::english()),
        CascadeConfig::default(),
    )
    .unwrap();

    let verdicts = detector.classify("The quick brown fox").unwrap();
    let words: Vec<&str> = verdicts.iter().map(|v| v.word.as_str()).collect();
    assert_eq!(words, vec!["the", "quick", "brown", "fox"]);
    assert!(verdicts.iter().all(|v| v.label == Label::Real));

    // Unknown to the lexicon, so frequency 0 puts it in the rare tier.
    let detailed = detector.classify_detailed("xqzvwk").unwrap();
    assert_eq!(detailed[0].label, Label::Fake);
    assert_eq!(detailed[0].tier, Tier::RareWord);

    assert_eq!(detector.fake_words("hello xqzvwk world").unwrap(), vec!["xqzvwk"]);
}

#[test]
fn test_loaded_model_matches_trained_model() {
    let dir = Builder::new().prefix("test_reload").tempdir().unwrap();
    let lexicon = BuiltinLexicon::english();
    let outcome = Trainer::new(small_config())
        .train(&lexicon.known_words(), &lexicon)
        .unwrap();
    ArtifactStore::new(dir.path()).save(&outcome.artifacts).unwrap();

    let fresh = FakeWordDetector::new(DetectionContext::new(
        outcome.artifacts,
        Arc::new(AmbiguousResource),
        CascadeConfig::default(),
    ))
    .unwrap();
    let loaded = FakeWordDetector::load(dir.path(), Arc::new(AmbiguousResource), CascadeConfig::default())
        .unwrap();

    let sentence = "garden qzxv windoe marketing blorgy consulting";
    assert_eq!(
        fresh.classify(sentence).unwrap(),
        loaded.classify(sentence).unwrap()
    );
}

#[test]
fn test_ambiguous_band_goes_to_model_for_both_policies() {
    let lexicon = BuiltinLexicon::english();
    let outcome = Trainer::new(small_config())
        .train(&lexicon.known_words(), &lexicon)
        .unwrap();

    for policy in [EditDistancePolicy::ZeroFill, EditDistancePolicy::Sampled] {
        let config = CascadeConfig {
            edit_distance_policy: policy,
            ..Default::default()
        };
        let detector = FakeWordDetector::new(DetectionContext::new(
            outcome.artifacts.clone(),
            Arc::new(AmbiguousResource),
            config,
        ))
        .unwrap();

        let verdicts = detector.classify_detailed("zorblat quixotic").unwrap();
        assert_eq!(verdicts.len(), 2);
        assert!(verdicts.iter().all(|v| v.tier == Tier::Model));

        // Same input, same answer.
        assert_eq!(verdicts, detector.classify_detailed("zorblat quixotic").unwrap());
    }
}

#[test]
fn test_detector_is_shareable_across_threads() {
    let lexicon = BuiltinLexicon::english();
    let outcome = Trainer::new(small_config())
        .train(&lexicon.known_words(), &lexicon)
        .unwrap();
    let detector = Arc::new(
        FakeWordDetector::new(DetectionContext::new(
            outcome.artifacts,
            Arc::new(lexicon),
            CascadeConfig::default(),
        ))
        .unwrap(),
    );

    let expected = detector.classify("software engineer at blorgtech").unwrap();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let detector = Arc::clone(&detector);
            std::thread::spawn(move || detector.classify("software engineer at blorgtech").unwrap())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }

    let sentences = ["quick fox", "lazy dog", "xqzv"];
    let batch = detector.classify_batch(&sentences).unwrap();
    for (sentence, verdicts) in sentences.iter().zip(batch) {
        assert_eq!(verdicts, detector.classify(sentence).unwrap());
    }
}

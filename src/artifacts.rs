//! Persistence of trained models.
//!
//! A model directory holds three binary blobs and a JSON manifest:
//!
//! ```text
//! model/
//! ├── classifier.bin
//! ├── vectorizer.bin
//! ├── known_words.bin
//! └── manifest.json
//! ```
//!
//! Each blob is a bincode [`Envelope`] carrying the format version, the
//! artifact id of the training run and a CRC32 of its payload. The manifest
//! is written last, so a directory whose manifest is missing or whose blobs
//! carry another artifact id is an interrupted or mixed save and is rejected.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::classifier::LogisticRegression;
use crate::error::{LexGuardError, Result};
use crate::features::NUMERIC_FEATURES;
use crate::lexicon::KnownWords;
use crate::vectorizer::CharNgramVectorizer;

/// Version of the on-disk layout. Bump on incompatible changes.
pub const FORMAT_VERSION: u32 = 1;

pub const CLASSIFIER_FILE: &str = "classifier.bin";
pub const VECTORIZER_FILE: &str = "vectorizer.bin";
pub const KNOWN_WORDS_FILE: &str = "known_words.bin";
pub const MANIFEST_FILE: &str = "manifest.json";

/// Description of a saved model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub format_version: u32,
    /// Id shared by every blob of one training run.
    pub artifact_id: Uuid,
    pub created_at: DateTime<Utc>,
    /// Number of n-gram columns.
    pub vocabulary_size: usize,
    pub numeric_features: usize,
    /// Size of the known-word set.
    pub known_words: usize,
    pub holdout_accuracy: Option<f64>,
    pub seed: u64,
}

/// A trained model: everything the detector needs besides the lexical resource.
#[derive(Debug, Clone)]
pub struct ModelArtifacts {
    pub vectorizer: CharNgramVectorizer,
    pub classifier: LogisticRegression,
    pub known_words: KnownWords,
    pub manifest: Manifest,
}

impl ModelArtifacts {
    /// Bundle freshly trained components under a new artifact id.
    pub fn new(
        vectorizer: CharNgramVectorizer,
        classifier: LogisticRegression,
        known_words: KnownWords,
        holdout_accuracy: Option<f64>,
        seed: u64,
    ) -> Self {
        let manifest = Manifest {
            format_version: FORMAT_VERSION,
            artifact_id: Uuid::new_v4(),
            created_at: Utc::now(),
            vocabulary_size: vectorizer.vocabulary_size(),
            numeric_features: NUMERIC_FEATURES,
            known_words: known_words.len(),
            holdout_accuracy,
            seed,
        };
        Self {
            vectorizer,
            classifier,
            known_words,
            manifest,
        }
    }
}

/// Binary wrapper written around every blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Envelope {
    format_version: u32,
    artifact_id: Uuid,
    checksum: u32,
    payload: Vec<u8>,
}

/// Reads and writes [`ModelArtifacts`] in a directory.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    directory: PathBuf,
}

impl ArtifactStore {
    pub fn new<P: AsRef<Path>>(directory: P) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Whether the directory holds a manifest.
    pub fn exists(&self) -> bool {
        self.directory.join(MANIFEST_FILE).is_file()
    }

    /// Write all artifacts, blobs first and the manifest last.
    pub fn save(&self, artifacts: &ModelArtifacts) -> Result<()> {
        fs::create_dir_all(&self.directory)?;
        let id = artifacts.manifest.artifact_id;

        self.write_blob(CLASSIFIER_FILE, id, &artifacts.classifier)?;
        self.write_blob(VECTORIZER_FILE, id, &artifacts.vectorizer)?;
        self.write_blob(KNOWN_WORDS_FILE, id, &artifacts.known_words)?;

        let manifest = serde_json::to_vec_pretty(&artifacts.manifest)?;
        self.write_atomic(MANIFEST_FILE, &manifest)?;

        info!(
            "Saved model {} to {}",
            artifacts.manifest.artifact_id,
            self.directory.display()
        );
        Ok(())
    }

    /// Load and verify all artifacts.
    pub fn load(&self) -> Result<ModelArtifacts> {
        let manifest = self.load_manifest()?;
        let id = manifest.artifact_id;

        let classifier: LogisticRegression = self.read_blob(CLASSIFIER_FILE, id)?;
        let vectorizer: CharNgramVectorizer = self.read_blob(VECTORIZER_FILE, id)?;
        let known_words: KnownWords = self.read_blob(KNOWN_WORDS_FILE, id)?;

        if known_words.len() != manifest.known_words {
            return Err(LexGuardError::corrupt_artifact(
                &self.path(KNOWN_WORDS_FILE),
                format!(
                    "manifest records {} known words, blob holds {}",
                    manifest.known_words,
                    known_words.len()
                ),
            ));
        }
        if vectorizer.vocabulary_size() != manifest.vocabulary_size {
            return Err(LexGuardError::corrupt_artifact(
                &self.path(VECTORIZER_FILE),
                format!(
                    "manifest records {} n-gram columns, vectorizer holds {}",
                    manifest.vocabulary_size,
                    vectorizer.vocabulary_size()
                ),
            ));
        }
        classifier.ensure_ngram_width(vectorizer.vocabulary_size())?;

        debug!("Loaded model {} from {}", id, self.directory.display());
        Ok(ModelArtifacts {
            vectorizer,
            classifier,
            known_words,
            manifest,
        })
    }

    /// Read only the manifest.
    pub fn load_manifest(&self) -> Result<Manifest> {
        let path = self.path(MANIFEST_FILE);
        let bytes = read_existing(&path)?;
        let manifest: Manifest = serde_json::from_slice(&bytes)
            .map_err(|e| LexGuardError::corrupt_artifact(&path, e.to_string()))?;

        if manifest.format_version != FORMAT_VERSION {
            return Err(LexGuardError::artifact_version(
                &path,
                format!(
                    "format version {} is not supported (expected {})",
                    manifest.format_version, FORMAT_VERSION
                ),
            ));
        }
        Ok(manifest)
    }

    fn path(&self, name: &str) -> PathBuf {
        self.directory.join(name)
    }

    fn write_blob<T: Serialize>(&self, name: &str, artifact_id: Uuid, value: &T) -> Result<()> {
        let payload = bincode::serialize(value)?;
        let envelope = Envelope {
            format_version: FORMAT_VERSION,
            artifact_id,
            checksum: crc32fast::hash(&payload),
            payload,
        };
        let bytes = bincode::serialize(&envelope)?;
        self.write_atomic(name, &bytes)
    }

    fn read_blob<T: DeserializeOwned>(&self, name: &str, artifact_id: Uuid) -> Result<T> {
        let path = self.path(name);
        let bytes = read_existing(&path)?;
        let envelope: Envelope = bincode::deserialize(&bytes)
            .map_err(|e| LexGuardError::corrupt_artifact(&path, e.to_string()))?;

        if envelope.format_version != FORMAT_VERSION {
            return Err(LexGuardError::artifact_version(
                &path,
                format!(
                    "format version {} is not supported (expected {})",
                    envelope.format_version, FORMAT_VERSION
                ),
            ));
        }
        if envelope.artifact_id != artifact_id {
            return Err(LexGuardError::artifact_version(
                &path,
                format!(
                    "belongs to model {} but manifest is for {}",
                    envelope.artifact_id, artifact_id
                ),
            ));
        }
        let checksum = crc32fast::hash(&envelope.payload);
        if checksum != envelope.checksum {
            return Err(LexGuardError::corrupt_artifact(
                &path,
                format!(
                    "checksum mismatch (expected {:08x}, got {:08x})",
                    envelope.checksum, checksum
                ),
            ));
        }

        bincode::deserialize(&envelope.payload)
            .map_err(|e| LexGuardError::corrupt_artifact(&path, e.to_string()))
    }

    fn write_atomic(&self, name: &str, bytes: &[u8]) -> Result<()> {
        let final_path = self.path(name);
        let tmp_path = self.path(&format!("{name}.tmp"));
        let result = File::create(&tmp_path)
            .and_then(|mut file| {
                file.write_all(bytes)?;
                file.sync_all()
            })
            .and_then(|()| fs::rename(&tmp_path, &final_path));
        if let Err(e) = result {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }
        Ok(())
    }
}

fn read_existing(path: &Path) -> Result<Vec<u8>> {
    match fs::read(path) {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(LexGuardError::artifact_missing(path))
        }
        Err(e) => Err(e.into()),
    }
}

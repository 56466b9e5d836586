//! Command implementations for the lexguard CLI.

use std::io::{self, BufRead};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use log::info;

use crate::artifacts::ArtifactStore;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::LexGuardConfig;
use crate::detector::{DetectionContext, FakeWordDetector};
use crate::error::{LexGuardError, Result};
use crate::lexicon::{BuiltinLexicon, FrequencyLexicon};
use crate::training::Trainer;

/// Execute a CLI command.
pub fn execute_command(args: LexGuardArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    match &args.command {
        Command::Train(train_args) => train_model(train_args.clone(), config, &args),
        Command::Classify(classify_args) => classify_text(classify_args.clone(), config, &args),
        Command::Inspect(inspect_args) => inspect_model(inspect_args.clone(), &args),
    }
}

/// Train a model and save it.
fn train_model(args: TrainArgs, mut config: LexGuardConfig, cli_args: &LexGuardArgs) -> Result<()> {
    let store = ArtifactStore::new(&args.model_dir);
    if store.exists() && !args.force {
        return Err(LexGuardError::other(format!(
            "model already exists at {} (use --force to overwrite)",
            args.model_dir.display()
        )));
    }
    if let Some(seed) = args.seed {
        config.training.seed = seed;
    }

    let lexicon = load_lexicon(&args.lexicon)?;
    let known = match &args.word_list {
        Some(path) => FrequencyLexicon::load_word_list(path)?.known_words(),
        None => lexicon.known_words(),
    };
    info!(
        "Training on {} known words (seed {})",
        known.len(),
        config.training.seed
    );

    let outcome = Trainer::new(config.training).train(&known, &lexicon)?;
    store.save(&outcome.artifacts)?;

    let summary = TrainingSummary {
        model_dir: args.model_dir.display().to_string(),
        artifact_id: outcome.artifacts.manifest.artifact_id.to_string(),
        report: outcome.report,
    };
    output_result(&summary, cli_args)
}

/// Classify text with a saved model.
fn classify_text(args: ClassifyArgs, config: LexGuardConfig, cli_args: &LexGuardArgs) -> Result<()> {
    let lexicon = load_lexicon(&args.lexicon)?;
    let artifacts = ArtifactStore::new(&args.model_dir).load()?;
    let detector = FakeWordDetector::new(DetectionContext::new(
        artifacts,
        Arc::new(lexicon),
        config.cascade,
    ))?;

    let lines = match args.text {
        Some(text) => vec![text],
        None => read_stdin_lines()?,
    };

    let start_time = Instant::now();
    let results = lines
        .into_iter()
        .map(|line| {
            let verdicts = detector.classify_detailed(&line)?;
            Ok(ClassificationResult::new(line, verdicts))
        })
        .collect::<Result<Vec<_>>>()?;

    let results = ClassificationResults {
        results,
        duration_ms: start_time.elapsed().as_millis() as u64,
        fakes_only: args.fakes_only,
        detailed: args.detailed,
    };
    output_result(&results, cli_args)
}

/// Show a model's manifest.
fn inspect_model(args: InspectArgs, cli_args: &LexGuardArgs) -> Result<()> {
    let manifest = ArtifactStore::new(&args.model_dir).load_manifest()?;
    output_result(&manifest, cli_args)
}

fn load_config(path: Option<&Path>) -> Result<LexGuardConfig> {
    match path {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            LexGuardConfig::from_file(path)
        }
        None => Ok(LexGuardConfig::default()),
    }
}

fn load_lexicon(args: &LexiconArgs) -> Result<FrequencyLexicon> {
    match &args.frequency_file {
        Some(path) => {
            let lexicon = FrequencyLexicon::load_frequency_file(path)?;
            if lexicon.is_empty() {
                return Err(LexGuardError::invalid_config(format!(
                    "frequency file {} holds no usable entries",
                    path.display()
                )));
            }
            Ok(lexicon)
        }
        None => Ok(BuiltinLexicon::english()),
    }
}

fn read_stdin_lines() -> Result<Vec<String>> {
    let stdin = io::stdin();
    let mut lines = Vec::new();
    for line in stdin.lock().lines() {
        let line = line?;
        if !line.trim().is_empty() {
            lines.push(line);
        }
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::KnownWords;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_lexicon_defaults_to_builtin() {
        let lexicon = load_lexicon(&LexiconArgs::default()).unwrap();
        assert!(!lexicon.is_empty());
        assert!(lexicon.known_words().contains("brown"));
    }

    #[test]
    fn test_load_lexicon_rejects_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("freq.txt");
        fs::write(&path, "not-a-count line\n").unwrap();

        let args = LexiconArgs {
            frequency_file: Some(path),
        };
        assert!(matches!(
            load_lexicon(&args),
            Err(LexGuardError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_train_then_inspect() {
        let temp_dir = TempDir::new().unwrap();
        let model_dir = temp_dir.path().join("model");
        let config_path = temp_dir.path().join("config.json");
        fs::write(
            &config_path,
            r#"{"training": {"real_samples": 80, "random_fakes": 40, "typo_fakes": 40,
                "classifier": {"epochs": 50}}}"#,
        )
        .unwrap();

        let model = model_dir.to_str().unwrap();
        let config = config_path.to_str().unwrap();
        let args =
            LexGuardArgs::try_parse_from(["lexguard", "-q", "-c", config, "train", model]).unwrap();
        execute_command(args).unwrap();
        assert!(ArtifactStore::new(&model_dir).exists());

        // A second run without --force refuses to overwrite.
        let args =
            LexGuardArgs::try_parse_from(["lexguard", "-q", "-c", config, "train", model]).unwrap();
        assert!(execute_command(args).is_err());

        let args = LexGuardArgs::try_parse_from(["lexguard", "-q", "inspect", model]).unwrap();
        execute_command(args).unwrap();

        let args = LexGuardArgs::try_parse_from([
            "lexguard",
            "-q",
            "classify",
            model,
            "The quick brown fox",
        ])
        .unwrap();
        execute_command(args).unwrap();
    }

    #[test]
    fn test_known_words_from_word_list() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("words.txt");
        fs::write(&path, "quick\nbrown\nfox\nox\n").unwrap();

        let known: KnownWords = FrequencyLexicon::load_word_list(&path).unwrap().known_words();
        assert_eq!(known.as_slice(), &["brown", "fox", "quick"]);
    }
}

//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::artifacts::Manifest;
use crate::cli::args::{LexGuardArgs, OutputFormat};
use crate::error::Result;
use crate::training::TrainingReport;
use crate::types::{DetailedVerdict, Label};

/// Result structure for training.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrainingSummary {
    pub model_dir: String,
    pub artifact_id: String,
    pub report: TrainingReport,
}

/// Result structure for classification of one input line.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub text: String,
    pub verdicts: Vec<DetailedVerdict>,
    pub fake_count: usize,
}

impl ClassificationResult {
    pub fn new(text: String, verdicts: Vec<DetailedVerdict>) -> Self {
        let fake_count = verdicts.iter().filter(|v| v.label == Label::Fake).count();
        Self {
            text,
            verdicts,
            fake_count,
        }
    }
}

/// Results of a `classify` run.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassificationResults {
    pub results: Vec<ClassificationResult>,
    pub duration_ms: u64,
    /// Whether only fake words are shown.
    #[serde(skip)]
    pub fakes_only: bool,
    /// Whether the deciding tier is shown.
    #[serde(skip)]
    pub detailed: bool,
}

/// How a result prints in the human format.
pub trait HumanOutput {
    fn print_human(&self, args: &LexGuardArgs);
}

impl HumanOutput for TrainingSummary {
    fn print_human(&self, _args: &LexGuardArgs) {
        let report = &self.report;
        println!("Training Summary:");
        println!("═════════════════");
        println!("Model directory: {}", self.model_dir);
        println!("Artifact id: {}", self.artifact_id);
        println!(
            "Corpus: {} examples ({} real, {} fake)",
            report.corpus_size, report.real_examples, report.fake_examples
        );
        println!(
            "Split: {} train / {} holdout",
            report.train_size, report.holdout_size
        );
        println!("Vocabulary: {} n-grams", report.vocabulary_size);
        match report.holdout_accuracy {
            Some(accuracy) => println!("Holdout accuracy: {:.2}%", accuracy * 100.0),
            None => println!("Holdout accuracy: n/a"),
        }
        println!(
            "Final loss: {:.6} after {} epochs",
            report.final_loss, report.iterations
        );
        println!("Training time: {}ms", report.training_time_ms);
    }
}

impl HumanOutput for ClassificationResults {
    fn print_human(&self, args: &LexGuardArgs) {
        for result in &self.results {
            if self.fakes_only {
                let fakes: Vec<&str> = result
                    .verdicts
                    .iter()
                    .filter(|v| v.label == Label::Fake)
                    .map(|v| v.word.as_str())
                    .collect();
                println!("{}", fakes.join(" "));
                continue;
            }

            for verdict in &result.verdicts {
                if self.detailed {
                    println!(
                        "{:<24} {:<5} {}",
                        verdict.word,
                        verdict.label.to_string(),
                        verdict.tier
                    );
                } else {
                    println!("{:<24} {}", verdict.word, verdict.label);
                }
            }
            if self.results.len() > 1 {
                println!();
            }
        }

        if args.verbosity() > 1 {
            let total: usize = self.results.iter().map(|r| r.verdicts.len()).sum();
            let fakes: usize = self.results.iter().map(|r| r.fake_count).sum();
            println!("{total} words, {fakes} fake ({}ms)", self.duration_ms);
        }
    }
}

impl HumanOutput for Manifest {
    fn print_human(&self, _args: &LexGuardArgs) {
        println!("Model Manifest:");
        println!("═══════════════");
        println!("Artifact id: {}", self.artifact_id);
        println!("Format version: {}", self.format_version);
        println!("Created at: {}", self.created_at.to_rfc3339());
        println!("Vocabulary: {} n-grams", self.vocabulary_size);
        println!("Numeric features: {}", self.numeric_features);
        println!("Known words: {}", self.known_words);
        match self.holdout_accuracy {
            Some(accuracy) => println!("Holdout accuracy: {:.2}%", accuracy * 100.0),
            None => println!("Holdout accuracy: n/a"),
        }
        println!("Seed: {}", self.seed);
    }
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize + HumanOutput>(result: &T, args: &LexGuardArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            result.print_human(args);
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &LexGuardArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}

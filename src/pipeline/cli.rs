//! Command-line interface for the fake news classifier.

use super::config::Config;
use super::predict::predict_single;
use super::train::train_model;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "fakenews",
    about = "Fake news classifier (TF-IDF + logistic regression)"
)]
pub struct Cli {
    /// Configuration file; defaults are used when it does not exist.
    /// An existing file that cannot be loaded aborts the command.
    #[arg(long, global = true, default_value = "config.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Train a new model and save it with its vocabulary manifest.
    Train {
        /// Override the dataset CSV path.
        #[arg(long)]
        dataset: Option<PathBuf>,

        /// Override the model artifact path.
        #[arg(long)]
        model: Option<PathBuf>,

        /// Override the vocabulary manifest path.
        #[arg(long)]
        vocabulary: Option<PathBuf>,
    },

    /// Classify one text with a trained model.
    ///
    /// Prints a JSON record on stdout. On failure the record goes to
    /// stderr with a neutral prediction and the exit status is 1.
    Predict {
        /// Text to classify.
        text: String,

        /// Override the model artifact path.
        #[arg(long)]
        model: Option<PathBuf>,
    },
}

/// Main entry point for the CLI.
pub fn run(cli: Cli) -> ExitCode {
    let mut config = match Config::load_or_default(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Command::Train {
            dataset,
            model,
            vocabulary,
        } => {
            if let Some(path) = dataset {
                config.data.csv_path = path;
            }
            if let Some(path) = model {
                config.output.model_path = path;
            }
            if let Some(path) = vocabulary {
                config.output.vocabulary_path = path;
            }

            match train_model(&config) {
                Ok(report) => {
                    println!("{report}");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error: {e}");
                    ExitCode::FAILURE
                }
            }
        }
        Command::Predict { text, model } => {
            let model_path = model.unwrap_or(config.output.model_path);
            let outcome = predict_single(&model_path, &text);
            let record = outcome.to_record();
            let json = serde_json::to_string(&record)
                .unwrap_or_else(|e| format!("{{\"prediction\":0,\"confidence\":0.5,\"error\":\"{e}\"}}"));

            if outcome.is_success() {
                println!("{json}");
                ExitCode::SUCCESS
            } else {
                eprintln!("{json}");
                ExitCode::FAILURE
            }
        }
    }
}

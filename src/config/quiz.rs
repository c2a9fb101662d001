//! Quiz content configuration

use serde::Deserialize;
use std::path::PathBuf;

/// Where the question bank is read from
#[derive(Debug, Clone, Deserialize)]
pub struct QuizConfig {
    /// Path to the question bank JSON file
    #[serde(default = "default_bank_path")]
    pub bank_path: PathBuf,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            bank_path: default_bank_path(),
        }
    }
}

fn default_bank_path() -> PathBuf {
    PathBuf::from("questions.json")
}

//! Clue dictionary
//!
//! An immutable mapping from a clue to every answer that is accepted for it,
//! loaded once at startup from a JSON object such as
//! `{"ʁobo": ["robot", "robots"]}`.

use rand::Rng;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("Failed to read dictionary {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid dictionary JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Dictionary contains no clues")]
    Empty,
}

#[derive(Debug, Clone)]
pub struct ClueDictionary {
    /// Sorted so that random picks only depend on the RNG
    clues: Vec<String>,
    answers: HashMap<String, Vec<String>>,
}

impl ClueDictionary {
    pub fn new<I>(entries: I) -> Result<Self, DictionaryError>
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        let answers: HashMap<String, Vec<String>> = entries.into_iter().collect();
        if answers.is_empty() {
            return Err(DictionaryError::Empty);
        }

        let mut clues: Vec<String> = answers.keys().cloned().collect();
        clues.sort();

        Ok(Self { clues, answers })
    }

    pub fn from_json_str(json: &str) -> Result<Self, DictionaryError> {
        let entries: HashMap<String, Vec<String>> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DictionaryError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| DictionaryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dictionary = Self::from_json_str(&json)?;
        tracing::info!(
            "Loaded {} clues from {}",
            dictionary.len(),
            path.display()
        );
        Ok(dictionary)
    }

    /// Pick a clue uniformly at random
    pub fn random_clue<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        &self.clues[rng.random_range(0..self.clues.len())]
    }

    /// Accepted answers for a clue, empty if the clue is unknown
    pub fn answers(&self, clue: &str) -> &[String] {
        self.answers.get(clue).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.clues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clues.is_empty()
    }
}

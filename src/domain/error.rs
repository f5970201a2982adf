use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to create data directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize collection: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("'{0}' is required")]
    MissingField(&'static str),

    #[error("'{field}' must be between 0 and {max}, got {value}")]
    RatingOutOfRange {
        field: String,
        value: u8,
        max: u8,
    },

    #[error("Select at least one emotion and rate its intensity")]
    NoEmotions,

    #[error("Re-rate the intensity for '{0}' in the final emotions")]
    MissingFinalRating(String),

    #[error("Rate actual pleasure/mastery or add some notes")]
    EmptyReview,

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
}

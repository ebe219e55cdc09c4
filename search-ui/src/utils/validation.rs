use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

pub const MIN_SEARCH_LEN: usize = 3;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Value too short, must be at least 3 characters")]
    TooShort,
    #[error("Value should contain at least 3 chars")]
    NoWordRun,
}

fn word_run() -> &'static Regex {
    static WORD_RUN: OnceLock<Regex> = OnceLock::new();
    WORD_RUN.get_or_init(|| {
        Regex::new(r"[a-zA-Z0-9А-Яа-яЁё]{3,}").expect("word-run pattern compiles")
    })
}

/// Checks raw search text before it enters the query pipeline.
/// Empty text is valid; it just never produces a request.
pub fn validate_search_text(text: &str) -> Result<(), ValidationError> {
    if text.is_empty() {
        return Ok(());
    }
    if text.chars().count() < MIN_SEARCH_LEN {
        return Err(ValidationError::TooShort);
    }
    if !word_run().is_match(text) {
        return Err(ValidationError::NoWordRun);
    }
    Ok(())
}

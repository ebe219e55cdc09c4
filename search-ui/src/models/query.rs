use crate::models::book::Book;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionError {
    #[error("Limit must be one of 10, 30, 50, 100")]
    Limit(u32),
    #[error("Unknown search field: {0}")]
    Field(String),
}

/// Which catalog fields a query matches against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchField {
    #[default]
    #[serde(rename = "author_name,title,first_publish_year")]
    All,
    #[serde(rename = "title")]
    Title,
    #[serde(rename = "first_publish_year")]
    Year,
    #[serde(rename = "author_name")]
    Author,
}

impl SearchField {
    pub const ALL: [SearchField; 4] = [
        SearchField::All,
        SearchField::Title,
        SearchField::Year,
        SearchField::Author,
    ];

    pub fn value(self) -> &'static str {
        match self {
            SearchField::All => "author_name,title,first_publish_year",
            SearchField::Title => "title",
            SearchField::Year => "first_publish_year",
            SearchField::Author => "author_name",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SearchField::All => "All",
            SearchField::Title => "Title",
            SearchField::Year => "Year",
            SearchField::Author => "Author",
        }
    }
}

impl FromStr for SearchField {
    type Err = OptionError;

    /// Accepts either the wire value or the display label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        SearchField::ALL
            .into_iter()
            .find(|f| f.value() == s || f.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| OptionError::Field(s.to_string()))
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

/// Result-size limit, restricted to the sizes the page offers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum LimitOption {
    #[default]
    Ten,
    Thirty,
    Fifty,
    Hundred,
}

impl LimitOption {
    pub const ALL: [LimitOption; 4] = [
        LimitOption::Ten,
        LimitOption::Thirty,
        LimitOption::Fifty,
        LimitOption::Hundred,
    ];

    pub fn value(self) -> u32 {
        match self {
            LimitOption::Ten => 10,
            LimitOption::Thirty => 30,
            LimitOption::Fifty => 50,
            LimitOption::Hundred => 100,
        }
    }
}

impl TryFrom<u32> for LimitOption {
    type Error = OptionError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        LimitOption::ALL
            .into_iter()
            .find(|l| l.value() == value)
            .ok_or(OptionError::Limit(value))
    }
}

impl From<LimitOption> for u32 {
    fn from(limit: LimitOption) -> Self {
        limit.value()
    }
}

impl FromStr for LimitOption {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u32 = s.trim().parse().map_err(|_| OptionError::Limit(0))?;
        LimitOption::try_from(value)
    }
}

impl fmt::Display for LimitOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Everything that determines the next catalog request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    pub search_text: String,
    pub limit: LimitOption,
    pub field: SearchField,
}

/// What the page renders. At most one of the two is meaningful at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    pub books_list: Vec<Book>,
    pub error_message: String,
}

impl UiState {
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.error_message = message.into();
        self.books_list.clear();
    }

    pub fn show_books(&mut self, books: Vec<Book>) {
        self.books_list = books;
        self.error_message.clear();
    }
}

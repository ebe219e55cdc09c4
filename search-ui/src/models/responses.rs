use crate::models::query::{LimitOption, SearchField};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug)]
pub struct HealthResponse {
    pub service: String,
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldChoice {
    pub label: String,
    pub value: SearchField,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OptionsResponse {
    pub limits: Vec<LimitOption>,
    pub fields: Vec<FieldChoice>,
}

impl OptionsResponse {
    pub fn offered() -> Self {
        OptionsResponse {
            limits: LimitOption::ALL.to_vec(),
            fields: SearchField::ALL
                .into_iter()
                .map(|value| FieldChoice {
                    label: value.label().to_string(),
                    value,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Deserialize)]
pub struct TextUpdate {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct LimitUpdate {
    pub limit: u32,
}

#[derive(Debug, Deserialize)]
pub struct FieldUpdate {
    pub field: String,
}

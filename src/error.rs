use thiserror::Error;

#[derive(Debug, Error)]
pub enum MealError {
    #[error("Division undefined: {0}")]
    DivisionUndefined(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Ingredient not found: {name}{}", suggestion_hint(.suggestion))]
    IngredientNotFound {
        name: String,
        suggestion: Option<String>,
    },

    #[error("Ingredient already exists: {0}")]
    DuplicateIngredient(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl MealError {
    /// Errors caused by the entered data, which the user can correct and retry.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            MealError::DivisionUndefined(_)
                | MealError::InvalidRecord(_)
                | MealError::IngredientNotFound { .. }
                | MealError::DuplicateIngredient(_)
                | MealError::InvalidInput(_)
        )
    }
}

fn suggestion_hint(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!(" (did you mean '{}'?)", s),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, MealError>;

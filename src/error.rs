use thiserror::Error;

/// Reasons a listing page could not be turned into a record
#[derive(Debug, Error, PartialEq)]
pub enum ExtractError {
    #[error("no element matches selector `{selector}`")]
    ElementNotFound { selector: String },

    #[error("field `{field}` not found on page")]
    FieldNotFound { field: &'static str },

    #[error("could not parse `{field}`: {reason}")]
    Parse { field: &'static str, reason: String },

    #[error("space table has {headers} headers but {values} values")]
    ColumnMismatch { headers: usize, values: usize },

    #[error("invalid selector `{selector}`: {reason}")]
    Selector { selector: String, reason: String },
}

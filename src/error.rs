use thiserror::Error;

/// Errors raised by the case intelligence core.
///
/// Only malformed or missing required inputs raise. Domain-level uncertainty
/// (low confidence, inconsistent fields, risky case state) is represented as
/// data: confidence scores, validation warnings, and clinical flags.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid value for {field}: {value}")]
    InvalidEnum { field: String, value: String },

    #[error("Document '{filename}' contains no extractable text")]
    EmptyDocument { filename: String },
}

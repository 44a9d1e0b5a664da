//! Error types for placeholder substitution

use crate::placeholder::RenderError;
use thiserror::Error;

/// A token whose value could not be inserted
///
/// Local to one token: the token stays in the text verbatim and the rest
/// of the paragraph is still substituted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Cannot substitute ${{{key}}}: {source}")]
pub struct SubstitutionError {
    /// Key of the offending token
    pub key: String,

    /// Why the value could not be rendered
    #[source]
    pub source: RenderError,
}

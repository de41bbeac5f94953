//! Utility functions and errors for parsing input.

use std::str::FromStr;

use thiserror::Error;

/// A string parsing error carrying the text that was being parsed.
#[derive(Error, Debug)]
#[error("failed to parse field: {text:?}")]
pub struct FieldError<E>
where
    E: std::error::Error,
{
    /// The text that was being parsed.
    text: String,
    source: E,
}

/// Parse a string slice into another type.
///
/// This wraps [`str::parse`] and maps errors to [`FieldError`], so a failure
/// reports the offending text instead of only the bare [`FromStr`] error.
///
/// # Errors
///
/// Will return a [`FieldError`] with the given text as context and
/// [`F::Err`][FromStr::Err] as the source if the text does not parse into the
/// desired type.
pub fn parse_field<F>(text: &str) -> Result<F, FieldError<F::Err>>
where
    F: FromStr,
    F::Err: std::error::Error,
{
    text.parse::<F>().map_err(|source| FieldError {
        text: text.to_string(),
        source,
    })
}

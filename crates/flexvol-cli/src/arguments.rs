//! Positional argument access and options blob decoding.

use flexvol_contract::Options;
use thiserror::Error;

/// Errors raised while decoding an options blob.
#[derive(Debug, Error)]
pub enum OptionsError {
    /// The blob was not a JSON object of string values.
    #[error("Unable to process json: |{raw}|: {source}")]
    Decode {
        /// The argument exactly as received.
        raw: String,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
}

/// Positional arguments handed to a sub-command.
///
/// Reading past the end yields an empty string, matching how the calling
/// convention treats omitted trailing arguments.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Arguments<'a> {
    values: &'a [String],
}

impl<'a> Arguments<'a> {
    pub(crate) const fn new(values: &'a [String]) -> Self {
        Self { values }
    }

    pub(crate) fn get(&self, index: usize) -> &'a str {
        self.values.get(index).map_or("", String::as_str)
    }

    pub(crate) fn options(&self, index: usize) -> Result<Options, OptionsError> {
        decode_options(self.get(index))
    }
}

/// Decodes an options blob into a string map.
///
/// # Errors
///
/// Returns [`OptionsError::Decode`] when `raw` is not a JSON object whose
/// values are all strings. The error echoes `raw`.
pub fn decode_options(raw: &str) -> Result<Options, OptionsError> {
    serde_json::from_str(raw).map_err(|source| OptionsError::Decode {
        raw: raw.to_owned(),
        source,
    })
}

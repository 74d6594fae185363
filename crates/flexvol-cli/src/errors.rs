//! Adapter-level errors raised while producing the JSON envelope.

use thiserror::Error;

/// Errors raised by the dispatcher itself rather than by the driver.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The envelope could not be serialised to JSON.
    #[error("Unable to create json: {source}")]
    Serialize {
        /// Underlying serialisation error.
        #[source]
        source: serde_json::Error,
    },
}

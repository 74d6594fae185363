//! The JSON result envelope returned by every driver operation.
//!
//! One [`Response`] type is shared by all operations. Fields that only make
//! sense for some operations (`device`, `volumeName`, `attached`) are
//! optional and are left out of the serialised form when unset, so a reader
//! never sees `null` or an empty string in their place.


use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Capabilities;

/// Outcome reported by a driver operation.
///
/// The status drives both the JSON payload and the process exit code: only
/// [`Status::Success`] exits with zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// The operation completed.
    Success,
    /// The operation failed; the message explains why.
    Failure,
    /// The driver does not implement the operation.
    #[serde(rename = "Not Supported")]
    NotSupported,
}

impl Status {
    /// Returns the wire spelling of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Failure => "Failure",
            Self::NotSupported => "Not Supported",
        }
    }

    /// Returns true for [`Status::Success`].
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result envelope shared by every driver operation.
///
/// # Example
///
/// ```
/// use flexvol_contract::{Response, Status};
///
/// let response = Response::success().with_device("/dev/sdb1");
/// assert_eq!(response.status(), Status::Success);
/// assert_eq!(response.device(), Some("/dev/sdb1"));
/// assert_eq!(response.volume_name(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    status: Status,
    #[serde(default)]
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    device: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    volume_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    attached: Option<bool>,
}

impl Response {
    /// Creates a response with the given status and message.
    #[must_use]
    pub fn new(status: Status, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            device: None,
            volume_name: None,
            attached: None,
        }
    }

    /// Creates a successful response with an empty message.
    #[must_use]
    pub fn success() -> Self {
        Self::new(Status::Success, String::new())
    }

    /// Creates a failed response.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(Status::Failure, message)
    }

    /// Creates a response for an operation the driver does not implement.
    #[must_use]
    pub fn not_supported(message: impl Into<String>) -> Self {
        Self::new(Status::NotSupported, message)
    }

    /// Converts an error into a failed response carrying its display text.
    ///
    /// Adapter-level problems (an undecodable options blob, an envelope that
    /// cannot be serialised) are reported through this path instead of being
    /// propagated as raw errors.
    #[must_use]
    pub fn wrap_error(error: &dyn std::error::Error) -> Self {
        Self::failure(error.to_string())
    }

    /// Replaces the human-readable message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attaches a device path. An empty path leaves the field unset.
    #[must_use]
    pub fn with_device(mut self, device: impl Into<String>) -> Self {
        self.device = Some(device.into()).filter(|device| !device.is_empty());
        self
    }

    /// Attaches a resolved volume name. An empty name leaves the field unset.
    #[must_use]
    pub fn with_volume_name(mut self, volume_name: impl Into<String>) -> Self {
        self.volume_name = Some(volume_name.into()).filter(|name| !name.is_empty());
        self
    }

    /// Attaches the answer to an attachment-status query.
    #[must_use]
    pub const fn with_attached(mut self, attached: bool) -> Self {
        self.attached = Some(attached);
        self
    }

    /// Returns the operation status.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Returns the message, empty when the driver had nothing to say.
    #[must_use]
    pub const fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Returns the device path, if the operation resolved one.
    #[must_use]
    pub fn device(&self) -> Option<&str> {
        self.device.as_deref()
    }

    /// Returns the volume name, if the operation resolved one.
    #[must_use]
    pub fn volume_name(&self) -> Option<&str> {
        self.volume_name.as_deref()
    }

    /// Returns the attachment flag, if the operation reported one.
    #[must_use]
    pub const fn attached(&self) -> Option<bool> {
        self.attached
    }
}

/// Output of the `init` command: the driver's response plus its capabilities.
///
/// The response fields are flattened into the top-level object and the
/// capabilities are nested under a `capabilities` key. An empty capability
/// set is omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitResponse {
    #[serde(flatten)]
    response: Response,
    #[serde(default, skip_serializing_if = "Capabilities::is_empty")]
    capabilities: Capabilities,
}

impl InitResponse {
    /// Combines an `init` response with the driver's capabilities.
    #[must_use]
    pub const fn new(response: Response, capabilities: Capabilities) -> Self {
        Self {
            response,
            capabilities,
        }
    }

    /// Returns the wrapped response.
    #[must_use]
    pub const fn response(&self) -> &Response {
        &self.response
    }

    /// Returns the advertised capabilities.
    #[must_use]
    pub const fn capabilities(&self) -> Capabilities {
        self.capabilities
    }
}

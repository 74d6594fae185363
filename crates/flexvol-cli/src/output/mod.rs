//! Rendering of envelopes into the process streams and exit code.
//!
//! Successful `init` output goes to stdout. Everything else, including a
//! failed `init`, goes to stderr. The exit code is zero only for
//! [`Status::Success`].


use std::io::Write;
use std::process::ExitCode;

use flexvol_contract::{InitResponse, Response, Status};
use serde::Serialize;
use tracing::error;

use crate::errors::DispatchError;

/// Process stream receiving the rendered payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStream {
    /// Standard output.
    Stdout,
    /// Standard error.
    Stderr,
}

/// The complete result of one invocation, ready to be written out.
///
/// Dispatch never terminates the process. The entry point writes the
/// payload with [`DispatchOutcome::write`] and returns the exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    stream: OutputStream,
    payload: String,
    status: Option<Status>,
    exit_code: u8,
}

impl DispatchOutcome {
    fn envelope(stream: OutputStream, payload: String, status: Status) -> Self {
        Self {
            stream,
            payload,
            status: Some(status),
            exit_code: u8::from(!status.is_success()),
        }
    }

    /// Outcome carrying a bare error line instead of a JSON envelope.
    pub(crate) fn plain_error(error: &DispatchError) -> Self {
        Self {
            stream: OutputStream::Stderr,
            payload: error.to_string(),
            status: None,
            exit_code: 1,
        }
    }

    /// Outcome produced by the argument parser itself (usage errors, help).
    pub(crate) fn usage(stream: OutputStream, payload: String, exit_code: u8) -> Self {
        Self {
            stream,
            payload,
            status: None,
            exit_code,
        }
    }

    /// Stream the payload is written to.
    #[must_use]
    pub const fn stream(&self) -> OutputStream {
        self.stream
    }

    /// Rendered payload without the trailing newline.
    #[must_use]
    pub fn payload(&self) -> &str {
        self.payload.as_str()
    }

    /// Status of the rendered envelope, if one was rendered.
    #[must_use]
    pub const fn status(&self) -> Option<Status> {
        self.status
    }

    /// Raw process exit code.
    #[must_use]
    pub const fn code(&self) -> u8 {
        self.exit_code
    }

    /// Process exit code.
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_code)
    }

    /// Writes the payload and a newline to the selected stream.
    ///
    /// Returns the outcome's exit code, or failure when writing fails.
    pub fn write(&self, stdout: &mut impl Write, stderr: &mut impl Write) -> ExitCode {
        let written = match self.stream {
            OutputStream::Stdout => write_line(stdout, &self.payload),
            OutputStream::Stderr => write_line(stderr, &self.payload),
        };
        match written {
            Ok(()) => self.exit_code(),
            Err(source) => {
                error!(%source, "failed to write driver output");
                ExitCode::FAILURE
            }
        }
    }
}

fn write_line(stream: &mut impl Write, payload: &str) -> std::io::Result<()> {
    writeln!(stream, "{payload}")?;
    stream.flush()
}

/// Serialises `envelope`, routing success to `success_stream`.
pub(crate) fn render_envelope<T: Serialize>(
    envelope: &T,
    status: Status,
    success_stream: OutputStream,
) -> Result<DispatchOutcome, DispatchError> {
    let payload =
        serde_json::to_string(envelope).map_err(|source| DispatchError::Serialize { source })?;
    let stream = if status.is_success() {
        success_stream
    } else {
        OutputStream::Stderr
    };
    Ok(DispatchOutcome::envelope(stream, payload, status))
}

/// Renders an operation response to stderr.
///
/// A response that cannot be serialised is reported as a bare error line.
pub(crate) fn render_response(response: &Response) -> DispatchOutcome {
    render_envelope(response, response.status(), OutputStream::Stderr)
        .unwrap_or_else(|error| DispatchOutcome::plain_error(&error))
}

/// Renders `init` output: stdout on success, stderr otherwise.
///
/// A serialisation failure is wrapped into a failure envelope first.
pub(crate) fn render_init(output: &InitResponse) -> DispatchOutcome {
    render_envelope(output, output.response().status(), OutputStream::Stdout)
        .unwrap_or_else(|error| render_response(&Response::wrap_error(&error)))
}

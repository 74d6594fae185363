//! Command-line front end for FlexVolume drivers.
//!
//! The orchestrator runs a driver once per lifecycle step with positional
//! arguments, for example `driver mount /var/lib/pods/vol /dev/sdb1
//! '{"kubernetes.io/fsType":"ext4"}'`. This crate turns such an invocation
//! into one [`FlexVolumeDriver`] call and renders the returned envelope:
//!
//! - successful `init` output is JSON on stdout;
//! - every other envelope is JSON on stderr;
//! - the exit code is zero exactly when the status is `Success`.
//!
//! Dispatch never exits the process. [`run`] bootstraps configuration and
//! logging, dispatches, writes the outcome and hands back the [`ExitCode`]
//! for `main` to return.
//!
//! # Example
//!
//! ```no_run
//! use std::process::ExitCode;
//!
//! use flexvol_contract::{Capabilities, FlexVolumeDriver, Options, Response};
//!
//! struct Driver;
//!
//! impl FlexVolumeDriver for Driver {
//!     fn init(&self) -> Response { Response::success() }
//!     fn capabilities(&self) -> Capabilities { Capabilities::none() }
//!     fn mount(&self, _: &str, _: &str, _: &Options) -> Response { Response::success() }
//!     fn unmount(&self, _: &str) -> Response { Response::success() }
//! }
//!
//! fn main() -> ExitCode {
//!     let mut stdout = std::io::stdout().lock();
//!     let mut stderr = std::io::stderr().lock();
//!     flexvol_cli::run(std::env::args_os(), &Driver, &mut stdout, &mut stderr)
//! }
//! ```

mod arguments;
mod command;
mod dispatch;
mod errors;
pub mod output;
pub mod telemetry;

#[cfg(test)]
mod tests;

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use flexvol_contract::{FlexVolumeDriver, Response};

pub use arguments::{OptionsError, decode_options};
pub use command::{DriverCommand, published_commands};
pub use dispatch::Dispatcher;
pub use errors::DispatchError;
pub use output::{DispatchOutcome, OutputStream};

const DEFAULT_PROGRAM_NAME: &str = "flexvolume";

/// Runs one driver invocation with configuration and logging bootstrapped.
///
/// Configuration is read from the environment (see `flexvol-config`). A
/// configuration error is reported as a failure envelope. A logging setup
/// error only disables logging.
#[must_use]
pub fn run<I, D, W, E>(args: I, driver: &D, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    D: FlexVolumeDriver + ?Sized,
    W: Write,
    E: Write,
{
    let args: Vec<OsString> = args.into_iter().collect();
    let program = args
        .first()
        .cloned()
        .unwrap_or_else(|| OsString::from(DEFAULT_PROGRAM_NAME));

    let config = match flexvol_config::load(program) {
        Ok(config) => config,
        Err(error) => return report_error(&error, stdout, stderr),
    };
    // Logging is best effort; the protocol outcome never depends on it.
    telemetry::initialise(&config).ok();

    execute(args, driver, stdout, stderr)
}

/// Reports an adapter-level error as a failure envelope on stderr.
///
/// Driver binaries use this for setup errors raised before a driver exists.
#[must_use]
pub fn report_error<W: Write, E: Write>(
    error: &dyn std::error::Error,
    stdout: &mut W,
    stderr: &mut E,
) -> ExitCode {
    output::render_response(&Response::wrap_error(error)).write(stdout, stderr)
}

/// Runs one driver invocation without touching configuration or logging.
#[must_use]
pub fn execute<I, T, D, W, E>(args: I, driver: &D, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    D: FlexVolumeDriver + ?Sized,
    W: Write,
    E: Write,
{
    Dispatcher::new(driver).run(args).write(stdout, stderr)
}

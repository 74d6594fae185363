//! Binary entrypoint for the echo FlexVolume driver.

use std::ffi::OsString;
use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

use flexvol_echo::EchoDriver;

fn main() -> ExitCode {
    let args: Vec<OsString> = std::env::args_os().collect();
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();

    let program = args.first().cloned().unwrap_or_default();
    match flexvol_echo::load_config(program) {
        Ok(config) => flexvol_cli::run(
            args,
            &EchoDriver::from_config(&config),
            &mut stdout,
            &mut stderr,
        ),
        Err(error) => flexvol_cli::report_error(&error, &mut stdout, &mut stderr),
    }
}

//! Translation of an invoked sub-command into a driver call.

use std::ffi::OsString;

use clap::error::ErrorKind;
use flexvol_contract::{Capabilities, FlexVolumeDriver, InitResponse, Options, Response};
use tracing::{debug, info, warn};

use crate::arguments::Arguments;
use crate::command::{DriverCommand, command_line, published_commands};
use crate::output::{DispatchOutcome, OutputStream, render_init, render_response};

/// Exit code of an unpublished command, matching the argument parser's usage errors.
const UNPUBLISHED_EXIT_CODE: u8 = 2;

/// Envelope produced by a driver call.
enum Reply {
    Init(InitResponse),
    Operation(Response),
}

/// Routes sub-commands to a [`FlexVolumeDriver`].
///
/// The driver's capabilities are queried once, on construction, and decide
/// which commands are published for the lifetime of the dispatcher.
///
/// # Example
///
/// ```
/// use flexvol_cli::{DriverCommand, Dispatcher, OutputStream};
/// use flexvol_contract::{Capabilities, FlexVolumeDriver, Options, Response};
///
/// struct Static;
///
/// impl FlexVolumeDriver for Static {
///     fn init(&self) -> Response { Response::success() }
///     fn capabilities(&self) -> Capabilities { Capabilities::none() }
///     fn mount(&self, _: &str, source: &str, _: &Options) -> Response {
///         Response::success().with_device(source)
///     }
///     fn unmount(&self, _: &str) -> Response { Response::success() }
/// }
///
/// let dispatcher = Dispatcher::new(&Static);
/// assert!(!dispatcher.commands().contains(&DriverCommand::Attach));
///
/// let outcome = dispatcher.run(["driver", "mount", "/mnt/t", "/dev/sdb1", "{}"]);
/// assert_eq!(outcome.stream(), OutputStream::Stderr);
/// assert_eq!(outcome.code(), 0);
/// ```
pub struct Dispatcher<'d, D: FlexVolumeDriver + ?Sized> {
    driver: &'d D,
    capabilities: Capabilities,
}

impl<'d, D: FlexVolumeDriver + ?Sized> Dispatcher<'d, D> {
    /// Creates a dispatcher, querying the driver's capabilities.
    #[must_use]
    pub fn new(driver: &'d D) -> Self {
        let capabilities = driver.capabilities();
        debug!(
            attach = capabilities.attach,
            detach = capabilities.detach,
            "queried driver capabilities"
        );
        Self {
            driver,
            capabilities,
        }
    }

    /// Capabilities reported by the driver.
    #[must_use]
    pub const fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Commands published for this driver, in publication order.
    #[must_use]
    pub fn commands(&self) -> Vec<DriverCommand> {
        published_commands(self.capabilities)
    }

    /// Parses a full argument vector (program name first) and dispatches it.
    ///
    /// Unknown commands and usage errors are answered by the argument parser
    /// without reaching the driver.
    pub fn run<I, T>(&self, args: I) -> DispatchOutcome
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let argv: Vec<OsString> = args.into_iter().map(Into::into).collect();
        let matches = match command_line(&self.commands()).try_get_matches_from(argv.clone()) {
            Ok(matches) => matches,
            Err(error) => return usage_outcome(&error),
        };
        let Some((name, _)) = matches.subcommand() else {
            return DispatchOutcome::usage(
                OutputStream::Stderr,
                String::from("a sub-command must be provided"),
                1,
            );
        };
        // The root takes no arguments of its own, so a matched sub-command is
        // always argv[1]. Values are read from argv rather than the matches
        // because clap consumes a leading `--` and would shift every index.
        let arguments: Vec<String> = argv
            .iter()
            .skip(2)
            .map(|value| value.to_string_lossy().into_owned())
            .collect();

        match DriverCommand::from_name(name) {
            Some(command) => self.dispatch(command, &arguments),
            None => DispatchOutcome::usage(
                OutputStream::Stderr,
                format!("unrecognized subcommand '{name}'"),
                1,
            ),
        }
    }

    /// Dispatches one command with its positional arguments.
    ///
    /// A command the driver's capabilities do not publish is answered like
    /// an unknown sub-command (exit code 2) without reaching the driver.
    /// When the command takes an options blob that does not decode, a
    /// failure envelope is rendered and the driver is not called.
    pub fn dispatch(&self, command: DriverCommand, arguments: &[String]) -> DispatchOutcome {
        if !command.is_enabled(self.capabilities) {
            warn!(%command, "command is not published for this driver");
            return DispatchOutcome::usage(
                OutputStream::Stderr,
                format!("error: unrecognized subcommand '{command}'"),
                UNPUBLISHED_EXIT_CODE,
            );
        }
        debug!(%command, arguments = arguments.len(), "dispatching driver command");
        let positional = Arguments::new(arguments);

        let options = match command
            .options_index()
            .map(|index| positional.options(index))
            .transpose()
        {
            Ok(options) => options.unwrap_or_default(),
            Err(error) => {
                warn!(%command, %error, "rejected options argument");
                return render_response(&Response::wrap_error(&error));
            }
        };

        let outcome = match self.call(command, positional, &options) {
            Reply::Init(output) => render_init(&output),
            Reply::Operation(response) => render_response(&response),
        };
        info!(
            %command,
            status = outcome.status().map(|status| status.as_str()),
            exit_code = outcome.code(),
            "driver command finished"
        );
        outcome
    }

    fn call(&self, command: DriverCommand, arguments: Arguments<'_>, options: &Options) -> Reply {
        let driver = self.driver;
        let response = match command {
            DriverCommand::Init => {
                return Reply::Init(InitResponse::new(driver.init(), self.capabilities));
            }
            DriverCommand::Attach => driver.attach(options),
            DriverCommand::Detach => driver.detach(arguments.get(0), arguments.get(1)),
            DriverCommand::Mount => driver.mount(arguments.get(0), arguments.get(1), options),
            DriverCommand::Unmount => driver.unmount(arguments.get(0)),
            DriverCommand::GetVolumeName => driver.get_volume_name(options),
            DriverCommand::WaitForAttach => driver.wait_for_attach(arguments.get(1), options),
            DriverCommand::IsAttached => driver.is_attached(options, arguments.get(2)),
            DriverCommand::MountDevice => {
                driver.mount_device(arguments.get(1), arguments.get(2), options)
            }
            DriverCommand::UnmountDevice => driver.unmount_device(arguments.get(1)),
        };
        Reply::Operation(response)
    }
}

fn usage_outcome(error: &clap::Error) -> DispatchOutcome {
    let stream = if error.use_stderr() {
        OutputStream::Stderr
    } else {
        OutputStream::Stdout
    };
    if error.kind() != ErrorKind::DisplayHelp {
        warn!(kind = ?error.kind(), "rejected command line");
    }
    let exit_code = u8::try_from(error.exit_code()).unwrap_or(1);
    DispatchOutcome::usage(stream, error.to_string().trim_end().to_owned(), exit_code)
}

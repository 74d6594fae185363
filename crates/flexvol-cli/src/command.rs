//! The sub-command table and its `clap` rendering.
//!
//! The published command surface depends on the driver: `attach` and
//! `detach` only exist when the driver's [`Capabilities`] enable them, so
//! the `clap` tree is assembled at run time with the builder API.

use clap::{Arg, ArgAction, Command};
use flexvol_contract::Capabilities;

/// Identifier of the positional argument list every sub-command accepts.
pub(crate) const ARGUMENTS: &str = "arguments";

/// A sub-command of the FlexVolume calling convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DriverCommand {
    /// `init`: driver setup; prints the capabilities.
    Init,
    /// `attach <options>`.
    Attach,
    /// `detach <volume> [node]`.
    Detach,
    /// `mount <target> <source> <options>`.
    Mount,
    /// `unmount <target>`.
    Unmount,
    /// `getvolumename _ <options>`.
    GetVolumeName,
    /// `waitforattach _ <device hint> <options>`.
    WaitForAttach,
    /// `isattached _ <options> <node>`.
    IsAttached,
    /// `mountdevice _ <dir> <device> <options>`.
    MountDevice,
    /// `unmountdevice _ <dir>`.
    UnmountDevice,
}

impl DriverCommand {
    /// Every sub-command in publication order.
    pub const ALL: [Self; 10] = [
        Self::Init,
        Self::Attach,
        Self::Detach,
        Self::Mount,
        Self::Unmount,
        Self::GetVolumeName,
        Self::WaitForAttach,
        Self::IsAttached,
        Self::MountDevice,
        Self::UnmountDevice,
    ];

    /// Returns the name the orchestrator invokes.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Attach => "attach",
            Self::Detach => "detach",
            Self::Mount => "mount",
            Self::Unmount => "unmount",
            Self::GetVolumeName => "getvolumename",
            Self::WaitForAttach => "waitforattach",
            Self::IsAttached => "isattached",
            Self::MountDevice => "mountdevice",
            Self::UnmountDevice => "unmountdevice",
        }
    }

    /// Returns the one-line help text.
    #[must_use]
    pub const fn usage(self) -> &'static str {
        match self {
            Self::Init => "Initialize the driver",
            Self::Attach => "Attach the volume",
            Self::Detach => "Detach the volume",
            Self::Mount => "Mount the volume",
            Self::Unmount => "Unmount the volume",
            Self::GetVolumeName => "Returns the unique name of the volume",
            Self::WaitForAttach => {
                "Waits until a volume is fully attached to a node and its device emerges"
            }
            Self::IsAttached => "Checks that a volume is attached to a node",
            Self::MountDevice => "Mounts a volume's device to a directory",
            Self::UnmountDevice => "Unmounts a volume's device from a directory",
        }
    }

    /// Looks a sub-command up by its invoked name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|command| command.name() == name)
    }

    /// Position of the JSON options argument, if the command takes one.
    ///
    /// The offsets are part of the calling convention and differ between
    /// commands: some count from zero, others skip a leading argument.
    #[must_use]
    pub const fn options_index(self) -> Option<usize> {
        match self {
            Self::Attach => Some(0),
            Self::GetVolumeName | Self::IsAttached => Some(1),
            Self::Mount | Self::WaitForAttach => Some(2),
            Self::MountDevice => Some(3),
            Self::Init | Self::Detach | Self::Unmount | Self::UnmountDevice => None,
        }
    }

    /// Returns true when publication depends on a capability flag.
    #[must_use]
    pub const fn is_optional(self) -> bool {
        matches!(self, Self::Attach | Self::Detach)
    }

    /// Returns true when `capabilities` allow the command to be published.
    #[must_use]
    pub const fn is_enabled(self, capabilities: Capabilities) -> bool {
        match self {
            Self::Attach => capabilities.attach,
            Self::Detach => capabilities.detach,
            _ => true,
        }
    }

    fn to_clap(self) -> Command {
        Command::new(self.name())
            .about(self.usage())
            .disable_help_flag(true)
            .arg(
                Arg::new(ARGUMENTS)
                    .value_name("ARG")
                    .value_parser(clap::value_parser!(String))
                    .action(ArgAction::Append)
                    .num_args(0..)
                    .trailing_var_arg(true)
                    .allow_hyphen_values(true),
            )
    }
}

impl std::fmt::Display for DriverCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns the commands published for a driver with `capabilities`.
///
/// The always-present commands are published unconditionally; `attach` and
/// `detach` are added only when the matching flag is set.
#[must_use]
pub fn published_commands(capabilities: Capabilities) -> Vec<DriverCommand> {
    DriverCommand::ALL
        .into_iter()
        .filter(|command| command.is_enabled(capabilities))
        .collect()
}

/// Builds the `clap` command tree for the given published commands.
pub(crate) fn command_line(commands: &[DriverCommand]) -> Command {
    commands.iter().fold(
        Command::new("flexvolume")
            .about("FlexVolume driver")
            .disable_help_subcommand(true)
            .subcommand_required(true),
        |root, command| root.subcommand(command.to_clap()),
    )
}

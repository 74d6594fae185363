//! Reference FlexVolume driver that echoes its inputs.
//!
//! The echo driver performs no I/O. Every operation succeeds and reflects
//! the arguments it received back into the response, which makes it useful
//! for exercising the calling convention end to end. Its advertised
//! capabilities come from `FLEXVOL_ECHO_ATTACH` and `FLEXVOL_ECHO_DETACH`
//! (both default to `true`).

use std::ffi::OsString;
use std::sync::Arc;

use flexvol_contract::{Capabilities, FlexVolumeDriver, Options, Response};
use ortho_config::{OrthoConfig, OrthoError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Option key read by [`EchoDriver::attach`].
pub const DEVICE_OPTION: &str = "device";

/// Option key read by [`EchoDriver::get_volume_name`].
pub const VOLUME_NAME_OPTION: &str = "volumeName";

/// Capability switches for the echo driver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "FLEXVOL_ECHO")]
pub struct EchoConfig {
    /// Advertise the attach capability.
    pub attach: Option<bool>,
    /// Advertise the detach capability.
    pub detach: Option<bool>,
}

impl EchoConfig {
    /// Capabilities selected by this configuration.
    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        Capabilities::new(self.attach.unwrap_or(true), self.detach.unwrap_or(true))
    }
}

/// Errors raised while preparing the echo driver.
#[derive(Debug, Clone, Error)]
pub enum EchoError {
    /// The capability switches could not be read.
    #[error("failed to load echo driver configuration: {0}")]
    Config(Arc<OrthoError>),
}

/// Loads [`EchoConfig`] from the environment.
///
/// # Errors
///
/// Returns [`EchoError::Config`] when a switch is malformed.
pub fn load_config(program: impl Into<OsString>) -> Result<EchoConfig, EchoError> {
    EchoConfig::load_from_iter([program.into()]).map_err(EchoError::Config)
}

/// Driver whose operations report back what they were given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EchoDriver {
    capabilities: Capabilities,
}

impl EchoDriver {
    /// Creates a driver advertising `capabilities`.
    #[must_use]
    pub const fn new(capabilities: Capabilities) -> Self {
        Self { capabilities }
    }

    /// Creates a driver from loaded configuration.
    #[must_use]
    pub fn from_config(config: &EchoConfig) -> Self {
        Self::new(config.capabilities())
    }
}

impl Default for EchoDriver {
    fn default() -> Self {
        Self::new(Capabilities::all())
    }
}

impl FlexVolumeDriver for EchoDriver {
    fn init(&self) -> Response {
        Response::success()
    }

    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn attach(&self, options: &Options) -> Response {
        let device = options.get(DEVICE_OPTION).map(String::as_str).unwrap_or_default();
        Response::success().with_device(device)
    }

    fn wait_for_attach(&self, device_path_hint: &str, _options: &Options) -> Response {
        Response::success().with_device(device_path_hint)
    }

    fn is_attached(&self, _options: &Options, _node: &str) -> Response {
        Response::success().with_attached(true)
    }

    fn detach(&self, _volume: &str, _node: &str) -> Response {
        Response::success()
    }

    fn mount_device(&self, _mount_dir: &str, device: &str, _options: &Options) -> Response {
        Response::success().with_device(device)
    }

    fn unmount_device(&self, _mount_dir: &str) -> Response {
        Response::success()
    }

    fn mount(&self, _target_dir: &str, source: &str, _options: &Options) -> Response {
        Response::success().with_device(source)
    }

    fn unmount(&self, _target_dir: &str) -> Response {
        Response::success()
    }

    fn get_volume_name(&self, options: &Options) -> Response {
        match options.get(VOLUME_NAME_OPTION) {
            Some(name) => Response::success().with_volume_name(name),
            None => Response::failure(format!("missing {VOLUME_NAME_OPTION} option")),
        }
    }
}

//! Driver contract for FlexVolume storage plugins.
//!
//! A FlexVolume driver is an executable the orchestrator invokes once per
//! lifecycle step (`init`, `attach`, `mount`, ...). Every invocation ends with
//! a single JSON [`Response`] envelope whose [`Status`] tells the caller
//! whether the step succeeded, failed, or is not supported by the driver.
//!
//! This crate holds the types shared by a concrete driver and the command
//! dispatcher in `flexvol-cli`:
//!
//! - [`FlexVolumeDriver`] is the operation set a driver implements.
//! - [`Response`] is the uniform result envelope.
//! - [`Capabilities`] declares which optional operations are published.
//!
//! # Example
//!
//! ```
//! use flexvol_contract::{Capabilities, FlexVolumeDriver, Options, Response};
//!
//! struct Loopback;
//!
//! impl FlexVolumeDriver for Loopback {
//!     fn init(&self) -> Response {
//!         Response::success()
//!     }
//!
//!     fn capabilities(&self) -> Capabilities {
//!         Capabilities::none()
//!     }
//!
//!     fn mount(&self, _target_dir: &str, source: &str, _options: &Options) -> Response {
//!         Response::success().with_device(source)
//!     }
//!
//!     fn unmount(&self, _target_dir: &str) -> Response {
//!         Response::success()
//!     }
//! }
//!
//! let response = Loopback.mount("/mnt/target", "/dev/sdb1", &Options::new());
//! assert!(response.status().is_success());
//! assert_eq!(response.device(), Some("/dev/sdb1"));
//! ```

pub mod capabilities;
pub mod driver;
pub mod response;

pub use self::capabilities::Capabilities;
pub use self::driver::{FlexVolumeDriver, Options};
pub use self::response::{InitResponse, Response, Status};

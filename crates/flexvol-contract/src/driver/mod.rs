//! The operation set a FlexVolume driver implements.
//!
//! [`FlexVolumeDriver`] covers the extended lifecycle: driver setup, the
//! attach/detach pair, device-level mounting, and the volume-level mount the
//! orchestrator performs for each pod. The older six-operation contract is
//! the same trait with the default bodies left in place.
//!
//! No operation returns `Result`. The driver decides what counts as failure
//! and reports it through [`Response::failure`] or
//! [`Response::not_supported`]; the dispatcher only looks at the status.


use std::collections::BTreeMap;

use crate::{Capabilities, Response};

/// Backend-specific parameters decoded from an options blob.
///
/// The orchestrator passes a JSON object whose values are all strings, for
/// example `{"kubernetes.io/fsType":"ext4","volumeID":"vol-1"}`.
pub type Options = BTreeMap<String, String>;

/// A storage driver plugged into the FlexVolume calling convention.
///
/// `init`, `capabilities`, `mount` and `unmount` are required. Every other
/// operation answers [`Status::NotSupported`](crate::Status::NotSupported)
/// unless the driver overrides it. `attach` and `detach` are additionally
/// gated by [`Capabilities`]: when the flag is off the command is never
/// published, so the method is never reached.
pub trait FlexVolumeDriver {
    /// Performs driver self-checks and setup.
    fn init(&self) -> Response;

    /// Declares which optional operations the driver supports.
    fn capabilities(&self) -> Capabilities;

    /// Attaches the volume described by `options` to the node.
    fn attach(&self, _options: &Options) -> Response {
        Response::not_supported("attach is not supported by this driver")
    }

    /// Waits until the attached device shows up and reports its path.
    ///
    /// Any polling happens inside the driver; the dispatcher calls this once.
    fn wait_for_attach(&self, _device_path_hint: &str, _options: &Options) -> Response {
        Response::not_supported("waitforattach is not supported by this driver")
    }

    /// Reports whether the volume described by `options` is attached to `node`.
    fn is_attached(&self, _options: &Options, _node: &str) -> Response {
        Response::not_supported("isattached is not supported by this driver")
    }

    /// Detaches the volume identified by `volume` from `node`.
    fn detach(&self, _volume: &str, _node: &str) -> Response {
        Response::not_supported("detach is not supported by this driver")
    }

    /// Mounts a raw device at a global mount directory.
    fn mount_device(&self, _mount_dir: &str, _device: &str, _options: &Options) -> Response {
        Response::not_supported("mountdevice is not supported by this driver")
    }

    /// Unmounts the device mounted at `mount_dir`.
    fn unmount_device(&self, _mount_dir: &str) -> Response {
        Response::not_supported("unmountdevice is not supported by this driver")
    }

    /// Mounts the volume at `target_dir`, reporting the device on success.
    fn mount(&self, target_dir: &str, source: &str, options: &Options) -> Response;

    /// Unmounts the volume mounted at `target_dir`.
    fn unmount(&self, target_dir: &str) -> Response;

    /// Resolves the unique name of the volume described by `options`.
    fn get_volume_name(&self, _options: &Options) -> Response {
        Response::not_supported("getvolumename is not supported by this driver")
    }
}

//! Shared test doubles for dispatcher tests.

use std::cell::RefCell;

use flexvol_contract::{Capabilities, FlexVolumeDriver, Options, Response, Status};
use mockall::mock;

use crate::{DispatchOutcome, Dispatcher};

mock! {
    pub Driver {}
    impl FlexVolumeDriver for Driver {
        fn init(&self) -> Response;
        fn capabilities(&self) -> Capabilities;
        fn attach(&self, options: &Options) -> Response;
        fn wait_for_attach(&self, device_path_hint: &str, options: &Options) -> Response;
        fn is_attached(&self, options: &Options, node: &str) -> Response;
        fn detach(&self, volume: &str, node: &str) -> Response;
        fn mount_device(&self, mount_dir: &str, device: &str, options: &Options) -> Response;
        fn unmount_device(&self, mount_dir: &str) -> Response;
        fn mount(&self, target_dir: &str, source: &str, options: &Options) -> Response;
        fn unmount(&self, target_dir: &str) -> Response;
        fn get_volume_name(&self, options: &Options) -> Response;
    }
}

/// Mock driver that only answers the capability query.
pub(super) fn mock_driver(capabilities: Capabilities) -> MockDriver {
    let mut driver = MockDriver::new();
    driver
        .expect_capabilities()
        .times(1)
        .return_const(capabilities);
    driver
}

/// Runs `command_args` through a dispatcher as if invoked from a shell.
pub(super) fn run_command<D: FlexVolumeDriver + ?Sized>(
    driver: &D,
    command_args: &[&str],
) -> DispatchOutcome {
    let argv = std::iter::once("flexvolume").chain(command_args.iter().copied());
    Dispatcher::new(driver).run(argv)
}

/// Decodes the outcome payload as a response envelope.
pub(super) fn envelope(outcome: &DispatchOutcome) -> Response {
    serde_json::from_str(outcome.payload()).expect("payload should be a response envelope")
}

/// A driver invocation captured by [`RecordingDriver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Call {
    pub(super) operation: &'static str,
    pub(super) arguments: Vec<String>,
    pub(super) options: Option<Options>,
}

/// Hand-written driver that records calls and answers a fixed status.
pub(super) struct RecordingDriver {
    capabilities: Capabilities,
    status: Status,
    calls: RefCell<Vec<Call>>,
}

impl RecordingDriver {
    pub(super) const fn new(capabilities: Capabilities, status: Status) -> Self {
        Self {
            capabilities,
            status,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub(super) fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn record(
        &self,
        operation: &'static str,
        arguments: &[&str],
        options: Option<&Options>,
    ) -> Response {
        self.calls.borrow_mut().push(Call {
            operation,
            arguments: arguments.iter().map(|argument| (*argument).to_owned()).collect(),
            options: options.cloned(),
        });
        Response::new(self.status, format!("{operation} answered {}", self.status))
    }
}

impl FlexVolumeDriver for RecordingDriver {
    fn init(&self) -> Response {
        self.record("init", &[], None)
    }

    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn attach(&self, options: &Options) -> Response {
        self.record("attach", &[], Some(options))
    }

    fn wait_for_attach(&self, device_path_hint: &str, options: &Options) -> Response {
        self.record("wait_for_attach", &[device_path_hint], Some(options))
            .with_device(device_path_hint)
    }

    fn is_attached(&self, options: &Options, node: &str) -> Response {
        self.record("is_attached", &[node], Some(options))
            .with_attached(true)
    }

    fn detach(&self, volume: &str, node: &str) -> Response {
        self.record("detach", &[volume, node], None)
    }

    fn mount_device(&self, mount_dir: &str, device: &str, options: &Options) -> Response {
        self.record("mount_device", &[mount_dir, device], Some(options))
    }

    fn unmount_device(&self, mount_dir: &str) -> Response {
        self.record("unmount_device", &[mount_dir], None)
    }

    fn mount(&self, target_dir: &str, source: &str, options: &Options) -> Response {
        self.record("mount", &[target_dir, source], Some(options))
            .with_device(source)
    }

    fn unmount(&self, target_dir: &str) -> Response {
        self.record("unmount", &[target_dir], None)
    }

    fn get_volume_name(&self, options: &Options) -> Response {
        self.record("get_volume_name", &[], Some(options))
    }
}

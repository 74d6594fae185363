//! Optional operation flags advertised by a driver.

use serde::{Deserialize, Serialize};

/// Declares which optional operations a driver supports.
///
/// The dispatcher queries the flags once, before building its command set:
/// `attach` and `detach` are only published when the matching flag is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// Whether the driver implements `attach`.
    #[serde(default)]
    pub attach: bool,
    /// Whether the driver implements `detach`.
    #[serde(default)]
    pub detach: bool,
}

impl Capabilities {
    /// Creates a capability set from explicit flags.
    #[must_use]
    pub const fn new(attach: bool, detach: bool) -> Self {
        Self { attach, detach }
    }

    /// Capability set with every optional operation enabled.
    #[must_use]
    pub const fn all() -> Self {
        Self::new(true, true)
    }

    /// Capability set with every optional operation disabled.
    #[must_use]
    pub const fn none() -> Self {
        Self::new(false, false)
    }

    /// Returns true when no optional operation is enabled.
    ///
    /// An empty capability set is left out of the `init` output entirely.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !self.attach && !self.detach
    }
}

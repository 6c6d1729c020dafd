//! Optional one-time initialization capability.

use crate::error::ListError;

/// Capability for plugin instances that need a one-time setup step.
///
/// Lists and providers advertise it through their `as_initializable`
/// method. The registry calls [`Initializable::initialize`] once, right after
/// the instance has been constructed and wired, before anyone else uses it.
pub trait Initializable: Send + Sync {
    /// Run the one-time initialization.
    fn initialize(&self) -> Result<(), ListError>;
}

//! The seam between the controller and whoever manages the service.
//!
//! The controller never talks to a platform API directly; it is handed a
//! [`ControlDispatcher`] at construction. The Unix implementation lives in
//! [`crate::console`], the Windows SCM one in `crate::scm`, and tests plug
//! in recording fakes.

use std::sync::Arc;

use crate::control::ControlRequest;
use crate::errors::HearthError;
use crate::state::StatusReport;

/// Invoked on the dispatcher's own thread for every incoming control
/// request; the returned status is relayed verbatim where the platform has
/// a channel for it.
pub type ControlHandler = Arc<dyn Fn(ControlRequest) -> u32 + Send + Sync>;

pub trait ControlDispatcher: Send + Sync {
    /// Install the asynchronous control channel for the named service.
    /// Called once, from the entry sequence, before any work runs.
    fn engage(&self, identity: &str, handler: ControlHandler) -> Result<(), HearthError>;

    /// Relay a state transition outward. Implementations without a manager
    /// on the other end may treat this as a no-op.
    fn report(&self, report: &StatusReport) -> Result<(), HearthError>;
}

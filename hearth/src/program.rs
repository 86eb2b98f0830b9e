//! The extension point callers implement.
//!
//! Implement [`ServiceProgram`] for your service and hand it to a
//! [`crate::controller::ServiceController`]. Every method has a default
//! body, so a program only supplies the handlers it cares about. A typical
//! `run` does its own setup, calls [`run_until_quit`] for the default wait,
//! then tears down:
//!
//! ```ignore
//! impl ServiceProgram for MyProgram {
//!     fn run(&self, service: &ServiceController) -> u32 {
//!         // own initialization; anything past ~30s belongs on a worker
//!         // thread so the pending state gets reported promptly
//!         let code = run_until_quit(service);
//!         // own teardown, same 30s caveat
//!         code
//!     }
//! }
//! ```

use crate::control::NO_ERROR;
use crate::controller::ServiceController;
use crate::state::ServiceState;

/// Default work body: report running, then park until the stop path fires.
///
/// Overriding programs call this between their setup and teardown to keep
/// the standard wait behavior.
pub fn run_until_quit(service: &ServiceController) -> u32 {
    service.set_state(ServiceState::Running);
    service.quit().wait();
    0
}

/// The standard stop path: report stop-pending, then release the work body.
///
/// An overridden `on_stop` must end up here (or do the equivalent) or the
/// work body never terminates.
pub fn request_stop(service: &ServiceController) {
    service.set_state(ServiceState::StopPending);
    service.quit().signal();
}

/// Lifecycle callbacks, one per control kind, invoked on the dispatcher's
/// thread. The `u32`-returning ones may fail; their status is relayed to
/// the dispatcher verbatim. The rest are fire-and-forget and must not
/// panic.
pub trait ServiceProgram: Send + Sync {
    /// The long-running work, executed between start-pending and stopped.
    fn run(&self, service: &ServiceController) -> u32 {
        run_until_quit(service)
    }

    fn on_stop(&self, service: &ServiceController) {
        request_stop(service);
    }

    fn on_pause(&self, _service: &ServiceController) {}

    fn on_continue(&self, _service: &ServiceController) {}

    fn on_interrogate(&self, _service: &ServiceController) {}

    fn on_pre_shutdown(&self, _service: &ServiceController) -> u32 {
        NO_ERROR
    }

    fn on_shutdown(&self, _service: &ServiceController) {}

    fn on_device_event(&self, _service: &ServiceController, _event: u32) -> u32 {
        NO_ERROR
    }

    fn on_hardware_profile_change(&self, _service: &ServiceController, _event: u32) -> u32 {
        NO_ERROR
    }

    fn on_session_change(&self, _service: &ServiceController, _event: u32, _session: u32) -> u32 {
        NO_ERROR
    }

    fn on_power_event(&self, _service: &ServiceController, _event: u32) -> u32 {
        NO_ERROR
    }

    fn on_unknown_request(&self, _service: &ServiceController, _code: u32) {}
}

/// A program that does nothing beyond the default lifecycle; useful as a
/// baseline and in tests.
pub struct IdleProgram;

impl ServiceProgram for IdleProgram {}

//! Signal-driven control delivery for Unix.
//!
//! In debug mode this is the console emulation of a service manager: an
//! interrupt from the terminal takes the same path through the controller
//! as a Stop request from a real dispatcher would. In service mode under an
//! init system the same watcher is the control channel, since init speaks
//! to daemons through signals anyway.

use std::thread;

use signal_hook::consts::signal::{SIGINT, SIGQUIT, SIGTERM};
use signal_hook::iterator::Signals;

use crate::dispatcher::{ControlDispatcher, ControlHandler};
use crate::control::ControlRequest;
use crate::errors::HearthError;
use crate::state::StatusReport;

pub struct SignalDispatcher;

impl SignalDispatcher {
    pub fn new() -> SignalDispatcher {
        SignalDispatcher
    }
}

impl Default for SignalDispatcher {
    fn default() -> SignalDispatcher {
        SignalDispatcher::new()
    }
}

impl ControlDispatcher for SignalDispatcher {
    fn engage(&self, identity: &str, handler: ControlHandler) -> Result<(), HearthError> {
        let mut signals = Signals::new([SIGINT, SIGQUIT, SIGTERM])
            .map_err(|e| HearthError::Dispatcher(format!("failed to register signals: {e}")))?;

        thread::Builder::new()
            .name(format!("{identity}-signals"))
            .spawn(move || {
                for signal in signals.forever() {
                    match signal {
                        SIGINT | SIGQUIT | SIGTERM => {
                            handler(ControlRequest::Stop);
                        }
                        _ => {}
                    }
                }
            })
            .map_err(|e| HearthError::Dispatcher(format!("failed to spawn signal thread: {e}")))?;

        Ok(())
    }

    fn report(&self, _report: &StatusReport) -> Result<(), HearthError> {
        // Nobody is listening on the far side of a signal.
        Ok(())
    }
}

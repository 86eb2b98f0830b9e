//! The one synchronization point between the control-dispatch thread and
//! the work body.

use std::sync::{Condvar, Mutex};

/// A manually-resettable binary event.
///
/// The stop path sets it once per lifecycle; the work body blocks on
/// [`QuitSignal::wait`] with no timeout. Signaling an already-set event is
/// a no-op, which is what makes a repeated Stop request harmless.
pub struct QuitSignal {
    set: Mutex<bool>,
    cond: Condvar,
}

impl QuitSignal {
    pub fn new() -> QuitSignal {
        QuitSignal {
            set: Mutex::new(false),
            cond: Condvar::new(),
        }
    }

    pub fn signal(&self) {
        let mut set = self.set.lock().unwrap();
        if !*set {
            *set = true;
            self.cond.notify_all();
        }
    }

    /// Block the calling thread until the event is set.
    pub fn wait(&self) {
        let mut set = self.set.lock().unwrap();
        while !*set {
            set = self.cond.wait(set).unwrap();
        }
    }

    pub fn is_set(&self) -> bool {
        *self.set.lock().unwrap()
    }

    pub fn reset(&self) {
        *self.set.lock().unwrap() = false;
    }
}

impl Default for QuitSignal {
    fn default() -> QuitSignal {
        QuitSignal::new()
    }
}

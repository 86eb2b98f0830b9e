//! Control requests delivered by whichever dispatcher is active.

/// Success status relayed back to the dispatcher by failable callbacks.
pub const NO_ERROR: u32 = 0;

/// The closed set of control kinds the state machine understands.
///
/// Event-carrying kinds keep their payload as raw platform words; this crate
/// never interprets them, it only hands them to the program's callbacks.
/// Anything outside the set arrives as `Other` and is routed to the
/// unknown-request callback, never treated as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlRequest {
    Stop,
    Pause,
    Continue,
    Interrogate,
    PreShutdown,
    Shutdown,
    DeviceEvent { event: u32 },
    HardwareProfileChange { event: u32 },
    SessionChange { event: u32, session: u32 },
    PowerEvent { event: u32 },
    Other(u32),
}

impl ControlRequest {
    pub fn describe(&self) -> &'static str {
        match self {
            ControlRequest::Stop => "stop",
            ControlRequest::Pause => "pause",
            ControlRequest::Continue => "continue",
            ControlRequest::Interrogate => "interrogate",
            ControlRequest::PreShutdown => "pre-shutdown",
            ControlRequest::Shutdown => "shutdown",
            ControlRequest::DeviceEvent { .. } => "device-event",
            ControlRequest::HardwareProfileChange { .. } => "hardware-profile-change",
            ControlRequest::SessionChange { .. } => "session-change",
            ControlRequest::PowerEvent { .. } => "power-event",
            ControlRequest::Other(_) => "unknown",
        }
    }
}

//! Windows Service Control Manager integration.
//!
//! The SCM owns two call shapes: the dispatcher entry ([`run`]), which hands
//! the calling thread over until the service stops, and the control handler
//! registered inside the entry sequence. The entry callback carries no
//! context parameter, so it routes through the per-process controller slot;
//! everything else threads explicit handles.

use std::ffi::OsString;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use windows_service::service::{
    ServiceControl, ServiceControlAccept, ServiceExitCode, ServiceState as ScmState,
    ServiceStatus, ServiceType,
};
use windows_service::service_control_handler::{
    self, ServiceControlHandlerResult, ServiceStatusHandle,
};
use windows_service::{define_windows_service, service_dispatcher};

use crate::control::{ControlRequest, NO_ERROR};
use crate::controller::ServiceController;
use crate::dispatcher::{ControlDispatcher, ControlHandler};
use crate::errors::HearthError;
use crate::state::{ControlSet, ServiceState, StatusReport};

define_windows_service!(ffi_service_main, scm_service_main);

fn scm_service_main(_arguments: Vec<OsString>) {
    if let Some(controller) = ServiceController::active() {
        controller.service_main();
    }
}

/// Hand the calling thread to the SCM dispatcher; blocks until the service
/// has stopped. A refusal carries the OS error code, which becomes the
/// process exit code.
pub fn run(controller: &Arc<ServiceController>) -> Result<(), HearthError> {
    service_dispatcher::start(controller.identity(), ffi_service_main).map_err(|e| match e {
        windows_service::Error::Winapi(io) => {
            HearthError::Registration(io.raw_os_error().unwrap_or(0) as u32)
        }
        other => HearthError::Dispatcher(other.to_string()),
    })
}

pub struct ScmDispatcher {
    handle: Mutex<Option<ServiceStatusHandle>>,
}

impl ScmDispatcher {
    pub fn new() -> ScmDispatcher {
        ScmDispatcher {
            handle: Mutex::new(None),
        }
    }
}

impl Default for ScmDispatcher {
    fn default() -> ScmDispatcher {
        ScmDispatcher::new()
    }
}

impl ControlDispatcher for ScmDispatcher {
    fn engage(&self, identity: &str, handler: ControlHandler) -> Result<(), HearthError> {
        let callback = move |control: ServiceControl| -> ServiceControlHandlerResult {
            let status = handler(map_control(control));
            if status == NO_ERROR {
                ServiceControlHandlerResult::NoError
            } else {
                ServiceControlHandlerResult::Other(status)
            }
        };

        let status_handle = service_control_handler::register(identity, callback)
            .map_err(|e| HearthError::Dispatcher(format!("handler registration failed: {e}")))?;
        *self.handle.lock().unwrap() = Some(status_handle);
        Ok(())
    }

    fn report(&self, report: &StatusReport) -> Result<(), HearthError> {
        let handle = self.handle.lock().unwrap();
        let handle = handle
            .as_ref()
            .ok_or_else(|| HearthError::Dispatcher("no status handle registered".to_string()))?;
        handle
            .set_service_status(scm_status(report))
            .map_err(|e| HearthError::Dispatcher(format!("status report failed: {e}")))
    }
}

// SERVICE_CONTROL_* codes for the kinds we relay as unknown requests.
const SC_PARAMCHANGE: u32 = 0x0006;
const SC_NETBINDADD: u32 = 0x0007;
const SC_NETBINDREMOVE: u32 = 0x0008;
const SC_NETBINDENABLE: u32 = 0x0009;
const SC_NETBINDDISABLE: u32 = 0x000A;
const SC_TIMECHANGE: u32 = 0x0010;
const SC_TRIGGEREVENT: u32 = 0x0020;

fn map_control(control: ServiceControl) -> ControlRequest {
    match control {
        ServiceControl::Stop => ControlRequest::Stop,
        ServiceControl::Pause => ControlRequest::Pause,
        ServiceControl::Continue => ControlRequest::Continue,
        ServiceControl::Interrogate => ControlRequest::Interrogate,
        ServiceControl::Preshutdown => ControlRequest::PreShutdown,
        ServiceControl::Shutdown => ControlRequest::Shutdown,
        ServiceControl::HardwareProfileChange(param) => ControlRequest::HardwareProfileChange {
            event: param.to_raw(),
        },
        ServiceControl::PowerEvent(param) => ControlRequest::PowerEvent {
            event: param.to_raw(),
        },
        ServiceControl::SessionChange(param) => ControlRequest::SessionChange {
            event: param.reason as u32,
            session: param.notification.session_id,
        },
        ServiceControl::ParamChange => ControlRequest::Other(SC_PARAMCHANGE),
        ServiceControl::NetBindAdd => ControlRequest::Other(SC_NETBINDADD),
        ServiceControl::NetBindRemove => ControlRequest::Other(SC_NETBINDREMOVE),
        ServiceControl::NetBindEnable => ControlRequest::Other(SC_NETBINDENABLE),
        ServiceControl::NetBindDisable => ControlRequest::Other(SC_NETBINDDISABLE),
        ServiceControl::TimeChange => ControlRequest::Other(SC_TIMECHANGE),
        ServiceControl::TriggerEvent => ControlRequest::Other(SC_TRIGGEREVENT),
        _ => ControlRequest::Other(0),
    }
}

fn scm_status(report: &StatusReport) -> ServiceStatus {
    let mut accepted = ServiceControlAccept::empty();
    if report.controls.accepts(ControlSet::STOP) {
        accepted |= ServiceControlAccept::STOP;
    }
    if report.controls.accepts(ControlSet::PAUSE_CONTINUE) {
        accepted |= ServiceControlAccept::PAUSE_CONTINUE;
    }
    if report.controls.accepts(ControlSet::SHUTDOWN) {
        accepted |= ServiceControlAccept::SHUTDOWN;
    }

    ServiceStatus {
        service_type: ServiceType::OWN_PROCESS,
        current_state: match report.state {
            ServiceState::Stopped => ScmState::Stopped,
            ServiceState::StartPending => ScmState::StartPending,
            ServiceState::Running => ScmState::Running,
            ServiceState::PausePending => ScmState::PausePending,
            ServiceState::Paused => ScmState::Paused,
            ServiceState::ContinuePending => ScmState::ContinuePending,
            ServiceState::StopPending => ScmState::StopPending,
        },
        controls_accepted: accepted,
        exit_code: ServiceExitCode::Win32(report.exit_code),
        checkpoint: report.checkpoint,
        wait_hint: Duration::default(),
        process_id: None,
    }
}

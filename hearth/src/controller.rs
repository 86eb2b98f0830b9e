//! The service controller: owns the authoritative lifecycle state, bridges
//! the control dispatcher to the program's callbacks, and runs the work
//! body between start-pending and stopped.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, OnceLock, Weak};

use ember::level::{LOG_DEBUG, LOG_ERROR, LOG_INFO, LOG_WARNING};
use ember::logger::Logger;
use ember::sink::{FileSink, LogSink, NullSink};
use ember::writer::LogWriter;

use crate::control::{ControlRequest, NO_ERROR};
use crate::dispatcher::{ControlDispatcher, ControlHandler};
use crate::errors::HearthError;
use crate::program::ServiceProgram;
use crate::quit::QuitSignal;
use crate::state::{ControlSet, ServiceState, StatusReport};

/// One controller per process: dispatcher callbacks that arrive without a
/// context parameter are routed through this slot. It is reclaimable once
/// the previous controller is gone.
fn active_slot() -> &'static Mutex<Weak<ServiceController>> {
    static ACTIVE: OnceLock<Mutex<Weak<ServiceController>>> = OnceLock::new();
    ACTIVE.get_or_init(|| Mutex::new(Weak::new()))
}

fn lock_slot() -> std::sync::MutexGuard<'static, Weak<ServiceController>> {
    match active_slot().lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

pub(crate) fn is_debug_flag(arg: &str) -> bool {
    let rest = arg
        .strip_prefix('/')
        .or_else(|| arg.strip_prefix('-'));
    matches!(rest, Some(flag) if flag.eq_ignore_ascii_case("debug"))
}

pub(crate) fn default_log_path(identity: &str) -> PathBuf {
    std::env::temp_dir().join(format!("{identity}.log"))
}

#[cfg(unix)]
fn default_dispatcher() -> Box<dyn ControlDispatcher> {
    Box::new(crate::console::SignalDispatcher::new())
}

#[cfg(windows)]
fn default_dispatcher() -> Box<dyn ControlDispatcher> {
    Box::new(crate::scm::ScmDispatcher::new())
}

/// Service mode entry. On Unix the init system that launched us is the
/// de-facto dispatcher: the entry sequence runs on this thread and control
/// arrives over signals.
#[cfg(unix)]
fn run_platform_service(controller: &Arc<ServiceController>) -> Result<(), HearthError> {
    Arc::clone(controller).service_main();
    Ok(())
}

/// Service mode entry. Hands the thread to the SCM dispatcher, which calls
/// the entry sequence back on a thread of its own.
#[cfg(windows)]
fn run_platform_service(controller: &Arc<ServiceController>) -> Result<(), HearthError> {
    crate::scm::run(controller)
}

struct StatusInner {
    state: ServiceState,
    controls: ControlSet,
    exit_code: u32,
    checkpoint: u32,
}

pub struct ServiceController {
    identity: String,
    log_path: PathBuf,
    debug_mode: AtomicBool,
    status: Mutex<StatusInner>,
    quit: QuitSignal,
    logger: Arc<Logger>,
    log: LogWriter,
    dispatcher: Box<dyn ControlDispatcher>,
    program: Box<dyn ServiceProgram>,
}

/// Assembles a [`ServiceController`]. Everything beyond the identity has a
/// default: log file at `<temp>/<identity>.log` with rollover, log level
/// from the build profile, the platform dispatcher.
pub struct ServiceBuilder {
    identity: String,
    log_path: Option<PathBuf>,
    log_level: Option<i32>,
    roll: bool,
    sink: Option<Box<dyn LogSink>>,
    dispatcher: Option<Box<dyn ControlDispatcher>>,
}

impl ServiceBuilder {
    pub fn new(identity: &str) -> ServiceBuilder {
        ServiceBuilder {
            identity: identity.to_string(),
            log_path: None,
            log_level: None,
            roll: true,
            sink: None,
            dispatcher: None,
        }
    }

    pub fn log_path(mut self, path: impl Into<PathBuf>) -> ServiceBuilder {
        self.log_path = Some(path.into());
        self
    }

    pub fn log_level(mut self, level: i32) -> ServiceBuilder {
        self.log_level = Some(level);
        self
    }

    /// Keep appending to an existing log instead of rolling it over.
    pub fn keep_existing_log(mut self) -> ServiceBuilder {
        self.roll = false;
        self
    }

    /// Route diagnostics into the given sink instead of the log file.
    pub fn log_sink(mut self, sink: Box<dyn LogSink>) -> ServiceBuilder {
        self.sink = Some(sink);
        self
    }

    pub fn dispatcher(mut self, dispatcher: Box<dyn ControlDispatcher>) -> ServiceBuilder {
        self.dispatcher = Some(dispatcher);
        self
    }

    pub fn build(
        self,
        program: Box<dyn ServiceProgram>,
    ) -> Result<Arc<ServiceController>, HearthError> {
        let log_path = self
            .log_path
            .unwrap_or_else(|| default_log_path(&self.identity));

        let mut slot = lock_slot();
        if slot.upgrade().is_some() {
            return Err(HearthError::AlreadyClaimed);
        }

        let sink: Box<dyn LogSink> = match self.sink {
            Some(sink) => sink,
            // An unopenable log file mutes diagnostics; it must not keep
            // the service from starting.
            None => match FileSink::open(&log_path, self.roll) {
                Ok(sink) => Box::new(sink),
                Err(_) => Box::new(NullSink),
            },
        };

        let logger = Arc::new(Logger::new(sink));
        if let Some(level) = self.log_level {
            logger.set_level(level);
        }
        let log = LogWriter::new("service", Arc::clone(&logger));

        let controller = Arc::new(ServiceController {
            identity: self.identity,
            log_path,
            debug_mode: AtomicBool::new(false),
            status: Mutex::new(StatusInner {
                state: ServiceState::Stopped,
                controls: ControlSet::empty(),
                exit_code: 0,
                checkpoint: 0,
            }),
            quit: QuitSignal::new(),
            logger,
            log,
            dispatcher: self.dispatcher.unwrap_or_else(default_dispatcher),
            program,
        });

        *slot = Arc::downgrade(&controller);
        Ok(controller)
    }
}

impl ServiceController {
    pub fn new(
        identity: &str,
        program: Box<dyn ServiceProgram>,
    ) -> Result<Arc<ServiceController>, HearthError> {
        ServiceBuilder::new(identity).build(program)
    }

    /// The controller currently holding the per-process slot, if any.
    pub fn active() -> Option<Arc<ServiceController>> {
        lock_slot().upgrade()
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    pub fn is_debug_mode(&self) -> bool {
        self.debug_mode.load(Ordering::SeqCst)
    }

    pub fn state(&self) -> ServiceState {
        self.status.lock().unwrap().state
    }

    pub fn controls_accepted(&self) -> ControlSet {
        self.status.lock().unwrap().controls
    }

    pub fn exit_code(&self) -> u32 {
        self.status.lock().unwrap().exit_code
    }

    pub fn quit(&self) -> &QuitSignal {
        &self.quit
    }

    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }

    /// The controller's own log writer, tagged `service`. Programs wanting
    /// their own tag make a [`LogWriter`] from [`ServiceController::logger`].
    pub fn log(&self) -> &LogWriter {
        &self.log
    }

    /// Run the service to completion and return the process exit code.
    ///
    /// A case-insensitive `/debug` or `-debug` among the launch arguments
    /// selects console mode: the entry sequence runs right here, with
    /// terminal interrupts standing in for dispatcher Stop requests.
    /// Otherwise the platform dispatcher is engaged; if it cannot be, the
    /// platform error code is the return value. Never panics across this
    /// boundary.
    pub fn start(self: Arc<Self>) -> u32 {
        let args: Vec<String> = std::env::args().collect();
        self.start_with_args(&args)
    }

    pub fn start_with_args(self: Arc<Self>, args: &[String]) -> u32 {
        let debug = args.iter().any(|arg| is_debug_flag(arg));
        self.debug_mode.store(debug, Ordering::SeqCst);
        self.log.write(
            LOG_INFO,
            &format!(
                "starting '{}' in {} mode",
                self.identity,
                if debug { "console" } else { "service" }
            ),
        );

        if debug {
            Arc::clone(&self).service_main();
        } else if let Err(e) = run_platform_service(&self) {
            self.log
                .write(LOG_ERROR, &format!("service dispatcher unavailable: {e}"));
            let code = match e {
                HearthError::Registration(code) => code,
                _ => 1,
            };
            self.set_exit_code(code);
        }

        self.exit_code()
    }

    /// The entry sequence. In service mode the dispatcher invokes this on a
    /// thread it owns; in console mode [`ServiceController::start_with_args`]
    /// calls it directly.
    pub(crate) fn service_main(self: Arc<Self>) {
        {
            let mut status = self.status.lock().unwrap();
            status.state = ServiceState::StartPending;
            status.controls = ControlSet::empty();
        }

        let handler: ControlHandler = {
            let controller = Arc::clone(&self);
            Arc::new(move |request| controller.handle_control(request))
        };
        if let Err(e) = self.dispatcher.engage(&self.identity, handler) {
            // No control channel exists yet, so there is nobody to escalate
            // to; log it and abort the start.
            self.log
                .write(LOG_ERROR, &format!("control handler registration failed: {e}"));
            return;
        }
        if self.is_debug_mode() {
            println!("Press Ctrl+C or Ctrl+Break to quit...");
        }
        self.set_state(ServiceState::StartPending);

        {
            let mut status = self.status.lock().unwrap();
            status.exit_code = 0;
            status.checkpoint = 0;
        }

        // When the work body returns, the service has stopped.
        let code = self.program.run(&self);
        self.set_exit_code(code);
        self.set_state(ServiceState::Stopped);
    }

    /// Map one control request to its lifecycle callback. Runs on the
    /// dispatcher's thread; the returned status goes back to the dispatcher
    /// verbatim for the kinds that carry one.
    pub fn handle_control(&self, request: ControlRequest) -> u32 {
        self.log
            .write(LOG_DEBUG, &format!("control request: {}", request.describe()));

        match request {
            ControlRequest::Stop => {
                self.program.on_stop(self);
                NO_ERROR
            }
            ControlRequest::Pause => {
                self.program.on_pause(self);
                NO_ERROR
            }
            ControlRequest::Continue => {
                self.program.on_continue(self);
                NO_ERROR
            }
            ControlRequest::Interrogate => {
                self.program.on_interrogate(self);
                NO_ERROR
            }
            ControlRequest::PreShutdown => self.program.on_pre_shutdown(self),
            ControlRequest::Shutdown => {
                self.program.on_shutdown(self);
                NO_ERROR
            }
            ControlRequest::DeviceEvent { event } => self.program.on_device_event(self, event),
            ControlRequest::HardwareProfileChange { event } => {
                self.program.on_hardware_profile_change(self, event)
            }
            ControlRequest::SessionChange { event, session } => {
                self.program.on_session_change(self, event, session)
            }
            ControlRequest::PowerEvent { event } => self.program.on_power_event(self, event),
            ControlRequest::Other(code) => {
                self.program.on_unknown_request(self, code);
                NO_ERROR
            }
        }
    }

    /// The single mutation point for the service state. Recomputes the
    /// accepted-controls set and, in service mode, reports the transition
    /// to the dispatcher. In console mode there is no dispatcher channel,
    /// so the report is skipped.
    pub fn set_state(&self, state: ServiceState) {
        let report = {
            let mut status = self.status.lock().unwrap();
            status.state = state;
            status.controls = match state {
                ServiceState::StartPending => ControlSet::empty(),
                _ => {
                    let mut controls = status.controls;
                    controls.accept(ControlSet::STOP);
                    controls
                }
            };
            status.checkpoint = if state.is_pending() {
                status.checkpoint + 1
            } else {
                0
            };
            StatusReport {
                state,
                controls: status.controls,
                exit_code: status.exit_code,
                checkpoint: status.checkpoint,
            }
        };

        self.log
            .write(LOG_INFO, &format!("state -> {}", state.as_str()));

        if !self.is_debug_mode() {
            if let Err(e) = self.dispatcher.report(&report) {
                self.log
                    .write(LOG_WARNING, &format!("status report failed: {e}"));
            }
        }
    }

    fn set_exit_code(&self, code: u32) {
        self.status.lock().unwrap().exit_code = code;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::{IdleProgram, request_stop, run_until_quit};
    use std::sync::MutexGuard;
    use std::sync::atomic::AtomicU32;
    use std::thread;
    use std::time::{Duration, Instant};

    /// Controller tests share the per-process slot, so they run one at a
    /// time behind this gate.
    static TEST_GATE: Mutex<()> = Mutex::new(());

    fn gate() -> MutexGuard<'static, ()> {
        let guard = match TEST_GATE.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        // Engaging the fake dispatcher parks a control handler that holds an
        // Arc back to the controller (the controller owns the dispatcher),
        // so a controller that has run once never drops and the per-process
        // slot stays claimed. Reset the slot on entry so each serialized
        // test starts from an unclaimed slot.
        *lock_slot() = Weak::new();
        guard
    }

    #[derive(Clone)]
    struct FakeDispatcher {
        handler: Arc<Mutex<Option<ControlHandler>>>,
        reports: Arc<Mutex<Vec<StatusReport>>>,
        refuse_engage: bool,
    }

    impl FakeDispatcher {
        fn new() -> FakeDispatcher {
            FakeDispatcher {
                handler: Arc::new(Mutex::new(None)),
                reports: Arc::new(Mutex::new(Vec::new())),
                refuse_engage: false,
            }
        }

        fn deliver(&self, request: ControlRequest) -> u32 {
            let handler = self.handler.lock().unwrap().clone().expect("not engaged");
            handler(request)
        }

        fn reported(&self) -> Vec<StatusReport> {
            self.reports.lock().unwrap().clone()
        }
    }

    impl ControlDispatcher for FakeDispatcher {
        fn engage(&self, _identity: &str, handler: ControlHandler) -> Result<(), HearthError> {
            if self.refuse_engage {
                return Err(HearthError::Dispatcher("refused".to_string()));
            }
            *self.handler.lock().unwrap() = Some(handler);
            Ok(())
        }

        fn report(&self, report: &StatusReport) -> Result<(), HearthError> {
            self.reports.lock().unwrap().push(report.clone());
            Ok(())
        }
    }

    fn build(identity: &str, program: Box<dyn ServiceProgram>) -> (Arc<ServiceController>, FakeDispatcher) {
        let fake = FakeDispatcher::new();
        let controller = ServiceBuilder::new(identity)
            .log_sink(Box::new(NullSink))
            .dispatcher(Box::new(fake.clone()))
            .build(program)
            .unwrap();
        (controller, fake)
    }

    fn wait_for(what: &str, mut cond: impl FnMut() -> bool) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !cond() {
            assert!(Instant::now() < deadline, "timed out waiting for {what}");
            thread::sleep(Duration::from_millis(5));
        }
    }

    fn service_args() -> Vec<String> {
        vec!["svc".to_string()]
    }

    fn debug_args() -> Vec<String> {
        vec!["svc".to_string(), "-debug".to_string()]
    }

    #[test]
    fn debug_flag_spellings() {
        for arg in ["/debug", "-debug", "/DEBUG", "-DeBuG"] {
            assert!(is_debug_flag(arg), "{arg} should select console mode");
        }
        for arg in ["--debug", "debug", "-debugger", "-", "/", ""] {
            assert!(!is_debug_flag(arg), "{arg} should not select console mode");
        }
    }

    #[test]
    fn default_log_path_lands_in_temp() {
        let path = default_log_path("demo");
        assert_eq!(path.file_name().unwrap(), "demo.log");
        assert_eq!(path.parent().unwrap(), std::env::temp_dir());
    }

    #[test]
    fn second_live_controller_is_refused() {
        let _gate = gate();
        let (first, _) = build("one", Box::new(IdleProgram));

        let err = ServiceBuilder::new("two")
            .log_sink(Box::new(NullSink))
            .build(Box::new(IdleProgram))
            .err()
            .expect("slot should be taken");
        assert!(matches!(err, HearthError::AlreadyClaimed));

        drop(first);
        let again = ServiceBuilder::new("three")
            .log_sink(Box::new(NullSink))
            .build(Box::new(IdleProgram));
        assert!(again.is_ok());
    }

    #[test]
    fn service_mode_reports_the_full_lifecycle() {
        let _gate = gate();
        let (controller, fake) = build("svc", Box::new(IdleProgram));

        let runner = {
            let controller = Arc::clone(&controller);
            thread::spawn(move || controller.start_with_args(&service_args()))
        };

        wait_for("running state", || controller.state() == ServiceState::Running);
        assert_eq!(fake.deliver(ControlRequest::Stop), NO_ERROR);
        assert_eq!(runner.join().unwrap(), 0);
        assert_eq!(controller.state(), ServiceState::Stopped);

        let reports = fake.reported();
        let states: Vec<ServiceState> = reports.iter().map(|r| r.state).collect();
        assert_eq!(
            states,
            vec![
                ServiceState::StartPending,
                ServiceState::Running,
                ServiceState::StopPending,
                ServiceState::Stopped,
            ]
        );

        // Start-pending accepts nothing; every later state accepts Stop.
        assert!(reports[0].controls.is_empty());
        for report in &reports[1..] {
            assert!(report.controls.accepts(ControlSet::STOP));
        }

        // Checkpoint ticks during pending phases, rests at zero otherwise.
        assert_eq!(reports[0].checkpoint, 1);
        assert_eq!(reports[1].checkpoint, 0);
        assert_eq!(reports[2].checkpoint, 1);
        assert_eq!(reports[3].checkpoint, 0);
    }

    #[test]
    fn repeated_stop_is_idempotent() {
        let _gate = gate();
        let (controller, fake) = build("svc", Box::new(IdleProgram));

        let runner = {
            let controller = Arc::clone(&controller);
            thread::spawn(move || controller.start_with_args(&service_args()))
        };

        wait_for("running state", || controller.state() == ServiceState::Running);
        assert_eq!(fake.deliver(ControlRequest::Stop), NO_ERROR);
        assert_eq!(fake.deliver(ControlRequest::Stop), NO_ERROR);

        assert_eq!(runner.join().unwrap(), 0);
        assert_eq!(controller.state(), ServiceState::Stopped);
        assert!(controller.quit().is_set());
    }

    #[test]
    fn console_mode_interrupt_matches_service_stop() {
        let _gate = gate();
        let (controller, fake) = build("demo", Box::new(IdleProgram));

        let runner = {
            let controller = Arc::clone(&controller);
            thread::spawn(move || controller.start_with_args(&debug_args()))
        };

        wait_for("running state", || controller.state() == ServiceState::Running);
        assert!(controller.is_debug_mode());

        // What the signal watcher does when the operator hits Ctrl+C: the
        // same Stop routing a service-mode dispatcher would use.
        assert_eq!(fake.deliver(ControlRequest::Stop), NO_ERROR);

        assert_eq!(runner.join().unwrap(), 0);
        assert_eq!(controller.state(), ServiceState::Stopped);

        // No dispatcher channel in console mode, so nothing was reported.
        assert!(fake.reported().is_empty());
    }

    #[test]
    fn engage_failure_aborts_before_any_work() {
        let _gate = gate();

        struct MustNotRun;
        impl ServiceProgram for MustNotRun {
            fn run(&self, _service: &ServiceController) -> u32 {
                panic!("work body ran despite failed registration");
            }
        }

        let mut fake = FakeDispatcher::new();
        fake.refuse_engage = true;
        let controller = ServiceBuilder::new("svc")
            .log_sink(Box::new(NullSink))
            .dispatcher(Box::new(fake.clone()))
            .build(Box::new(MustNotRun))
            .unwrap();

        let code = Arc::clone(&controller).start_with_args(&service_args());
        assert_eq!(code, 0);
        assert_eq!(controller.state(), ServiceState::StartPending);
        assert!(fake.reported().is_empty());
    }

    #[test]
    fn every_control_kind_reaches_its_callback() {
        let _gate = gate();

        #[derive(Default)]
        struct Tally {
            pause: AtomicU32,
            cont: AtomicU32,
            interrogate: AtomicU32,
            shutdown: AtomicU32,
            unknown: AtomicU32,
        }

        impl ServiceProgram for Tally {
            fn on_pause(&self, _s: &ServiceController) {
                self.pause.fetch_add(1, Ordering::SeqCst);
            }
            fn on_continue(&self, _s: &ServiceController) {
                self.cont.fetch_add(1, Ordering::SeqCst);
            }
            fn on_interrogate(&self, _s: &ServiceController) {
                self.interrogate.fetch_add(1, Ordering::SeqCst);
            }
            fn on_shutdown(&self, _s: &ServiceController) {
                self.shutdown.fetch_add(1, Ordering::SeqCst);
            }
            fn on_pre_shutdown(&self, _s: &ServiceController) -> u32 {
                3
            }
            fn on_device_event(&self, _s: &ServiceController, event: u32) -> u32 {
                event
            }
            fn on_hardware_profile_change(&self, _s: &ServiceController, _e: u32) -> u32 {
                5
            }
            fn on_session_change(&self, _s: &ServiceController, event: u32, session: u32) -> u32 {
                event + session
            }
            fn on_power_event(&self, _s: &ServiceController, _e: u32) -> u32 {
                9
            }
            fn on_unknown_request(&self, _s: &ServiceController, _code: u32) {
                self.unknown.fetch_add(1, Ordering::SeqCst);
            }
        }

        let tally = Arc::new(Tally::default());

        struct Proxy(Arc<Tally>);
        impl ServiceProgram for Proxy {
            fn on_pause(&self, s: &ServiceController) {
                self.0.on_pause(s)
            }
            fn on_continue(&self, s: &ServiceController) {
                self.0.on_continue(s)
            }
            fn on_interrogate(&self, s: &ServiceController) {
                self.0.on_interrogate(s)
            }
            fn on_shutdown(&self, s: &ServiceController) {
                self.0.on_shutdown(s)
            }
            fn on_pre_shutdown(&self, s: &ServiceController) -> u32 {
                self.0.on_pre_shutdown(s)
            }
            fn on_device_event(&self, s: &ServiceController, e: u32) -> u32 {
                self.0.on_device_event(s, e)
            }
            fn on_hardware_profile_change(&self, s: &ServiceController, e: u32) -> u32 {
                self.0.on_hardware_profile_change(s, e)
            }
            fn on_session_change(&self, s: &ServiceController, e: u32, id: u32) -> u32 {
                self.0.on_session_change(s, e, id)
            }
            fn on_power_event(&self, s: &ServiceController, e: u32) -> u32 {
                self.0.on_power_event(s, e)
            }
            fn on_unknown_request(&self, s: &ServiceController, c: u32) {
                self.0.on_unknown_request(s, c)
            }
        }

        let (controller, _fake) = build("svc", Box::new(Proxy(Arc::clone(&tally))));

        assert_eq!(controller.handle_control(ControlRequest::Pause), NO_ERROR);
        assert_eq!(controller.handle_control(ControlRequest::Continue), NO_ERROR);
        assert_eq!(controller.handle_control(ControlRequest::Interrogate), NO_ERROR);
        assert_eq!(controller.handle_control(ControlRequest::Shutdown), NO_ERROR);
        assert_eq!(controller.handle_control(ControlRequest::PreShutdown), 3);
        assert_eq!(
            controller.handle_control(ControlRequest::DeviceEvent { event: 7 }),
            7
        );
        assert_eq!(
            controller.handle_control(ControlRequest::HardwareProfileChange { event: 1 }),
            5
        );
        assert_eq!(
            controller.handle_control(ControlRequest::SessionChange { event: 2, session: 40 }),
            42
        );
        assert_eq!(
            controller.handle_control(ControlRequest::PowerEvent { event: 1 }),
            9
        );
        assert_eq!(controller.handle_control(ControlRequest::Other(999)), NO_ERROR);

        assert_eq!(tally.pause.load(Ordering::SeqCst), 1);
        assert_eq!(tally.cont.load(Ordering::SeqCst), 1);
        assert_eq!(tally.interrogate.load(Ordering::SeqCst), 1);
        assert_eq!(tally.shutdown.load(Ordering::SeqCst), 1);
        assert_eq!(tally.unknown.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn pausing_program_keeps_the_stop_contract() {
        let _gate = gate();

        struct Pausable;
        impl ServiceProgram for Pausable {
            fn run(&self, service: &ServiceController) -> u32 {
                // Setup would go here.
                run_until_quit(service)
            }
            fn on_pause(&self, service: &ServiceController) {
                service.set_state(ServiceState::PausePending);
                service.set_state(ServiceState::Paused);
            }
            fn on_continue(&self, service: &ServiceController) {
                service.set_state(ServiceState::ContinuePending);
                service.set_state(ServiceState::Running);
            }
            fn on_stop(&self, service: &ServiceController) {
                request_stop(service);
            }
        }

        let (controller, fake) = build("svc", Box::new(Pausable));

        let runner = {
            let controller = Arc::clone(&controller);
            thread::spawn(move || controller.start_with_args(&service_args()))
        };

        wait_for("running state", || controller.state() == ServiceState::Running);
        fake.deliver(ControlRequest::Pause);
        assert_eq!(controller.state(), ServiceState::Paused);
        assert!(controller.controls_accepted().accepts(ControlSet::STOP));

        fake.deliver(ControlRequest::Continue);
        assert_eq!(controller.state(), ServiceState::Running);

        fake.deliver(ControlRequest::Stop);
        assert_eq!(runner.join().unwrap(), 0);
        assert_eq!(controller.state(), ServiceState::Stopped);
    }
}

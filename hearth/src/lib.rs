//! Hearth wraps a long-running program's init/control/exit sequences so the
//! same binary can run under an operating-system service manager or as an
//! ordinary foreground process for debugging.
//!
//! Implement [`program::ServiceProgram`] with your work body, build a
//! [`controller::ServiceController`] around it, and call `start()` from
//! `main`. With `/debug` or `-debug` among the launch arguments the service
//! runs in the console, with terminal interrupts taking the exact path a
//! dispatcher Stop request would; without it, the platform's service
//! machinery is engaged. Diagnostics go to a rotating UTF-16 log file via
//! the `ember` crate.
//!
//! ```ignore
//! struct MyService;
//!
//! impl ServiceProgram for MyService {
//!     fn run(&self, service: &ServiceController) -> u32 {
//!         // initialization, then the default wait:
//!         let code = run_until_quit(service);
//!         // teardown
//!         code
//!     }
//! }
//!
//! fn main() {
//!     let controller = ServiceController::new("myservice", Box::new(MyService)).unwrap();
//!     std::process::exit(controller.start() as i32);
//! }
//! ```

#[cfg(unix)]
pub mod console;
pub mod control;
pub mod controller;
pub mod dispatcher;
pub mod errors;
pub mod program;
pub mod quit;
#[cfg(windows)]
pub mod scm;
pub mod state;

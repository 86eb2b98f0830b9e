//! Demo service: a heartbeat worker under lifecycle control.
//!
//! Run `hearthd -debug` in a terminal and watch `<temp>/hearthd.log`;
//! Ctrl+C stops it the same way a service manager would. Installed as a
//! real service, the unmodified binary runs under the manager instead.

use std::process;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use ember::level::LOG_INFO;
use ember::writer::LogWriter;
use hearth::controller::{ServiceBuilder, ServiceController};
use hearth::program::{ServiceProgram, run_until_quit};
use hearth::state::ServiceState;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const BEAT_INTERVAL: Duration = Duration::from_secs(2);

struct Heartbeat {
    paused: Arc<AtomicBool>,
}

impl Heartbeat {
    fn new() -> Heartbeat {
        Heartbeat {
            paused: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl ServiceProgram for Heartbeat {
    fn run(&self, service: &ServiceController) -> u32 {
        let beat = LogWriter::new("heartbeat", Arc::clone(service.logger()));
        let paused = Arc::clone(&self.paused);
        let halt = Arc::new(AtomicBool::new(false));

        let worker = {
            let halt = Arc::clone(&halt);
            thread::spawn(move || {
                let mut ticks = 0u64;
                while !halt.load(Ordering::SeqCst) {
                    if !paused.load(Ordering::SeqCst) {
                        ticks += 1;
                        beat.write(LOG_INFO, &format!("tick {ticks}"));
                    }
                    thread::sleep(BEAT_INTERVAL);
                }
                beat.write(LOG_INFO, &format!("worker done after {ticks} ticks"));
            })
        };

        let code = run_until_quit(service);

        halt.store(true, Ordering::SeqCst);
        let _ = worker.join();
        code
    }

    fn on_pause(&self, service: &ServiceController) {
        service.set_state(ServiceState::PausePending);
        self.paused.store(true, Ordering::SeqCst);
        service.set_state(ServiceState::Paused);
    }

    fn on_continue(&self, service: &ServiceController) {
        service.set_state(ServiceState::ContinuePending);
        self.paused.store(false, Ordering::SeqCst);
        service.set_state(ServiceState::Running);
    }
}

fn main() {
    let controller = match ServiceBuilder::new("hearthd").build(Box::new(Heartbeat::new())) {
        Ok(controller) => controller,
        Err(e) => {
            eprintln!("hearthd: {e}");
            process::exit(1);
        }
    };

    println!("Hearthd v{VERSION} - Keeping the Fire Lit");
    println!("log file: {}", controller.log_path().display());

    let code = controller.start();
    process::exit(code as i32);
}

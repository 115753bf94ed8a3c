//! DualShock monitor - prints controller changes as `name value` lines
//!
//! Acts as the host for the `dualshock-hid` controller object: it owns the
//! timer, drives polling, and forwards every control change to stdout.
//!
//! ## Command line flags
//!
//! - `--list`: List attached HID devices and exit
//!
//! Device selection and poll interval come from the config file
//! (see `dualshock_hid::default_config_path`).

use std::io::Write;
use std::time::Instant;

use dualshock_hid::{
    default_config_path, load_config, ControlEvent, DualShock, HidApiBackend, SessionState,
};

/// Event channel capacity; a full drain of a 64-report queue fits easily
const EVENT_CAPACITY: usize = 4096;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let list_only = args.iter().any(|arg| arg == "--list");

    // Initialize logger - set RUST_LOG=debug for per-event output
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let config = load_config(&default_config_path());
    let backend = HidApiBackend::new()?;
    let (event_tx, event_rx) = flume::bounded::<ControlEvent>(EVENT_CAPACITY);
    let mut controller = DualShock::with_interval(backend, event_tx, config.poll_interval());

    if list_only {
        controller.list_devices();
        return Ok(());
    }

    controller.initialize(config.device_override());
    if controller.state() == SessionState::Closed {
        anyhow::bail!("No controller opened (see device list above)");
    }
    log::info!(
        "dualshock-monitor: reading '{}'",
        controller.device_name().unwrap_or("controller")
    );

    if config.start_polling {
        controller.start_polling();
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    loop {
        if controller.state() == SessionState::Polling {
            controller.poll(Instant::now());
        } else {
            controller.read_once();
        }

        for event in event_rx.drain() {
            writeln!(out, "{}", event)?;
        }
        out.flush()?;

        let wait = controller
            .time_until_next_poll(Instant::now())
            .unwrap_or_else(|| config.poll_interval());
        std::thread::sleep(wait);
    }
}

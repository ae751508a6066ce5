//! Debug log for the terminal app.
//!
//! The TUI owns stdout, so diagnostics go to an append-only file in the
//! working directory. Lines are tagged with the thread name so AI worker
//! entries can be told apart from UI ones.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::sync::Mutex;

pub const LOG_FILE: &str = "pdf_study_debug.log";

lazy_static::lazy_static! {
    static ref LOGGER: Mutex<Option<File>> = Mutex::new(None);
}

/// Open the log file. Later calls keep the first handle.
pub fn init() {
    let Ok(mut logger) = LOGGER.lock() else {
        return;
    };
    if logger.is_none()
        && let Ok(file) = OpenOptions::new().create(true).append(true).open(LOG_FILE)
    {
        *logger = Some(file);
    }
}

pub fn log(message: &str) {
    let Ok(mut logger) = LOGGER.lock() else {
        return;
    };
    if let Some(file) = logger.as_mut() {
        let _ = write_line(file, message);
    }
}

fn write_line(out: &mut impl Write, message: &str) -> io::Result<()> {
    let thread = std::thread::current();
    writeln!(
        out,
        "[{}] [{}] {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        thread.name().unwrap_or("unnamed"),
        message
    )
}

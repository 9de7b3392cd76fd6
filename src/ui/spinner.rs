//! Terminal spinner for the in-flight request.

use std::io::{self, IsTerminal, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

const FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
const TICK: Duration = Duration::from_millis(80);

/// Animated busy indicator drawn on stderr.
///
/// Falls back to a single static line when stderr is not a terminal
/// (redirected output, CI logs).
pub struct Spinner {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Spinner {
    pub fn start(label: &str) -> Self {
        let running = Arc::new(AtomicBool::new(true));

        if !io::stderr().is_terminal() {
            eprintln!("{label}");
            return Spinner {
                running,
                handle: None,
            };
        }

        let flag = Arc::clone(&running);
        let label = label.to_string();
        let handle = thread::spawn(move || {
            let mut frame = 0usize;
            while flag.load(Ordering::Relaxed) {
                eprint!("\r{} {}", FRAMES[frame % FRAMES.len()], label);
                let _ = io::stderr().flush();
                frame += 1;
                thread::sleep(TICK);
            }
            // Clear the spinner line before handing the terminal back
            eprint!("\r{}\r", " ".repeat(label.chars().count() + 2));
            let _ = io::stderr().flush();
        });

        Spinner {
            running,
            handle: Some(handle),
        }
    }

    /// Stop and clear the spinner. Safe to call more than once.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_is_idempotent() {
        let mut spinner = Spinner::start("working");
        spinner.stop();
        spinner.stop();
    }
}

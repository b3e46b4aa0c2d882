//! Quit keys and a pacer that watches for them.
//!
//! The autoplay loop takes no input. The only key that matters is the one
//! that stops it, and it is noticed while the loop is holding a frame.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::engine::Pacer;

/// q, Q, Esc or Ctrl-C.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
    ) || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Spends each hold polling the terminal for a quit key.
///
/// Once a quit key is seen the remaining holds return immediately so the
/// current step finishes fast; the caller checks [`KeyPacer::quit_requested`]
/// between steps.
#[derive(Debug, Default)]
pub struct KeyPacer {
    quit: bool,
    error: Option<io::Error>,
}

impl KeyPacer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// First terminal read error, if any. Polling stops after one.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    fn poll_until(&mut self, deadline: Instant) -> io::Result<()> {
        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                return Ok(());
            }
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && should_quit(key) {
                    self.quit = true;
                    return Ok(());
                }
            }
            if Instant::now() >= deadline {
                return Ok(());
            }
        }
    }
}

impl Pacer for KeyPacer {
    fn hold(&mut self, duration: Duration) {
        if self.quit {
            return;
        }
        let deadline = Instant::now() + duration;
        if self.error.is_some() {
            std::thread::sleep(duration);
            return;
        }
        if let Err(err) = self.poll_until(deadline) {
            self.error = Some(err);
            std::thread::sleep(deadline.saturating_duration_since(Instant::now()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Char('Q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Left)));
    }

    #[test]
    fn holds_are_skipped_after_quit() {
        let mut pacer = KeyPacer {
            quit: true,
            error: None,
        };
        let start = Instant::now();
        pacer.hold(Duration::from_secs(5));
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}

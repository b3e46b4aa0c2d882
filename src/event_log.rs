//! JSON-lines log of controller lifecycle events.
//!
//! One object per line: the event fields plus `t_ms`, milliseconds since
//! the log was opened.
//!
//! ```text
//! {"t_ms":0,"event":"spawned","piece":1,"kind":"t","target_rotation":2,"target_x":3,"target_y":14,"score":-123.0}
//! {"t_ms":380,"event":"locked","piece":1,"kind":"t","rotation":2,"x":3,"y":14,"lines":0}
//! ```

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::engine::AutoplayEvent;

#[derive(Serialize)]
struct LogLine<'a> {
    t_ms: u64,
    #[serde(flatten)]
    event: &'a AutoplayEvent,
}

pub struct EventLog<W: Write = BufWriter<File>> {
    out: Option<W>,
    started: Instant,
    buf: Vec<u8>,
}

impl EventLog {
    /// Append to `path`, creating it if needed. `None` disables logging.
    pub fn open(path: Option<&str>) -> Result<Self> {
        let out = match path {
            Some(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .with_context(|| format!("open event log {}", path))?;
                Some(BufWriter::new(file))
            }
            None => None,
        };
        Ok(Self::with_output(out))
    }
}

impl<W: Write> EventLog<W> {
    pub fn to_writer(out: W) -> Self {
        Self::with_output(Some(out))
    }

    fn with_output(out: Option<W>) -> Self {
        Self {
            out,
            started: Instant::now(),
            buf: Vec::with_capacity(256),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.out.is_some()
    }

    pub fn record(&mut self, events: &[AutoplayEvent]) -> Result<()> {
        let Some(out) = self.out.as_mut() else {
            return Ok(());
        };
        let t_ms = self.started.elapsed().as_millis() as u64;
        for event in events {
            self.buf.clear();
            serde_json::to_writer(&mut self.buf, &LogLine { t_ms, event })?;
            self.buf.push(b'\n');
            out.write_all(&self.buf)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        if let Some(out) = self.out.as_mut() {
            out.flush()?;
        }
        Ok(())
    }

    /// Flush after a run ends. An error from the run itself wins over a
    /// flush error.
    pub fn finish(&mut self, outcome: Result<()>) -> Result<()> {
        let flushed = self.flush();
        outcome?;
        flushed
    }

    pub fn into_inner(self) -> Option<W> {
        self.out
    }
}

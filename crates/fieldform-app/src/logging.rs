/*
[INPUT]:  Log level string and desired output target
[OUTPUT]: Installed tracing subscriber plus the TUI log ring buffer
[POS]:    Logging layer - shared by every front-end
[UPDATE]: When adding log targets or changing log formatting
[UPDATE]: 2026-09-02 Add daily-rolling directory target
[UPDATE]: 2026-10-18 Drain buffered lines under a single lock per write
*/

use std::collections::VecDeque;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result, anyhow};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

pub const LOG_BUFFER_CAPACITY: usize = 2000;
const LOG_FILE_PREFIX: &str = "fieldform.log";

pub type LogBufferHandle = Arc<Mutex<LogBuffer>>;

/// Bounded ring of formatted log lines
#[derive(Debug, Default)]
pub struct LogBuffer {
    lines: VecDeque<String>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            capacity,
        }
    }

    pub fn handle(capacity: usize) -> LogBufferHandle {
        Arc::new(Mutex::new(Self::new(capacity)))
    }

    pub fn push_line(&mut self, line: String) {
        if self.capacity == 0 {
            return;
        }
        if self.lines.len() >= self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }
}

#[derive(Clone)]
pub struct LogWriterFactory {
    buffer: LogBufferHandle,
}

impl LogWriterFactory {
    pub fn new(buffer: LogBufferHandle) -> Self {
        Self { buffer }
    }
}

pub struct LogWriter {
    buffer: LogBufferHandle,
    partial: String,
}

impl LogWriter {
    /// Push every complete line under one lock, keep the unterminated tail
    fn drain_complete_lines(&mut self) {
        let Some(end) = self.partial.rfind('\n') else {
            return;
        };
        let tail = self.partial.split_off(end + 1);
        let complete = std::mem::replace(&mut self.partial, tail);
        if let Ok(mut guard) = self.buffer.lock() {
            for line in complete.lines() {
                guard.push_line(line.to_string());
            }
        }
    }
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.partial.push_str(&String::from_utf8_lossy(buf));
        self.drain_complete_lines();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.drain_complete_lines();
        if self.partial.is_empty() {
            return Ok(());
        }
        let line = std::mem::take(&mut self.partial);
        if let Ok(mut guard) = self.buffer.lock() {
            guard.push_line(line.trim_end_matches('\r').to_string());
        }
        Ok(())
    }
}

impl Drop for LogWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

impl<'a> MakeWriter<'a> for LogWriterFactory {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogWriter {
            buffer: self.buffer.clone(),
            partial: String::new(),
        }
    }
}

/// Where formatted events go
pub enum LogTarget {
    Stderr,
    /// In-memory ring shown by the TUI
    Buffer(LogBufferHandle),
    /// Daily-rolling files in a directory
    Directory(PathBuf),
}

/// Install the global subscriber.
///
/// The returned guard must be held for the life of the process when logging
/// to files, otherwise buffered lines are lost.
pub fn init_tracing(log_level: &str, target: LogTarget) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let guard = match target {
        LogTarget::Stderr => {
            builder
                .with_writer(io::stderr)
                .try_init()
                .map_err(|err| anyhow!(err))
                .context("initialize tracing subscriber")?;
            None
        }
        LogTarget::Buffer(buffer) => {
            builder
                .with_ansi(false)
                .with_writer(LogWriterFactory::new(buffer))
                .try_init()
                .map_err(|err| anyhow!(err))
                .context("initialize tracing subscriber")?;
            None
        }
        LogTarget::Directory(dir) => {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            builder
                .with_ansi(false)
                .with_writer(writer)
                .try_init()
                .map_err(|err| anyhow!(err))
                .context("initialize tracing subscriber")?;
            Some(guard)
        }
    };
    Ok(guard)
}

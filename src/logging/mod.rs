//! Logging and output control
//!
//! This module provides the [`Logger`] used by the client and the CLI. It
//! supports quiet and verbose modes; request-level tracing (method, URL,
//! status, latency) is only printed in verbose mode.
//!
//! Everything the logger prints goes to stderr. Stdout carries command
//! results only.

use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone, Default)]
enum Sink {
    #[default]
    Stderr,
    Capture(Arc<Mutex<Vec<String>>>),
}

/// Logger responsible for all diagnostic output
#[derive(Debug, Clone)]
pub struct Logger {
    pub verbose: bool,
    pub quiet: bool,
    sink: Sink,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Logger {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            quiet: false,
            sink: Sink::Stderr,
        }
    }

    pub fn new_quiet() -> Self {
        Self {
            verbose: false,
            quiet: true,
            sink: Sink::Stderr,
        }
    }

    /// Keep lines in memory instead of writing them to stderr
    pub fn capturing(mut self) -> Self {
        self.sink = Sink::Capture(Arc::default());
        self
    }

    /// Lines kept by a [`Logger::capturing`] logger, shared across its clones
    pub fn captured(&self) -> Vec<String> {
        match &self.sink {
            Sink::Capture(lines) => lines.lock().map(|lines| lines.clone()).unwrap_or_default(),
            Sink::Stderr => Vec::new(),
        }
    }

    fn emit(&self, line: String) {
        match &self.sink {
            Sink::Stderr => eprintln!("{}", line),
            Sink::Capture(lines) => {
                if let Ok(mut lines) = lines.lock() {
                    lines.push(line);
                }
            }
        }
    }

    pub fn debug(&self, message: &str) {
        if self.verbose && !self.quiet {
            self.emit(format!("🐛 DEBUG: {}", message));
        }
    }

    pub fn verbose(&self, message: &str) {
        if self.verbose && !self.quiet {
            self.emit(format!("📝 {}", message));
        }
    }

    /// Success message
    pub fn success(&self, message: &str) {
        if !self.quiet {
            self.emit(format!("✅ {}", message));
        }
    }

    /// Warning message
    pub fn warning(&self, message: &str) {
        if !self.quiet {
            self.emit(format!("⚠️  WARNING: {}", message));
        }
    }

    /// Error message, printed even in quiet mode
    pub fn error(&self, message: &str) {
        self.emit(format!("❌ ERROR: {}", message));
    }

    /// Detailed information (only shown in verbose mode)
    pub fn detail(&self, message: &str) {
        if self.verbose && !self.quiet {
            self.emit(format!("   {}", message));
        }
    }

    /// Outgoing request, before it is sent
    pub fn request(&self, method: &str, url: &str) {
        self.verbose(&format!("{} {}", method, url));
    }

    /// Response status and how long the round trip took
    pub fn response(&self, method: &str, url: &str, status: u16, elapsed: Duration) {
        self.detail(&format!(
            "{} {} -> {} in {}",
            method,
            url,
            status,
            self.format_latency(elapsed)
        ));
    }

    /// Format byte counts in human-readable units
    pub fn format_size(&self, bytes: u64) -> String {
        if bytes < 1024 {
            format!("{} B", bytes)
        } else if bytes < 1024 * 1024 {
            format!("{:.1} KB", bytes as f64 / 1024.0)
        } else if bytes < 1024 * 1024 * 1024 {
            format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
        } else {
            format!("{:.1} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
        }
    }

    /// Sub-second durations in milliseconds, longer ones in seconds
    pub fn format_latency(&self, duration: Duration) -> String {
        let millis = duration.as_millis();
        if millis < 1000 {
            format!("{}ms", millis)
        } else {
            format!("{:.2}s", duration.as_secs_f64())
        }
    }
}

use anyhow::Result;
use std::{fmt, fs::File, io::Write, path::Path};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Error,
    Warning,
    Info,
    Debug,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Severity::Error => "Error",
            Severity::Warning => "Warning",
            Severity::Info => "Info",
            Severity::Debug => "Debug",
        };
        write!(f, "{}", name)
    }
}

/// Receives human-readable messages from the converter.
///
/// Reporting never stops a batch on its own; fatal parse errors are returned
/// to the caller as errors as well.
pub trait DiagnosticSink {
    fn report(&mut self, severity: Severity, message: &str);
}

/// Forwards every diagnostic to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&mut self, severity: Severity, message: &str) {
        match severity {
            Severity::Error => log::error!("{}", message),
            Severity::Warning => log::warn!("{}", message),
            Severity::Info => log::info!("{}", message),
            Severity::Debug => log::debug!("{}", message),
        }
    }
}

/// Keeps every diagnostic it receives and passes it on to `inner`.
#[derive(Debug, Default)]
pub struct RecordingSink<S> {
    inner: S,
    entries: Vec<(Severity, String)>,
}

impl<S: DiagnosticSink> RecordingSink<S> {
    pub fn new(inner: S) -> Self {
        RecordingSink {
            inner,
            entries: Vec::new(),
        }
    }

    pub fn entries(&self) -> &[(Severity, String)] {
        &self.entries
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.entries.iter().filter(|(s, _)| *s == severity).count()
    }

    /// Writes the recorded diagnostics to `filename`, one per line.
    pub fn dump(&self, filename: &str) -> Result<()> {
        let mut file = File::create(Path::new(filename))?;
        for (severity, message) in &self.entries {
            writeln!(file, "[{}] {}", severity, message)?;
        }
        file.flush()?;
        Ok(())
    }
}

impl<S: DiagnosticSink> DiagnosticSink for RecordingSink<S> {
    fn report(&mut self, severity: Severity, message: &str) {
        self.inner.report(severity, message);
        self.entries.push((severity, message.to_string()));
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&mut self, _: Severity, _: &str) {}
}

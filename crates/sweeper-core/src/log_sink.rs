//! Bounded generation log.
//!
//! One CSV line per completed generation (`generation,mean,max,deaths`).
//! The record whose generation index reaches the cutoff is the last one
//! written; the sink then flushes, drops its writer and stays closed for
//! the rest of the run.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use sweeper_types::GenerationRecord;
use tracing::{info, warn};

/// Errors raised by the generation log.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// Opening, writing or flushing the sink failed.
    #[error("generation log I/O failed: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}

/// Append-only generation log with a cutoff.
///
/// Reaching the cutoff closes the sink: the writer is flushed and dropped,
/// so a file handle does not outlive the logged generations.
#[derive(Debug)]
pub struct GenerationLog<W: Write> {
    /// `None` once closed, either at the cutoff or by [`close`](Self::close).
    writer: Option<W>,
    /// Cleared at the cutoff or on close. Never set again.
    active: bool,
    /// Last generation index that is written.
    cutoff: u64,
    /// Lines written so far.
    written: u64,
}

impl GenerationLog<BufWriter<File>> {
    /// Create (or truncate) the log file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Io`] if the file cannot be created.
    pub fn create(path: &Path, cutoff: u64) -> Result<Self, LogError> {
        let file = File::create(path)?;
        info!(path = %path.display(), cutoff, "Generation log opened");
        Ok(Self::new(BufWriter::new(file), cutoff))
    }
}

impl<W: Write> GenerationLog<W> {
    /// Wrap an open writer.
    pub const fn new(writer: W, cutoff: u64) -> Self {
        Self {
            writer: Some(writer),
            active: true,
            cutoff,
            written: 0,
        }
    }

    /// A sink that is closed from the start and never writes.
    pub const fn disabled() -> Self {
        Self {
            writer: None,
            active: false,
            cutoff: 0,
            written: 0,
        }
    }

    /// Whether records are still being written.
    pub const fn is_active(&self) -> bool {
        self.active && self.writer.is_some()
    }

    /// Configured cutoff generation.
    pub const fn cutoff(&self) -> u64 {
        self.cutoff
    }

    /// Lines written so far.
    pub const fn lines_written(&self) -> u64 {
        self.written
    }

    /// Append `record` if the sink is still active.
    ///
    /// Returns whether the line was written. Writing the cutoff record, or
    /// being handed a record past the cutoff, closes the sink for good.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Io`] if writing or flushing fails. The sink stays
    /// active; the caller decides whether to close it.
    pub fn append(&mut self, record: &GenerationRecord) -> Result<bool, LogError> {
        if !self.active {
            return Ok(false);
        }
        if record.generation > self.cutoff {
            self.retire(record.generation);
            return Ok(false);
        }
        let Some(writer) = self.writer.as_mut() else {
            return Ok(false);
        };

        writeln!(writer, "{record}")?;
        writer.flush()?;
        self.written = self.written.saturating_add(1);

        if record.generation == self.cutoff {
            self.retire(record.generation);
        }
        Ok(true)
    }

    fn retire(&mut self, generation: u64) {
        self.active = false;
        let flushed = self.writer.take().map_or(Ok(()), |mut writer| writer.flush());
        if let Err(err) = flushed {
            warn!(generation, error = %err, "Generation log flush failed at cutoff");
        }
        info!(
            generation,
            cutoff = self.cutoff,
            lines = self.written,
            "Generation log cutoff reached, log closed"
        );
    }

    /// Flush and hand back the writer.
    ///
    /// The first call on an open sink returns the writer; later calls, and
    /// calls after the cutoff closed the sink, return `None`.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Io`] if the final flush fails. The sink is closed
    /// regardless.
    pub fn close(&mut self) -> Result<Option<W>, LogError> {
        self.active = false;
        let Some(mut writer) = self.writer.take() else {
            return Ok(None);
        };
        writer.flush()?;
        info!(lines = self.written, "Generation log closed");
        Ok(Some(writer))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    /// Writer whose bytes stay readable after the sink drops it.
    #[derive(Clone, Default)]
    struct Shared(Rc<RefCell<Vec<u8>>>);

    impl Shared {
        fn text(&self) -> String {
            String::from_utf8(self.0.borrow().clone()).unwrap()
        }

        fn handles(&self) -> usize {
            Rc::strong_count(&self.0)
        }
    }

    impl Write for Shared {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn record(generation: u64) -> GenerationRecord {
        GenerationRecord {
            generation,
            mean_fitness: 1.0,
            max_fitness: 1,
            deaths: 0,
        }
    }

    /// Writer that always fails.
    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("disk gone"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn writes_one_line_per_record() {
        let mut log = GenerationLog::new(Vec::new(), 100);
        assert!(log.append(&record(0)).unwrap());
        assert!(log.append(&record(1)).unwrap());
        let bytes = log.close().unwrap().unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "0,1.0,1,0\n1,1.0,1,0\n");
    }

    #[test]
    fn cutoff_record_is_last_written() {
        let buffer = Shared::default();
        let mut log = GenerationLog::new(buffer.clone(), 2);
        for generation in 0..2 {
            assert!(log.append(&record(generation)).unwrap());
        }
        assert_eq!(buffer.handles(), 2);

        assert!(log.append(&record(2)).unwrap());
        assert!(!log.is_active());
        assert!(!log.append(&record(3)).unwrap());
        assert_eq!(log.lines_written(), 3);
        assert_eq!(buffer.text().lines().count(), 3);
    }

    #[test]
    fn cutoff_drops_the_writer() {
        let buffer = Shared::default();
        let mut log = GenerationLog::new(buffer.clone(), 0);
        assert!(log.append(&record(0)).unwrap());

        assert_eq!(buffer.handles(), 1);
        assert!(log.close().unwrap().is_none());
        assert_eq!(buffer.text(), "0,1.0,1,0\n");
    }

    #[test]
    fn record_past_cutoff_closes_without_writing() {
        let buffer = Shared::default();
        let mut log = GenerationLog::new(buffer.clone(), 1);
        assert!(!log.append(&record(5)).unwrap());
        assert!(!log.is_active());
        assert_eq!(log.lines_written(), 0);
        assert_eq!(buffer.handles(), 1);
        assert!(buffer.text().is_empty());
    }

    #[test]
    fn close_is_idempotent() {
        let mut log = GenerationLog::new(Vec::new(), 10);
        assert!(log.close().unwrap().is_some());
        assert!(log.close().unwrap().is_none());
        assert!(!log.append(&record(0)).unwrap());
    }

    #[test]
    fn disabled_sink_never_writes() {
        let mut log = GenerationLog::<Vec<u8>>::disabled();
        assert!(!log.is_active());
        assert!(!log.append(&record(0)).unwrap());
    }

    #[test]
    fn write_failure_is_reported() {
        let mut log = GenerationLog::new(Broken, 10);
        assert!(matches!(log.append(&record(0)), Err(LogError::Io { .. })));
    }

    #[test]
    fn file_sink_truncates_and_writes() {
        let path = std::env::temp_dir().join(format!(
            "sweepers-log-{}.csv",
            std::process::id()
        ));
        std::fs::write(&path, "stale\n").unwrap();

        let mut log = GenerationLog::create(&path, 0).unwrap();
        assert!(log.append(&record(0)).unwrap());
        assert!(!log.is_active());
        assert!(log.close().unwrap().is_none());

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "0,1.0,1,0\n");
        std::fs::remove_file(&path).unwrap();
    }
}

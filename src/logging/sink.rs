//! Output sinks.

use std::io::{self, Write};
use std::sync::Mutex;

use crate::logging::encoder::Encode;
use crate::logging::level::Level;
use crate::logging::record::Record;

/// One log destination: a severity threshold, an encoder, and the
/// writer it owns exclusively.
///
/// Each sink filters independently; a record below this sink's
/// threshold is dropped here even if another sink accepts it.
pub struct Sink {
    threshold: Level,
    encoder: Box<dyn Encode>,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl Sink {
    pub fn new(threshold: Level, encoder: Box<dyn Encode>, writer: Box<dyn Write + Send>) -> Self {
        Self {
            threshold,
            encoder,
            writer: Mutex::new(writer),
        }
    }

    pub fn enabled(&self, level: Level) -> bool {
        level >= self.threshold
    }

    /// Encode and write one record. Records below the threshold are
    /// dropped without touching the writer.
    pub fn write(&self, record: &Record<'_>) -> io::Result<()> {
        if !self.enabled(record.level) {
            return Ok(());
        }
        let mut buf = Vec::with_capacity(256);
        self.encoder.encode(record, &mut buf)?;

        let mut writer = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        writer.write_all(&buf)
    }

    /// Flush buffered output through to the destination.
    pub fn flush(&self) -> io::Result<()> {
        let mut writer = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::logging::encoder::ConsoleEncoder;
    use crate::logging::record::Caller;

    /// Writer handing its bytes to a shared buffer for assertions.
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn record(level: Level) -> Record<'static> {
        Record {
            time: chrono::Local::now(),
            level,
            caller: Caller::from_location(std::panic::Location::caller()),
            message: "m",
            fields: &[],
            stacktrace: None,
        }
    }

    #[test]
    fn test_below_threshold_writes_nothing() {
        let buf = SharedBuf::default();
        let sink = Sink::new(
            Level::Warn,
            Box::new(ConsoleEncoder),
            Box::new(buf.clone()),
        );

        sink.write(&record(Level::Info)).unwrap();
        assert!(buf.0.lock().unwrap().is_empty());

        sink.write(&record(Level::Warn)).unwrap();
        assert!(!buf.0.lock().unwrap().is_empty());
    }

    #[test]
    fn test_enabled_respects_ordering() {
        let sink = Sink::new(
            Level::Error,
            Box::new(ConsoleEncoder),
            Box::new(io::sink()),
        );
        assert!(!sink.enabled(Level::Debug));
        assert!(!sink.enabled(Level::Warn));
        assert!(sink.enabled(Level::Error));
        assert!(sink.enabled(Level::Fatal));
    }
}

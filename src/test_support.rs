//! Helpers shared by in-crate tests.

use std::{
    io,
    sync::{Arc, Mutex},
};

use tracing::subscriber::DefaultGuard;

/// In-memory sink for formatted log lines.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    /// Install a thread-local fmt subscriber writing into a fresh capture.
    ///
    /// Everything logged on this thread until the guard drops lands in the
    /// capture. `#[tokio::test]` runs on a current-thread runtime, so
    /// `oneshot` calls made while the guard is held are covered.
    pub fn install() -> (Self, DefaultGuard) {
        let capture = Self::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .finish();
        let guard = tracing::subscriber::set_default(subscriber);
        (capture, guard)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    /// The first line containing `needle`, panicking with the full log otherwise.
    pub fn line_with(&self, needle: &str) -> String {
        let contents = self.contents();
        contents
            .lines()
            .find(|l| l.contains(needle))
            .map(str::to_owned)
            .unwrap_or_else(|| panic!("no log line containing {needle:?} in:\n{contents}"))
    }

    /// Byte offset of the first occurrence of `needle`.
    pub fn position(&self, needle: &str) -> usize {
        let contents = self.contents();
        contents
            .find(needle)
            .unwrap_or_else(|| panic!("{needle:?} never logged in:\n{contents}"))
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

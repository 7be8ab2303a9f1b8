use std::io::Write;

use tracing::{debug, warn};

/// Receives human readable progress and diagnostic messages. Messages may span several
/// lines. Reporting never influences the result of a transformation.
pub trait Sink {
    /// Receives one message.
    fn report(&mut self, message: &str);
}

/// Discards everything.
impl Sink for () {
    fn report(&mut self, _message: &str) {}
}

impl Sink for Vec<String> {
    fn report(&mut self, message: &str) {
        self.push(message.to_string());
    }
}

impl Sink for String {
    fn report(&mut self, message: &str) {
        self.push_str(message);
        self.push('\n');
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn report(&mut self, message: &str) {
        (**self).report(message)
    }
}

/// Forwards messages to a [`Write`]r, one message per line. Write failures are logged and
/// otherwise ignored, since the messages are purely informational.
#[derive(Debug)]
pub struct WriteSink<W: Write>(W);

impl<W: Write> WriteSink<W> {
    /// Wraps `write`.
    pub fn new(write: W) -> Self {
        Self(write)
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.0
    }
}

impl<W: Write> Sink for WriteSink<W> {
    fn report(&mut self, message: &str) {
        if let Err(e) = writeln!(self.0, "{message}") {
            warn!("could not write diagnostic message: {e}");
        }
    }
}

/// Emits every message as a `debug` level tracing event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl Sink for TracingSink {
    fn report(&mut self, message: &str) {
        debug!("{message}");
    }
}

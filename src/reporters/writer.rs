//! Text rendering into a [`fmt::Write`] sink.
//!
//! Each delivered report is rendered as
//!
//! ```text
//! <trace>: <topic>
//! <body>
//!
//! ```
//!
//! (the `: <topic>` part is left out when the topic is empty). The writer is
//! kept behind a lock, so a single [`WriterReporter`] can be shared between
//! groups and threads.

use alloc::string::String;
use core::fmt;

#[cfg(feature = "std")]
use std::sync as impl_;

#[cfg(not(feature = "std"))]
use spin as impl_;

use crate::{DeliveryError, Reporter, Trace};

/// A [`Reporter`] that renders reports as text into `W`.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use reportmux::{GroupOptions, Mux, reporters::writer::WriterReporter, trace};
///
/// let console = Arc::new(WriterReporter::new(String::new()));
///
/// let mut mux = Mux::new();
/// mux.new_group("ops", GroupOptions::new()).add("ops", console.clone());
/// mux.report("ops", &trace!("db"), "replica lag", "lag is 42s");
///
/// let output = console.with_writer(|out| out.clone()).unwrap();
/// assert_eq!(output, "/db: replica lag\nlag is 42s\n\n");
/// ```
pub struct WriterReporter<W> {
    writer: impl_::Mutex<W>,
}

impl<W> WriterReporter<W>
where
    W: fmt::Write + Send + 'static,
{
    /// Wraps `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer: impl_::Mutex::new(writer),
        }
    }

    /// Runs `f` with exclusive access to the writer.
    ///
    /// Returns `None` if the lock was poisoned by a panic in another thread.
    pub fn with_writer<T>(&self, f: impl FnOnce(&mut W) -> T) -> Option<T> {
        #[cfg(feature = "std")]
        let mut guard = self.writer.lock().ok()?;

        #[cfg(not(feature = "std"))]
        let mut guard = self.writer.lock();

        Some(f(&mut guard))
    }

    /// Consumes the reporter and returns the writer.
    pub fn into_inner(self) -> Option<W> {
        #[cfg(feature = "std")]
        return self.writer.into_inner().ok();

        #[cfg(not(feature = "std"))]
        return Some(self.writer.into_inner());
    }
}

impl<W> Reporter for WriterReporter<W>
where
    W: fmt::Write + Send + 'static,
{
    fn deliver(&self, trace: &Trace, topic: &str, body: &str) -> Result<(), DeliveryError> {
        self.with_writer(|out| render(out, trace, topic, body))
            .ok_or_else(|| DeliveryError::from(String::from("writer lock poisoned")))?
            .map_err(|_| DeliveryError::from(String::from("failed to write report")))
    }
}

impl<W> fmt::Debug for WriterReporter<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterReporter")
            .field("writer", &core::any::type_name::<W>())
            .finish()
    }
}

fn render(out: &mut impl fmt::Write, trace: &Trace, topic: &str, body: &str) -> fmt::Result {
    if topic.is_empty() {
        writeln!(out, "{trace}")?;
    } else {
        writeln!(out, "{trace}: {topic}")?;
    }
    writeln!(out, "{body}")?;
    writeln!(out)
}

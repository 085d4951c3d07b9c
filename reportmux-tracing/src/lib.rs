#![deny(
    missing_docs,
    unsafe_code,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]

//! [`tracing`] integration for reportmux.
//!
//! This crate connects a [`Mux`](reportmux::Mux) to your existing `tracing`
//! setup in both directions:
//!
//! - [`TracingLogger`] is an [`ErrorLogger`]: dispatch failures (a reporter
//!   that could not deliver, a report sent to an unknown group) become
//!   `ERROR` events.
//! - [`TracingReporter`] is a [`Reporter`]: every report delivered to it
//!   becomes an event at a configurable level. This is a convenient last
//!   resort channel at the end of a group, or a console channel during
//!   development.
//!
//! All events use the `reportmux` target, so they can be filtered with e.g.
//! `RUST_LOG=reportmux=warn`.
//!
//! # Quick Start
//!
//! ```
//! use reportmux::{Group, Mux, trace};
//! use reportmux_tracing::{TracingLogger, TracingReporter};
//!
//! let _ = tracing_subscriber::fmt().try_init();
//!
//! let mut mux = Mux::new().with_logger(TracingLogger);
//! mux.add_group(Group::new("ops").reporter(TracingReporter::warn()));
//! mux.validate().expect("report groups are misconfigured");
//!
//! mux.report("ops", &trace!("db", "replica"), "replica lag", "lag is 42s");
//! ```

use std::fmt;

use reportmux::{DeliveryError, ErrorLogger, Reporter, Trace};
use tracing::Level;

/// An [`ErrorLogger`] that emits an `ERROR` event per dispatch failure.
///
/// The failure is recorded in the `error` field and the registry's
/// description of what it was doing becomes the event message.
#[derive(Copy, Clone, Debug, Default)]
pub struct TracingLogger;

impl ErrorLogger for TracingLogger {
    fn log_error(&self, error: &(dyn std::error::Error + 'static), context: fmt::Arguments<'_>) {
        tracing::error!(target: "reportmux", error = %error, "{}", context);
    }
}

/// A [`Reporter`] that turns every report into a `tracing` event.
///
/// The trace and topic are recorded as fields and the body becomes the
/// message. Delivery always succeeds, even when no subscriber is listening.
///
/// # Examples
///
/// ```
/// use reportmux_tracing::TracingReporter;
/// use tracing::Level;
///
/// assert_eq!(TracingReporter::default().level(), Level::ERROR);
/// assert_eq!(TracingReporter::new(Level::INFO).level(), Level::INFO);
/// ```
#[derive(Copy, Clone, Debug)]
pub struct TracingReporter {
    level: Level,
}

impl Default for TracingReporter {
    fn default() -> Self {
        Self::error()
    }
}

impl TracingReporter {
    /// Creates a reporter that emits events at `level`.
    pub const fn new(level: Level) -> Self {
        Self { level }
    }

    /// Emits events at [`Level::ERROR`].
    pub const fn error() -> Self {
        Self::new(Level::ERROR)
    }

    /// Emits events at [`Level::WARN`].
    pub const fn warn() -> Self {
        Self::new(Level::WARN)
    }

    /// The level events are emitted at.
    pub const fn level(&self) -> Level {
        self.level
    }
}

impl Reporter for TracingReporter {
    fn deliver(&self, trace: &Trace, topic: &str, body: &str) -> Result<(), DeliveryError> {
        // The level of a `tracing` macro must be a constant.
        if self.level == Level::ERROR {
            tracing::error!(target: "reportmux", trace = %trace, topic = %topic, "{}", body);
        } else if self.level == Level::WARN {
            tracing::warn!(target: "reportmux", trace = %trace, topic = %topic, "{}", body);
        } else if self.level == Level::INFO {
            tracing::info!(target: "reportmux", trace = %trace, topic = %topic, "{}", body);
        } else if self.level == Level::DEBUG {
            tracing::debug!(target: "reportmux", trace = %trace, topic = %topic, "{}", body);
        } else {
            tracing::trace!(target: "reportmux", trace = %trace, topic = %topic, "{}", body);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io,
        sync::{Arc, Mutex},
    };

    use reportmux::{GroupOptions, Mux, reporter, trace};

    use super::*;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn output(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture(f: impl FnOnce()) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::TRACE)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        captured.output()
    }

    #[derive(Debug, thiserror::Error)]
    #[error("webhook returned 502")]
    struct BadGateway;

    #[test]
    fn test_logger_emits_reporter_failures() {
        let output = capture(|| {
            let mut mux = Mux::new().with_logger(TracingLogger);
            mux.new_group("ops", GroupOptions::new())
                .add("ops", reporter::from_fn(|_, _, _| Err(BadGateway.into())))
                .add("ops", reporter::from_fn(|_, _, _| Ok(())));
            mux.report("ops", &trace!("db"), "lag", "body");
        });

        assert!(output.contains("ERROR"));
        assert!(output.contains("reportmux"));
        assert!(output.contains("reporting to group 'ops' via reporter no. 0 failed"));
        assert!(output.contains("webhook returned 502"));
    }

    #[test]
    fn test_logger_emits_unknown_group() {
        let output = capture(|| {
            let mut mux = Mux::new().with_logger(TracingLogger);
            mux.new_group("ops", GroupOptions::new())
                .add("ops", reporter::from_fn(|_, _, _| Ok(())));
            mux.report("typo", &trace!(), "t", "b");
        });

        assert!(output.contains("invalid report"));
        assert!(output.contains("report group 'typo' doesn't exist"));
    }

    #[test]
    fn test_reporter_emits_report_at_level() {
        let output = capture(|| {
            TracingReporter::warn()
                .deliver(&trace!("billing", "invoices"), "render failed", "template missing")
                .unwrap();
        });

        assert!(output.contains("WARN"));
        assert!(output.contains("trace=/billing/invoices"));
        assert!(output.contains("topic=render failed"));
        assert!(output.contains("template missing"));
    }

    #[test]
    fn test_reporter_without_subscriber_succeeds() {
        assert!(
            TracingReporter::new(Level::DEBUG)
                .deliver(&trace!(), "", "")
                .is_ok()
        );
    }
}

//! Optional observability hook for dispatch failures.
//!
//! The registry never returns dispatch errors to its caller. Instead it hands
//! them to an [`ErrorLogger`], if one was configured with
//! [`Mux::with_logger`](crate::Mux::with_logger). Without a logger these
//! failures are silently dropped.

use alloc::{boxed::Box, sync::Arc};
use core::fmt;

/// Receives errors that happen while dispatching reports.
///
/// The logger is called for:
/// - every reporter that fails to deliver, with the group name and reporter
///   index in `context`;
/// - every dispatch to an unknown group, with an
///   [`UnknownGroupError`](crate::UnknownGroupError).
pub trait ErrorLogger: 'static + Send + Sync {
    /// Logs `error` together with a human readable description of what the
    /// registry was doing.
    fn log_error(&self, error: &(dyn core::error::Error + 'static), context: fmt::Arguments<'_>);
}

impl<L> ErrorLogger for Box<L>
where
    L: ErrorLogger + ?Sized,
{
    fn log_error(&self, error: &(dyn core::error::Error + 'static), context: fmt::Arguments<'_>) {
        (**self).log_error(error, context)
    }
}

impl<L> ErrorLogger for Arc<L>
where
    L: ErrorLogger + ?Sized,
{
    fn log_error(&self, error: &(dyn core::error::Error + 'static), context: fmt::Arguments<'_>) {
        (**self).log_error(error, context)
    }
}

/// Creates an [`ErrorLogger`] from a closure.
///
/// # Examples
///
/// ```
/// use reportmux::{Mux, logger};
///
/// let mux = Mux::new().with_logger(logger::from_fn(|error, context| {
///     eprintln!("{context}: {error}");
/// }));
/// # let _ = mux;
/// ```
pub fn from_fn<F>(f: F) -> FnLogger<F>
where
    F: Fn(&(dyn core::error::Error + 'static), fmt::Arguments<'_>) + Send + Sync + 'static,
{
    FnLogger(f)
}

/// An [`ErrorLogger`] backed by a closure. Created by [`from_fn`].
#[derive(Clone)]
pub struct FnLogger<F>(F);

impl<F> ErrorLogger for FnLogger<F>
where
    F: Fn(&(dyn core::error::Error + 'static), fmt::Arguments<'_>) + Send + Sync + 'static,
{
    fn log_error(&self, error: &(dyn core::error::Error + 'static), context: fmt::Arguments<'_>) {
        (self.0)(error, context)
    }
}

impl<F> fmt::Debug for FnLogger<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FnLogger")
            .field(&core::any::type_name::<F>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::{format, string::String, vec::Vec};

    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("queue full")]
    struct QueueFull;

    type Lines = Arc<spin::Mutex<Vec<String>>>;

    fn recording(lines: &Lines) -> impl ErrorLogger + use<> {
        let lines = lines.clone();
        from_fn(move |error, context| lines.lock().push(format!("{context}: {error}")))
    }

    #[test]
    fn test_from_fn_receives_error_and_context() {
        let lines = Lines::default();
        let logger = recording(&lines);

        logger.log_error(&QueueFull, format_args!("reporter no. {} failed", 3));
        assert_eq!(*lines.lock(), ["reporter no. 3 failed: queue full"]);
    }

    fn log_through<L: ErrorLogger>(logger: &L, context: &str) {
        logger.log_error(&QueueFull, format_args!("{context}"));
    }

    #[test]
    fn test_box_and_arc_forward() {
        let lines = Lines::default();
        let boxed: Box<dyn ErrorLogger> = Box::new(recording(&lines));
        let shared: Arc<dyn ErrorLogger> = Arc::new(recording(&lines));

        log_through(&boxed, "boxed");
        log_through(&shared, "shared");
        assert_eq!(*lines.lock(), ["boxed: queue full", "shared: queue full"]);
    }
}

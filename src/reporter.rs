//! The delivery contract implemented by every channel.
//!
//! A [`Reporter`] takes one report, a [`Trace`], a topic and a body, and
//! tries to get it in front of a human: send an email, post to a chat
//! webhook, print to the console. The registry only cares whether delivery
//! succeeded; transport, retries and templating are the reporter's business.
//!
//! Closures can be turned into reporters with [`from_fn`]:
//!
//! ```
//! use reportmux::{Reporter, reporter, trace};
//!
//! let stdout = reporter::from_fn(|trace, topic, body| {
//!     println!("{trace}: {topic}\n{body}");
//!     Ok(())
//! });
//!
//! assert!(stdout.deliver(&trace!("demo"), "hello", "world").is_ok());
//! ```

use alloc::{boxed::Box, sync::Arc};
use core::fmt;

use unsize::CoerceUnsize;

use crate::Trace;

/// The failure reason returned by a [`Reporter`].
///
/// Any error type that is `Send + Sync + 'static` converts into it with `?`
/// or [`Into`], and so does a plain `&str` or `String` message.
pub type DeliveryError = Box<dyn core::error::Error + Send + Sync + 'static>;

/// A single delivery channel.
///
/// Implementations are invoked synchronously by
/// [`Mux::report`](crate::Mux::report) and may be invoked from several threads
/// at once. They are responsible for their own timeouts; the registry never
/// retries a failed delivery.
pub trait Reporter: 'static + Send + Sync {
    /// Delivers one report.
    ///
    /// Returning `Err` makes the registry log the failure and move on to the
    /// next reporter of the group.
    fn deliver(&self, trace: &Trace, topic: &str, body: &str) -> Result<(), DeliveryError>;
}

impl<R> Reporter for Box<R>
where
    R: Reporter + ?Sized,
{
    fn deliver(&self, trace: &Trace, topic: &str, body: &str) -> Result<(), DeliveryError> {
        (**self).deliver(trace, topic, body)
    }
}

impl<R> Reporter for Arc<R>
where
    R: Reporter + ?Sized,
{
    fn deliver(&self, trace: &Trace, topic: &str, body: &str) -> Result<(), DeliveryError> {
        (**self).deliver(trace, topic, body)
    }
}

/// Reporter handle as stored by the registry.
///
/// Cloning is a reference count increment, so the same reporter can sit in
/// several groups.
pub(crate) type SharedReporter = triomphe::Arc<dyn Reporter>;

pub(crate) fn into_shared<R>(reporter: R) -> SharedReporter
where
    R: Reporter,
{
    triomphe::Arc::new(reporter).unsize(unsize::Coercion!(to dyn Reporter))
}

/// Creates a [`Reporter`] from a closure.
///
/// This exists mostly to help type inference: passing a closure directly
/// where `impl Reporter` is expected does not tell the compiler the argument
/// types.
///
/// # Examples
///
/// ```
/// use reportmux::{GroupOptions, Mux, reporter};
///
/// let mut mux = Mux::new();
/// mux.new_group("ops", GroupOptions::new())
///     .add("ops", reporter::from_fn(|_, _, _| Err("webhook unreachable".into())));
/// assert!(mux.validate().is_ok());
/// ```
pub fn from_fn<F>(f: F) -> FnReporter<F>
where
    F: Fn(&Trace, &str, &str) -> Result<(), DeliveryError> + Send + Sync + 'static,
{
    FnReporter(f)
}

/// A [`Reporter`] backed by a closure. Created by [`from_fn`].
#[derive(Clone)]
pub struct FnReporter<F>(F);

impl<F> Reporter for FnReporter<F>
where
    F: Fn(&Trace, &str, &str) -> Result<(), DeliveryError> + Send + Sync + 'static,
{
    fn deliver(&self, trace: &Trace, topic: &str, body: &str) -> Result<(), DeliveryError> {
        (self.0)(trace, topic, body)
    }
}

impl<F> fmt::Debug for FnReporter<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FnReporter")
            .field(&core::any::type_name::<F>())
            .finish()
    }
}

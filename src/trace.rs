//! Hierarchical origin labels for reports.
//!
//! A [`Trace`] is an ordered path such as `/billing/invoices/render` that
//! tells the recipient of a report where it came from. It carries no behavior
//! beyond path extension and rendering.
//!
//! Traces are immutable: [`Trace::add`] returns a new trace and leaves the
//! receiver untouched, so a base trace can be shared between call sites and
//! threads and branched independently by each of them.
//!
//! ```
//! use reportmux::{Trace, trace};
//!
//! let base = trace!("billing", "invoices");
//! let render = base.add(["render"]);
//! let store = base.add(["store"]);
//!
//! assert_eq!(base.to_string(), "/billing/invoices");
//! assert_eq!(render.to_string(), "/billing/invoices/render");
//! assert_eq!(store.to_string(), "/billing/invoices/store");
//! assert_eq!(Trace::default().to_string(), "/");
//! ```

use alloc::{borrow::Cow, vec::Vec};
use core::fmt;

/// An immutable, ordered path labelling the origin of a report.
///
/// Segments are stored as [`Cow<'static, str>`] so that the common case of
/// string literals does not allocate per segment.
///
/// Rendering through [`Display`](fmt::Display) produces `/` followed by the
/// segments joined with `/`. The empty trace renders as `/`.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Trace {
    segments: Vec<Cow<'static, str>>,
}

impl Trace {
    /// Creates a trace from an ordered list of segments.
    ///
    /// Segments are kept verbatim, including empty ones.
    ///
    /// # Examples
    ///
    /// ```
    /// use reportmux::Trace;
    ///
    /// let trace = Trace::new(["jobs", "nightly"]);
    /// assert_eq!(trace.to_string(), "/jobs/nightly");
    ///
    /// let owned = Trace::new([String::from("tenant-7")]);
    /// assert_eq!(owned.to_string(), "/tenant-7");
    /// ```
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'static, str>>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns a new trace consisting of this trace's segments followed by
    /// `segments`.
    ///
    /// The receiver is not modified.
    ///
    /// # Examples
    ///
    /// ```
    /// use reportmux::trace;
    ///
    /// let base = trace!("a");
    /// let extended = base.add(["b", "c"]);
    ///
    /// assert_eq!(base.to_string(), "/a");
    /// assert_eq!(extended.to_string(), "/a/b/c");
    /// ```
    #[must_use]
    pub fn add<I, S>(&self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'static, str>>,
    {
        let segments = segments.into_iter();
        let mut extended = Vec::with_capacity(self.segments.len() + segments.size_hint().0);
        extended.extend(self.segments.iter().cloned());
        extended.extend(segments.map(Into::into));
        Self { segments: extended }
    }

    /// Returns an iterator over the segments, root first.
    pub fn segments(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.segments.iter().map(|segment| &**segment)
    }

    /// Returns the number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` if the trace has no segments and renders as `/`.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Trace")
            .field(&format_args!("{self}"))
            .finish()
    }
}

impl<S> FromIterator<S> for Trace
where
    S: Into<Cow<'static, str>>,
{
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

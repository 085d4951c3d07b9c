#![no_std]
#![deny(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
// Make docs.rs generate better docs
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Route error reports to named groups of delivery channels.
//!
//! ## Overview
//!
//! When something goes wrong in production, somebody has to hear about it.
//! This crate provides the routing layer between "something went wrong" and
//! the channels that reach people: you register named **groups**, each with
//! an ordered list of **reporters** (email, chat webhooks, the console, ...),
//! validate the configuration once at startup, and from then on send
//! **reports** to groups by name.
//!
//! ## Quick Example
//!
//! ```
//! use reportmux::prelude::*;
//!
//! let mut mux = Mux::new();
//! mux.new_group("payments", GroupOptions::new())
//!     .add("payments", reporter::from_fn(|trace, topic, _body| {
//!         println!("[mail] {trace}: {topic}");
//!         Ok(())
//!     }))
//!     .add("payments", reporter::from_fn(|trace, topic, _body| {
//!         println!("[fallback] {trace}: {topic}");
//!         Ok(())
//!     }));
//!
//! // Fail fast before going live.
//! mux.validate().expect("report groups are misconfigured");
//!
//! let base = trace!("payments", "checkout");
//! mux.report("payments", &base.add(["capture"]), "card declined", "order 42");
//! ```
//!
//! ## Core Concepts
//!
//! - A [`Trace`] is an immutable path such as `/payments/checkout/capture`
//!   that tells the recipient where a report came from.
//! - A [`Reporter`] delivers one report and says whether it succeeded.
//! - A group is an ordered list of reporters plus a [`DeliveryPolicy`]. With
//!   the default [`DeliveryPolicy::FirstSuccess`], later reporters are
//!   fallbacks for earlier ones. With [`DeliveryPolicy::TryAll`], every
//!   reporter receives every report.
//! - The [`Mux`] owns the groups, validates them and dispatches reports.
//!
//! ## Configuration
//!
//! Configuration methods take `&mut self` and return `&mut Self` so they can
//! be chained without checking for errors after each step. The first mistake
//! (a duplicate group, a reporter added to a group that does not exist) is
//! recorded together with its source location, every configuration call
//! after it is ignored, and [`Mux::validate`] returns it. Validation also
//! rejects a registry without groups and groups without reporters.
//!
//! Groups can also be described declaratively with [`Group`] and registered
//! with [`Mux::add_group`] or [`Mux::add_groups`].
//!
//! ## Dispatch
//!
//! [`Mux::report`] never fails; report dispatch is best effort and usually
//! happens while the caller is already handling some other error. Reporter
//! failures are passed to the optional [`ErrorLogger`] and the next reporter
//! is tried.
//!
//! Sending a report to a group that does not exist is treated as an incident:
//! the call site is logged and a diagnostic naming the bad group, the call
//! site and the original trace is broadcast to every reporter of every group.
//! The original topic and body are not part of the diagnostic.
//!
//! [`Mux::nop`] builds a registry that accepts the same configuration but
//! discards every report, which switches reporting off without touching any
//! call site.
//!
//! ## Concurrency
//!
//! [`Mux`] is `Send + Sync`. Configure it on one thread, then share it (for
//! instance behind an `Arc`) for concurrent dispatch. Reporters are called
//! synchronously on the dispatching thread.
//!
//! ## Features
//!
//! - `std`: the [`WriterReporter`](reporters::writer::WriterReporter) lock
//!   uses `std::sync::Mutex` instead of a spin lock.
//!
//! ## Ecosystem
//!
//! - **`reportmux-tracing`** - an [`ErrorLogger`] that emits `tracing`
//!   events, and a reporter that turns reports into `tracing` events.

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

#[macro_use]
mod macros;

pub mod logger;
pub mod prelude;
pub mod reporter;
pub mod reporters;
pub mod trace;

mod error;
mod group;
mod mux;

pub use self::{
    error::{ConfigError, ConfigErrorKind, UnknownGroupError},
    group::{DeliveryPolicy, Group, GroupOptions},
    logger::ErrorLogger,
    mux::Mux,
    reporter::{DeliveryError, Reporter},
    trace::Trace,
};

// Not public API. Referenced by macro-generated code.
#[doc(hidden)]
pub mod __private {
    #[doc(hidden)]
    pub use alloc::borrow::Cow;
}

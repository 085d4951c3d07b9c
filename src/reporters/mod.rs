//! Ready-made [`Reporter`](crate::Reporter) implementations.
//!
//! - [`mail`]: formats a subject line from the trace and topic and hands the
//!   message to a [`MailTransport`](mail::MailTransport).
//! - [`writer`]: renders reports as text into any
//!   [`core::fmt::Write`] sink, such as a console buffer.
//!
//! Both are thin adapters; the registry itself only depends on the
//! [`Reporter`](crate::Reporter) trait.

pub mod mail;
pub mod writer;

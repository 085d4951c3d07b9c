//! Email delivery.
//!
//! This module does not speak SMTP. It turns a report into a [`MailMessage`]
//! and passes it to a [`MailTransport`], which is where the actual sending
//! happens.
//!
//! ```
//! use reportmux::{
//!     DeliveryError, Group, Mux,
//!     reporters::mail::{MailMessage, MailReporter, MailTransport},
//!     trace,
//! };
//!
//! struct Smtp;
//!
//! impl MailTransport for Smtp {
//!     fn send(
//!         &self,
//!         from: &str,
//!         recipients: &[String],
//!         message: &MailMessage,
//!     ) -> Result<(), DeliveryError> {
//!         println!("{from} -> {recipients:?}: {}", message.subject);
//!         Ok(())
//!     }
//! }
//!
//! let mailer = MailReporter::new(Smtp, "alerts@example.com", "").unwrap();
//!
//! let mut mux = Mux::new();
//! mux.add_group(Group::new("billing").reporter(mailer.to(["billing-oncall@example.com"])));
//! mux.validate().unwrap();
//!
//! mux.report("billing", &trace!("invoices"), "render failed", "template missing");
//! ```

use alloc::{
    borrow::Cow,
    format,
    string::{String, ToString},
    sync::Arc,
    vec::Vec,
};
use core::fmt;

use crate::{DeliveryError, Reporter, Trace};

/// The content type used when none is configured.
pub const DEFAULT_CONTENT_TYPE: &str = "text/plain";

/// The subject prefix used when none is configured.
pub const DEFAULT_SUBJECT_PREFIX: &str = "Report";

/// An outgoing email.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MailMessage {
    /// The subject line, built from the prefix, trace and topic.
    pub subject: String,
    /// The report body, unchanged.
    pub body: String,
    /// MIME type of the body, e.g. `text/plain`.
    pub content_type: String,
}

/// Sends emails on behalf of a [`MailReporter`].
pub trait MailTransport: 'static + Send + Sync {
    /// Sends `message` from `from` to every address in `recipients`.
    fn send(&self, from: &str, recipients: &[String], message: &MailMessage)
    -> Result<(), DeliveryError>;
}

impl<T> MailTransport for Arc<T>
where
    T: MailTransport + ?Sized,
{
    fn send(
        &self,
        from: &str,
        recipients: &[String],
        message: &MailMessage,
    ) -> Result<(), DeliveryError> {
        (**self).send(from, recipients, message)
    }
}

/// Error returned by [`MailReporter::new`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum MailConfigError {
    /// The sender address was empty.
    MissingSender,
}

impl fmt::Display for MailConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSender => f.write_str("mail sender address is required"),
        }
    }
}

impl core::error::Error for MailConfigError {}

/// Shared mail settings from which per-recipient reporters are made.
///
/// Cloning is cheap; the transport is reference counted.
#[derive(Clone)]
pub struct MailReporter {
    transport: Arc<dyn MailTransport>,
    from: String,
    content_type: String,
    subject_prefix: Cow<'static, str>,
}

impl MailReporter {
    /// Creates mail settings.
    ///
    /// `from` must not be empty. An empty `content_type` falls back to
    /// [`DEFAULT_CONTENT_TYPE`].
    pub fn new<T>(
        transport: T,
        from: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Result<Self, MailConfigError>
    where
        T: MailTransport,
    {
        let from = from.into();
        if from.is_empty() {
            return Err(MailConfigError::MissingSender);
        }

        let mut content_type = content_type.into();
        if content_type.is_empty() {
            content_type = DEFAULT_CONTENT_TYPE.to_string();
        }

        Ok(Self {
            transport: Arc::new(transport),
            from,
            content_type,
            subject_prefix: Cow::Borrowed(DEFAULT_SUBJECT_PREFIX),
        })
    }

    /// Replaces the subject prefix ([`DEFAULT_SUBJECT_PREFIX`] by default).
    #[must_use]
    pub fn subject_prefix(mut self, prefix: impl Into<Cow<'static, str>>) -> Self {
        self.subject_prefix = prefix.into();
        self
    }

    /// The sender address.
    pub fn from_address(&self) -> &str {
        &self.from
    }

    /// The content type attached to every message.
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Returns a reporter that mails every report to `recipients`.
    pub fn to<I, S>(&self, recipients: I) -> MailChannel
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MailChannel {
            settings: self.clone(),
            recipients: recipients.into_iter().map(Into::into).collect(),
        }
    }

    fn subject(&self, trace: &Trace, topic: &str) -> String {
        if topic.is_empty() {
            format!("{}: {trace}", self.subject_prefix)
        } else {
            format!("{}: {trace}: {topic}", self.subject_prefix)
        }
    }
}

impl fmt::Debug for MailReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailReporter")
            .field("from", &self.from)
            .field("content_type", &self.content_type)
            .field("subject_prefix", &self.subject_prefix)
            .finish_non_exhaustive()
    }
}

/// A [`Reporter`] that mails reports to a fixed list of recipients.
/// Created by [`MailReporter::to`].
#[derive(Clone, Debug)]
pub struct MailChannel {
    settings: MailReporter,
    recipients: Vec<String>,
}

impl MailChannel {
    /// The addresses every report is sent to.
    pub fn recipients(&self) -> &[String] {
        &self.recipients
    }
}

impl Reporter for MailChannel {
    fn deliver(&self, trace: &Trace, topic: &str, body: &str) -> Result<(), DeliveryError> {
        let message = MailMessage {
            subject: self.settings.subject(trace, topic),
            body: body.into(),
            content_type: self.settings.content_type.clone(),
        };
        self.settings
            .transport
            .send(&self.settings.from, &self.recipients, &message)
    }
}

//! Groups of reporters and their delivery policy.

use alloc::{string::String, vec::Vec};
use core::fmt;

use crate::reporter::{Reporter, SharedReporter, into_shared};

/// How a group walks its reporters.
///
/// Reporters are always tried in registration order, and a failing reporter
/// never stops the walk. The policy only decides what happens after a
/// success.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DeliveryPolicy {
    /// Stop at the first reporter that delivers successfully. Later
    /// reporters act as fallbacks.
    #[default]
    FirstSuccess,
    /// Keep going after a success so that every reporter receives every
    /// report, e.g. an email channel and a chat webhook side by side.
    TryAll,
}

/// Options for [`Mux::new_group`](crate::Mux::new_group).
///
/// # Examples
///
/// ```
/// use reportmux::{DeliveryPolicy, GroupOptions};
///
/// assert_eq!(GroupOptions::new().policy(), DeliveryPolicy::FirstSuccess);
/// assert_eq!(GroupOptions::new().try_all().policy(), DeliveryPolicy::TryAll);
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct GroupOptions {
    policy: DeliveryPolicy,
}

impl GroupOptions {
    /// The default options: stop at the first successful reporter.
    pub const fn new() -> Self {
        Self {
            policy: DeliveryPolicy::FirstSuccess,
        }
    }

    /// Deliver to every reporter of the group regardless of earlier
    /// successes.
    #[must_use]
    pub const fn try_all(mut self) -> Self {
        self.policy = DeliveryPolicy::TryAll;
        self
    }

    /// Sets the delivery policy explicitly.
    #[must_use]
    pub const fn with_policy(mut self, policy: DeliveryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the configured delivery policy.
    pub const fn policy(&self) -> DeliveryPolicy {
        self.policy
    }
}

/// A declarative group definition for
/// [`Mux::add_group`](crate::Mux::add_group).
///
/// Registering a `Group` is equivalent to calling
/// [`Mux::new_group`](crate::Mux::new_group) once and then
/// [`Mux::add`](crate::Mux::add) for every reporter, in order.
///
/// # Examples
///
/// ```
/// use reportmux::{Group, Mux, reporter};
///
/// let mut mux = Mux::new();
/// mux.add_groups([
///     Group::new("billing")
///         .try_all()
///         .reporter(reporter::from_fn(|_, _, _| Ok(())))
///         .reporter(reporter::from_fn(|_, _, _| Ok(()))),
///     Group::new("ops").reporter(reporter::from_fn(|_, _, _| Ok(()))),
/// ]);
///
/// assert!(mux.validate().is_ok());
/// assert_eq!(mux.reporter_count("billing"), Some(2));
/// ```
#[derive(Clone)]
pub struct Group {
    pub(crate) name: String,
    pub(crate) options: GroupOptions,
    pub(crate) reporters: Vec<SharedReporter>,
}

impl Group {
    /// Starts a group definition with default options and no reporters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: GroupOptions::new(),
            reporters: Vec::new(),
        }
    }

    /// Replaces the group options.
    #[must_use]
    pub fn options(mut self, options: GroupOptions) -> Self {
        self.options = options;
        self
    }

    /// Shorthand for `.options(GroupOptions::new().try_all())`.
    #[must_use]
    pub fn try_all(mut self) -> Self {
        self.options = self.options.try_all();
        self
    }

    /// Appends a reporter. Order is delivery order.
    #[must_use]
    pub fn reporter<R>(mut self, reporter: R) -> Self
    where
        R: Reporter,
    {
        self.reporters.push(into_shared(reporter));
        self
    }

    /// The group name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of reporters defined so far.
    pub fn len(&self) -> usize {
        self.reporters.len()
    }

    /// Returns `true` if no reporter has been added yet.
    pub fn is_empty(&self) -> bool {
        self.reporters.is_empty()
    }
}

impl fmt::Debug for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Group")
            .field("name", &self.name)
            .field("options", &self.options)
            .field("reporters", &self.reporters.len())
            .finish()
    }
}

/// A registered group inside a [`Mux`](crate::Mux).
#[derive(Clone)]
pub(crate) struct GroupEntry {
    pub(crate) reporters: Vec<SharedReporter>,
    pub(crate) policy: DeliveryPolicy,
}

impl GroupEntry {
    pub(crate) fn new(options: GroupOptions) -> Self {
        Self {
            reporters: Vec::new(),
            policy: options.policy(),
        }
    }
}

//! The registry of report groups.
//!
//! A [`Mux`] goes through two phases:
//!
//! 1. **Configuration.** Groups and reporters are registered through `&mut`
//!    methods that return `&mut Self`, so calls can be chained. The first
//!    configuration mistake is recorded and every later configuration call
//!    becomes a no-op. Nothing is reported until [`Mux::validate`] is
//!    called, which should happen once at startup.
//! 2. **Dispatch.** [`Mux::report`] takes `&self`, so a validated registry can
//!    be shared (for example through an `Arc`) and used from many threads.
//!
//! ```
//! use reportmux::{GroupOptions, Mux, reporter, trace};
//!
//! let mut mux = Mux::new();
//! mux.new_group("payments", GroupOptions::new().try_all())
//!     .add("payments", reporter::from_fn(|_, _, _| Ok(())))
//!     .add("payments", reporter::from_fn(|_, _, _| Ok(())));
//! mux.validate().expect("report groups are misconfigured");
//!
//! mux.report("payments", &trace!("checkout"), "card declined", "...");
//! ```

mod dispatch;

use alloc::{string::String, vec::Vec};
use core::{fmt, panic::Location};

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use unsize::CoerceUnsize;

use crate::{
    error::{ConfigError, ConfigErrorKind},
    group::{DeliveryPolicy, Group, GroupEntry, GroupOptions},
    logger::ErrorLogger,
    reporter::{Reporter, SharedReporter, into_shared},
};

type GroupMap = IndexMap<String, GroupEntry, FxBuildHasher>;

/// Routes reports to named groups of reporters.
///
/// A registry is configured through `&mut` methods, checked once with
/// [`validate`](Self::validate), and then used through `&self` for
/// [`report`](Self::report) calls from any number of threads. See the
/// [crate documentation](crate) for an overview.
#[derive(Clone, Default)]
pub struct Mux {
    groups: GroupMap,
    logger: Option<triomphe::Arc<dyn ErrorLogger>>,
    error: Option<ConfigError>,
    nop: bool,
}

impl Mux {
    /// Creates an empty registry without a logger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry whose [`report`](Self::report) calls do nothing.
    ///
    /// Configuration and validation behave exactly as for [`Mux::new`], so
    /// reporting can be switched off without touching any call site.
    ///
    /// # Examples
    ///
    /// ```
    /// use reportmux::{Mux, trace};
    ///
    /// let mux = Mux::nop();
    /// assert!(mux.is_nop());
    /// mux.report("anything", &trace!(), "ignored", "ignored");
    /// ```
    pub fn nop() -> Self {
        Self {
            nop: true,
            ..Self::default()
        }
    }

    /// Sets the logger that receives dispatch failures.
    ///
    /// Without a logger, failures are dropped silently.
    #[must_use]
    pub fn with_logger<L>(mut self, logger: L) -> Self
    where
        L: ErrorLogger,
    {
        self.logger =
            Some(triomphe::Arc::new(logger).unsize(unsize::Coercion!(to dyn ErrorLogger)));
        self
    }

    /// Registers a new, empty group.
    ///
    /// Records a [`ConfigErrorKind::EmptyName`] error if `name` is empty and a
    /// [`ConfigErrorKind::DuplicateGroup`] error if it is already registered.
    /// Does nothing if an error was recorded earlier.
    #[track_caller]
    pub fn new_group(&mut self, name: impl Into<String>, options: GroupOptions) -> &mut Self {
        if self.error.is_some() {
            return self;
        }

        let name = name.into();
        if name.is_empty() {
            self.fail(ConfigErrorKind::EmptyName);
            return self;
        }
        if self.groups.contains_key(&name) {
            self.fail(ConfigErrorKind::DuplicateGroup { name });
            return self;
        }

        self.groups.insert(name, GroupEntry::new(options));
        self
    }

    /// Appends `reporter` to the group called `name`.
    ///
    /// Records a [`ConfigErrorKind::UnknownGroup`] error if the group has not
    /// been registered. Does nothing if an error was recorded earlier.
    #[track_caller]
    pub fn add<R>(&mut self, name: &str, reporter: R) -> &mut Self
    where
        R: Reporter,
    {
        self.add_shared(name, into_shared(reporter))
    }

    #[track_caller]
    fn add_shared(&mut self, name: &str, reporter: SharedReporter) -> &mut Self {
        if self.error.is_some() {
            return self;
        }

        let Some(entry) = self.groups.get_mut(name) else {
            self.fail(ConfigErrorKind::UnknownGroup { name: name.into() });
            return self;
        };
        entry.reporters.push(reporter);
        self
    }

    /// Registers a group from a declarative definition.
    ///
    /// Equivalent to [`new_group`](Self::new_group) followed by one
    /// [`add`](Self::add) per reporter, in order.
    #[track_caller]
    pub fn add_group(&mut self, group: Group) -> &mut Self {
        let Group {
            name,
            options,
            reporters,
        } = group;

        self.new_group(name.as_str(), options);
        for reporter in reporters {
            self.add_shared(&name, reporter);
        }
        self
    }

    /// Registers several groups, in order.
    #[track_caller]
    pub fn add_groups<I>(&mut self, groups: I) -> &mut Self
    where
        I: IntoIterator<Item = Group>,
    {
        for group in groups {
            self.add_group(group);
        }
        self
    }

    /// Checks the configuration.
    ///
    /// Returns, in this order of precedence:
    /// 1. the first error recorded by a configuration call;
    /// 2. [`ConfigErrorKind::NoGroups`] if no group is registered;
    /// 3. [`ConfigErrorKind::EmptyGroup`] for the first group, in
    ///    registration order, that has no reporter.
    ///
    /// Validation does not change the registry and may be repeated.
    ///
    /// # Examples
    ///
    /// ```
    /// use reportmux::{GroupOptions, Mux};
    ///
    /// let mut mux = Mux::new();
    /// assert_eq!(
    ///     mux.validate().unwrap_err().to_string(),
    ///     "no groups defined; at least one group must be defined"
    /// );
    ///
    /// mux.new_group("ops", GroupOptions::new());
    /// assert_eq!(
    ///     mux.validate().unwrap_err().to_string(),
    ///     "group 'ops' has no reporter assigned"
    /// );
    /// ```
    #[track_caller]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(error) = &self.error {
            return Err(error.clone());
        }

        if self.groups.is_empty() {
            return Err(ConfigError::new(ConfigErrorKind::NoGroups, Location::caller()));
        }

        if let Some((name, _)) = self
            .groups
            .iter()
            .find(|(_, entry)| entry.reporters.is_empty())
        {
            return Err(ConfigError::new(
                ConfigErrorKind::EmptyGroup { name: name.clone() },
                Location::caller(),
            ));
        }

        Ok(())
    }

    /// Returns `true` for registries created with [`Mux::nop`].
    pub fn is_nop(&self) -> bool {
        self.nop
    }

    /// Returns `true` if a group called `name` is registered.
    pub fn contains_group(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    /// Returns the registered group names in registration order.
    pub fn group_names(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.groups.keys().map(String::as_str)
    }

    /// Returns the number of reporters in the group called `name`.
    pub fn reporter_count(&self, name: &str) -> Option<usize> {
        self.groups.get(name).map(|entry| entry.reporters.len())
    }

    /// Returns the delivery policy of the group called `name`.
    pub fn policy(&self, name: &str) -> Option<DeliveryPolicy> {
        self.groups.get(name).map(|entry| entry.policy)
    }

    #[track_caller]
    fn fail(&mut self, kind: ConfigErrorKind) {
        self.error = Some(ConfigError::new(kind, Location::caller()));
    }

    fn log(&self, error: &(dyn core::error::Error + 'static), context: fmt::Arguments<'_>) {
        if let Some(logger) = &self.logger {
            logger.log_error(error, context);
        }
    }
}

impl fmt::Debug for Mux {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let groups: Vec<(&str, usize, DeliveryPolicy)> = self
            .groups
            .iter()
            .map(|(name, entry)| (name.as_str(), entry.reporters.len(), entry.policy))
            .collect();

        f.debug_struct("Mux")
            .field("groups", &groups)
            .field("logger", &self.logger.is_some())
            .field("error", &self.error)
            .field("nop", &self.nop)
            .finish()
    }
}

//! Error types produced by the registry.
//!
//! There are two classes of errors:
//!
//! - [`ConfigError`] is recorded while groups and reporters are being
//!   registered and is surfaced exactly once, by
//!   [`Mux::validate`](crate::Mux::validate). It is meant to be checked at
//!   startup and treated as fatal.
//! - [`UnknownGroupError`] describes a dispatch to a group that was never
//!   registered. It is never returned to the caller of
//!   [`Mux::report`](crate::Mux::report); it is only handed to the configured
//!   [`ErrorLogger`](crate::ErrorLogger) while the registry broadcasts a
//!   diagnostic to every reporter.

use alloc::string::String;
use core::{fmt, panic::Location};

/// What went wrong while configuring a [`Mux`](crate::Mux).
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigErrorKind {
    /// [`Mux::new_group`](crate::Mux::new_group) was called with a name that
    /// is already registered.
    DuplicateGroup {
        /// The offending group name.
        name: String,
    },
    /// [`Mux::add`](crate::Mux::add) referenced a group that has not been
    /// registered yet.
    UnknownGroup {
        /// The offending group name.
        name: String,
    },
    /// [`Mux::new_group`](crate::Mux::new_group) was called with an empty
    /// name.
    EmptyName,
    /// The registry has no groups at all.
    NoGroups,
    /// A group was registered but never received a reporter.
    EmptyGroup {
        /// The name of the first empty group, in registration order.
        name: String,
    },
}

impl fmt::Display for ConfigErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateGroup { name } => write!(f, "group '{name}' already exists"),
            Self::UnknownGroup { name } => write!(f, "group '{name}' doesn't exist"),
            Self::EmptyName => f.write_str("group name must not be empty"),
            Self::NoGroups => f.write_str("no groups defined; at least one group must be defined"),
            Self::EmptyGroup { name } => write!(f, "group '{name}' has no reporter assigned"),
        }
    }
}

/// A configuration error, together with the source location of the call
/// that produced it.
///
/// Only the first configuration error of a registry is kept; every
/// configuration call made after it is ignored.
///
/// The [`Display`](fmt::Display) implementation renders only the
/// [kind](Self::kind). Use [`location`](Self::location) to find the
/// offending call.
///
/// # Examples
///
/// ```
/// use reportmux::{ConfigErrorKind, GroupOptions, Mux};
///
/// let mut mux = Mux::new();
/// mux.new_group("ops", GroupOptions::new())
///     .new_group("ops", GroupOptions::new());
///
/// let error = mux.validate().unwrap_err();
/// assert_eq!(error.to_string(), "group 'ops' already exists");
/// assert!(matches!(error.kind(), ConfigErrorKind::DuplicateGroup { .. }));
/// assert!(error.location().file().ends_with(".rs"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigError {
    kind: ConfigErrorKind,
    location: &'static Location<'static>,
}

impl ConfigError {
    pub(crate) fn new(kind: ConfigErrorKind, location: &'static Location<'static>) -> Self {
        Self { kind, location }
    }

    /// Returns what went wrong.
    pub fn kind(&self) -> &ConfigErrorKind {
        &self.kind
    }

    /// Returns the location of the configuration or validation call that
    /// produced this error.
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}

impl core::error::Error for ConfigError {}

/// A report was dispatched to a group that does not exist.
///
/// Passed to the [`ErrorLogger`](crate::ErrorLogger) when
/// [`Mux::report`](crate::Mux::report) falls back to broadcasting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownGroupError {
    group: String,
    location: &'static Location<'static>,
}

impl UnknownGroupError {
    pub(crate) fn new(group: &str, location: &'static Location<'static>) -> Self {
        Self {
            group: group.into(),
            location,
        }
    }

    /// The group name the caller asked for.
    pub fn group(&self) -> &str {
        &self.group
    }

    /// The location of the offending [`Mux::report`](crate::Mux::report)
    /// call.
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }
}

impl fmt::Display for UnknownGroupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "bad reportmux::Mux::report call from {}:{}: report group '{}' doesn't exist",
            self.location.file(),
            self.location.line(),
            self.group
        )
    }
}

impl core::error::Error for UnknownGroupError {}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn test_config_error_messages() {
        let location = Location::caller();
        let cases = [
            (
                ConfigErrorKind::DuplicateGroup { name: "a".into() },
                "group 'a' already exists",
            ),
            (
                ConfigErrorKind::UnknownGroup { name: "b".into() },
                "group 'b' doesn't exist",
            ),
            (ConfigErrorKind::EmptyName, "group name must not be empty"),
            (
                ConfigErrorKind::NoGroups,
                "no groups defined; at least one group must be defined",
            ),
            (
                ConfigErrorKind::EmptyGroup { name: "c".into() },
                "group 'c' has no reporter assigned",
            ),
        ];
        for (kind, expected) in cases {
            assert_eq!(ConfigError::new(kind, location).to_string(), expected);
        }
    }

    #[test]
    fn test_unknown_group_error_mentions_call_site() {
        let location = Location::caller();
        let error = UnknownGroupError::new("nope", location);
        let rendered = error.to_string();
        assert!(rendered.contains("'nope'"));
        assert!(rendered.contains(location.file()));
        assert!(rendered.contains(&location.line().to_string()));
    }

    #[test]
    fn test_errors_send_sync() {
        static_assertions::assert_impl_all!(ConfigError: Send, Sync, core::error::Error);
        static_assertions::assert_impl_all!(UnknownGroupError: Send, Sync, core::error::Error);
    }
}

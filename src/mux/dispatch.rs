//! Report delivery.
//!
//! ```text
//! report(group, trace, topic, body)
//!   ├─ nop registry ─────────────► return
//!   ├─ group unknown ────────────► log UnknownGroupError
//!   │                              broadcast diagnostic to every reporter
//!   │                              of every group, return
//!   └─ for reporter in group (registration order)
//!        ├─ Ok  ─► FirstSuccess: return
//!        │         TryAll:       continue
//!        └─ Err ─► log, continue
//! ```

use alloc::{format, string::String};
use core::panic::Location;

use super::Mux;
use crate::{Trace, error::UnknownGroupError, group::DeliveryPolicy};

const MISUSE_TRACE: [&str; 2] = ["reportmux", "Mux::report"];

impl Mux {
    /// Delivers a report to the group called `group`.
    ///
    /// Reporters are tried in registration order. A failing reporter is
    /// logged and skipped. After a successful delivery the walk stops, unless
    /// the group uses [`DeliveryPolicy::TryAll`].
    ///
    /// This never fails. If `group` is not registered, the call site is
    /// logged as an [`UnknownGroupError`] and a diagnostic report is
    /// broadcast to every reporter of every group, regardless of their
    /// policy. The diagnostic names the bad group, the call site and the
    /// original trace, but never carries the original topic or body, since
    /// those might not be meant for the people receiving the broadcast.
    ///
    /// Registries created with [`Mux::nop`] return immediately.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::{Arc, Mutex};
    ///
    /// use reportmux::{GroupOptions, Mux, reporter, trace};
    ///
    /// let received = Arc::new(Mutex::new(Vec::new()));
    /// let sink = {
    ///     let received = received.clone();
    ///     reporter::from_fn(move |_, topic, _| {
    ///         received.lock().unwrap().push(topic.to_string());
    ///         Ok(())
    ///     })
    /// };
    ///
    /// let mut mux = Mux::new();
    /// mux.new_group("ops", GroupOptions::new()).add("ops", sink);
    /// mux.validate().unwrap();
    ///
    /// mux.report("ops", &trace!("db"), "replica lag", "lag is 42s");
    /// mux.report("opps", &trace!("db"), "replica lag", "lag is 42s");
    ///
    /// let received = received.lock().unwrap();
    /// assert_eq!(received[0], "replica lag");
    /// assert_eq!(received[1], "ERROR: reportmux: unknown report group 'opps'");
    /// ```
    #[track_caller]
    pub fn report(&self, group: &str, trace: &Trace, topic: &str, body: &str) {
        if self.nop {
            return;
        }

        let Some(entry) = self.groups.get(group) else {
            self.broadcast_unknown_group(group, trace, Location::caller());
            return;
        };

        for (index, reporter) in entry.reporters.iter().enumerate() {
            match reporter.deliver(trace, topic, body) {
                Ok(()) if entry.policy == DeliveryPolicy::FirstSuccess => return,
                Ok(()) => {}
                Err(error) => self.log(
                    &*error,
                    format_args!("reporting to group '{group}' via reporter no. {index} failed"),
                ),
            }
        }
    }

    /// The trace attached to the diagnostic broadcast when
    /// [`report`](Self::report) is called with an unknown group.
    ///
    /// # Examples
    ///
    /// ```
    /// use reportmux::Mux;
    ///
    /// assert_eq!(Mux::misuse_trace().to_string(), "/reportmux/Mux::report");
    /// ```
    pub fn misuse_trace() -> Trace {
        Trace::new(MISUSE_TRACE)
    }

    #[cold]
    fn broadcast_unknown_group(
        &self,
        group: &str,
        original_trace: &Trace,
        location: &'static Location<'static>,
    ) {
        let error = UnknownGroupError::new(group, location);
        self.log(&error, format_args!("invalid report"));

        let trace = Self::misuse_trace();
        let topic = format!("ERROR: reportmux: unknown report group '{group}'");
        let body = misuse_body(&error, original_trace);

        for (name, entry) in &self.groups {
            for (index, reporter) in entry.reporters.iter().enumerate() {
                if let Err(delivery_error) = reporter.deliver(&trace, &topic, &body) {
                    self.log(
                        &*delivery_error,
                        format_args!(
                            "broadcasting unknown group '{group}' via group '{name}' reporter no. {index} failed"
                        ),
                    );
                }
            }
        }
    }
}

fn misuse_body(error: &UnknownGroupError, original_trace: &Trace) -> String {
    format!(
        "\n\
        {error}!\n\
        \n\
        This message is sent to every registered group and reporter in the hope \
        that it reaches the team responsible for the call site.\n\
        \n\
        Original trace: {original_trace}\n\
        \n\
        !! Please forward this message to the developers who own {file} !!\n",
        file = error.location().file(),
    )
}

//! Getting started: configure groups, validate once, then report.
//!
//! # Running this Example
//!
//! ```bash
//! cargo run --example basic
//! ```

use reportmux::prelude::*;

// ============================================================================
// Reporters
// ============================================================================

/// A channel that always fails, like a chat webhook during an outage.
fn flaky_webhook() -> impl Reporter {
    reporter::from_fn(|_, _, _| Err("webhook returned 503".into()))
}

/// A channel that prints to stdout.
fn console(label: &'static str) -> impl Reporter {
    reporter::from_fn(move |trace, topic, body| {
        println!("[{label}] {trace}: {topic}");
        for line in body.lines() {
            println!("[{label}]     {line}");
        }
        Ok(())
    })
}

/// Prints dispatch failures to stderr.
fn stderr_logger() -> impl ErrorLogger {
    logger::from_fn(|error, context| eprintln!("reportmux: {context}: {error}"))
}

// ============================================================================
// Setup
// ============================================================================

fn build() -> Mux {
    let mut mux = Mux::new().with_logger(stderr_logger());

    // Fallback: the webhook is tried first, the console only when it fails.
    mux.new_group("ops", GroupOptions::new())
        .add("ops", flaky_webhook())
        .add("ops", console("ops"));

    // Fan-out: every reporter in the group gets every report.
    mux.add_group(
        Group::new("audit")
            .try_all()
            .reporter(console("audit-primary"))
            .reporter(console("audit-mirror")),
    );

    mux
}

fn main() {
    let mux = build();
    if let Err(error) = mux.validate() {
        eprintln!("configuration error at {}: {error}", error.location());
        return;
    }

    println!("Groups: {:?}", mux.group_names().collect::<Vec<_>>());
    println!();

    let request = trace!("api", "orders");

    println!("=== Fallback delivery ===");
    mux.report(
        "ops",
        &request.add(["create"]),
        "payment declined",
        "order 1042 could not be charged",
    );
    println!();

    println!("=== Fan-out delivery ===");
    mux.report(
        "audit",
        &request.add(["refund"]),
        "manual refund",
        "refund of 12.00 EUR issued by support",
    );
}

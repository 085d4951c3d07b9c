//! What happens when a report names a group that does not exist.
//!
//! Every reporter of every group receives a diagnostic pointing at the bad
//! call site. The original topic and body are withheld.
//!
//! # Running this Example
//!
//! ```bash
//! cargo run --example unknown_group
//! ```

use std::sync::Arc;

use reportmux::{Group, Mux, logger, reporters::writer::WriterReporter, trace};

fn main() {
    let ops = Arc::new(WriterReporter::new(String::new()));
    let security = Arc::new(WriterReporter::new(String::new()));

    let mut mux = Mux::new().with_logger(logger::from_fn(|error, context| {
        eprintln!("reportmux: {context}: {error}");
    }));
    mux.add_groups([
        Group::new("ops").reporter(ops.clone()),
        Group::new("security").reporter(security.clone()),
    ]);

    if let Err(error) = mux.validate() {
        eprintln!("configuration error: {error}");
        return;
    }

    // "sec" is a typo for "security".
    mux.report(
        "sec",
        &trace!("auth", "login"),
        "credential stuffing",
        "1200 failed logins from 203.0.113.7",
    );

    for (name, reporter) in [("ops", &ops), ("security", &security)] {
        println!("=== received by {name} ===");
        if let Some(output) = reporter.with_writer(|out| out.clone()) {
            print!("{output}");
        }
    }
}

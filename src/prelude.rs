//! Commonly used items for convenient importing.
//!
//! ```rust
//! use reportmux::prelude::*;
//!
//! let mut mux = Mux::new();
//! mux.add_group(Group::new("ops").reporter(reporter::from_fn(|_, _, _| Ok(()))));
//! mux.validate().unwrap();
//! mux.report("ops", &trace!("startup"), "hello", "");
//! ```

pub use crate::{
    DeliveryError, DeliveryPolicy, ErrorLogger, Group, GroupOptions, Mux, Reporter, Trace, logger,
    reporter, trace,
};

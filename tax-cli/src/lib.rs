//! Command-line front end for the bracket tax engine.
//!
//! [`app`] turns user-formatted input into a query and renders results;
//! [`logging`] owns the tracing subscriber.

pub mod app;
pub mod logging;
pub mod utils;

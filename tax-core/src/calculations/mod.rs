//! Tax calculation modules.
//!
//! [`engine`] holds the bracket computation itself; [`common`] has the
//! rounding helpers it shares with presentation code.

pub mod common;
pub mod engine;

pub use engine::{TaxEngine, compute};

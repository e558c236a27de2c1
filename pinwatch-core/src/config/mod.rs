//! Configuration types
//!
//! Inversion and retention policy plus pin descriptors. These replace
//! build-wide toggles: every pin is handed its configuration explicitly,
//! so both polarities can coexist in one build and in one test run.

pub mod hardware;
pub mod types;

pub use hardware::*;
pub use types::*;

//! Ridgewalk CLI library.
//!
//! Output formatting shared by the `ridgewalk` binary and its tests.

pub mod output;

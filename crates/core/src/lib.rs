//! Domain types for the problem tracker.

pub mod domain;

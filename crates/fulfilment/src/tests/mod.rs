//! Crate-level test suites for webhook dispatch.

mod behaviour;

//! Test suites for the fulfilment daemon.

mod support;

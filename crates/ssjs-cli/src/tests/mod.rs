//! Tests for the SSJS CLI runtime.

mod support;

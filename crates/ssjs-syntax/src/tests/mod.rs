//! Unit tests for ssjs-syntax.

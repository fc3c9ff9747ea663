//! Unit tests for the analysis pipeline.

mod scanner_tests;

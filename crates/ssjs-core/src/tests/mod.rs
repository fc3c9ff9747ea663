//! Unit tests for `ssjs_core` types.


mod behaviour;

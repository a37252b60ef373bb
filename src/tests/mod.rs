//! Test suite for the block registry and code generation
//!
//! Unit tests live next to the code they cover; the suites here exercise the
//! built-in blocks end to end.

#[cfg(test)]
mod property_tests;

//! Integration tests for gblur crates.
//!
//! End-to-end checks that decode, blur and encode together, plus the
//! numeric behaviour of the public blur API.

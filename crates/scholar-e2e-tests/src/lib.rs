//! End-to-end integration tests for Scholar.
//!
//! These tests exercise the crates together:
//! - Authorization over a populated directory and course catalog
//! - Roster import feeding the hierarchy and visibility rules
//! - Export of imported users

#![cfg(test)]

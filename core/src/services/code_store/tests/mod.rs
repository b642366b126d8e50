//! Tests for the code store

mod mocks;

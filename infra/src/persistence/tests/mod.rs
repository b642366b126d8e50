//! Tests for snapshot persistence

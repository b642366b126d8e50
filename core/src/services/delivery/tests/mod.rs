//! Tests for delivery backends and the dispatcher

//! Tests for the sliding-window rate limiter

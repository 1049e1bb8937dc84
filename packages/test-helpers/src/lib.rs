//! Helpers for testing the swarm canary.
pub mod configuration;
pub mod random;

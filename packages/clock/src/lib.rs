//! Time related functions and types.
//!
//! Components never read the system time directly. They go through a
//! clock type implementing [`clock::Time`] so tests can freeze and move time.
//!
//! Clocks use the type `DurationSinceUnixEpoch` which is a
//! `std::time::Duration` since the Unix Epoch (timestamp). The timestamp does
//! not depend on the time zone.

pub mod clock;
pub mod conv;
pub mod static_time;

#[macro_use]
extern crate lazy_static;

/// This code needs to be copied into each crate.
/// Working version, for production.
#[cfg(not(test))]
#[allow(dead_code)]
pub(crate) type CurrentClock = clock::Working;

/// Stopped version, for testing.
#[cfg(test)]
#[allow(dead_code)]
pub(crate) type CurrentClock = clock::Stopped;

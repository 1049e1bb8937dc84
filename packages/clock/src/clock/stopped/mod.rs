//! A clock that only moves when told to.
//!
//! The time is kept per thread, so tests running in parallel do not see
//! each other's changes. Every thread starts at the Unix Epoch when testing
//! and at the application start time otherwise.
use std::num::IntErrorKind;
use std::time::Duration;

use super::{DurationSinceUnixEpoch, Time};
use crate::clock;

#[allow(clippy::module_name_repetitions)]
pub struct StoppedClock {}

#[allow(clippy::module_name_repetitions)]
pub trait Stopped: clock::Time {
    /// It sets the clock to a given time.
    fn local_set(unix_time: &DurationSinceUnixEpoch);

    /// It sets the clock to the Unix Epoch.
    fn local_set_to_unix_epoch() {
        Self::local_set(&DurationSinceUnixEpoch::ZERO);
    }

    /// It sets the clock to the time the application started.
    fn local_set_to_app_start_time();

    /// It moves the clock forward.
    ///
    /// # Errors
    ///
    /// Will return `IntErrorKind` if `duration` would overflow the internal `Duration`.
    fn local_add(duration: &Duration) -> Result<(), IntErrorKind>;

    /// It moves the clock backwards.
    ///
    /// # Errors
    ///
    /// Will return `IntErrorKind` if `duration` would underflow the internal `Duration`.
    fn local_sub(duration: &Duration) -> Result<(), IntErrorKind>;

    /// It resets the clock to its default fixed time.
    fn local_reset();
}

impl Time for clock::Stopped {
    fn now() -> DurationSinceUnixEpoch {
        detail::FIXED_TIME.with(|time| *time.borrow())
    }

    fn dbg_clock_type() -> String {
        "Stopped".to_owned()
    }
}

impl Stopped for clock::Stopped {
    fn local_set(unix_time: &DurationSinceUnixEpoch) {
        detail::FIXED_TIME.with(|time| {
            *time.borrow_mut() = *unix_time;
        });
    }

    fn local_set_to_app_start_time() {
        Self::local_set(&detail::get_app_start_time());
    }

    fn local_add(duration: &Duration) -> Result<(), IntErrorKind> {
        let moved = Self::now().checked_add(*duration).ok_or(IntErrorKind::PosOverflow)?;
        Self::local_set(&moved);
        Ok(())
    }

    fn local_sub(duration: &Duration) -> Result<(), IntErrorKind> {
        let moved = Self::now().checked_sub(*duration).ok_or(IntErrorKind::NegOverflow)?;
        Self::local_set(&moved);
        Ok(())
    }

    fn local_reset() {
        Self::local_set(&detail::get_default_fixed_time());
    }
}


mod detail {
    use std::cell::RefCell;
    use std::time::SystemTime;

    use swarm_canary_primitives::DurationSinceUnixEpoch;

    use crate::static_time;

    thread_local!(pub static FIXED_TIME: RefCell<DurationSinceUnixEpoch> = RefCell::new(get_default_fixed_time()));

    pub fn get_app_start_time() -> DurationSinceUnixEpoch {
        (*static_time::TIME_AT_APP_START)
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
    }

    #[cfg(not(test))]
    pub fn get_default_fixed_time() -> DurationSinceUnixEpoch {
        get_app_start_time()
    }

    #[cfg(test)]
    pub fn get_default_fixed_time() -> DurationSinceUnixEpoch {
        DurationSinceUnixEpoch::ZERO
    }
}

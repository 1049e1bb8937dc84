use std::time::SystemTime;

use swarm_canary_primitives::DurationSinceUnixEpoch;

use crate::clock;

#[allow(clippy::module_name_repetitions)]
pub struct WorkingClock;

impl clock::Time for clock::Working {
    /// A system clock set before the Unix Epoch reads as the epoch itself.
    fn now() -> DurationSinceUnixEpoch {
        SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
    }

    fn dbg_clock_type() -> String {
        "Working".to_owned()
    }
}

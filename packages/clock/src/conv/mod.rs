use chrono::{DateTime, Utc};
use swarm_canary_primitives::DurationSinceUnixEpoch;

/// It converts a timestamp to a `DateTime::<Utc>`.
///
/// Timestamps too far in the future for `chrono` fall back to the Unix Epoch.
#[must_use]
pub fn convert_from_timestamp_to_datetime_utc(duration: DurationSinceUnixEpoch) -> DateTime<Utc> {
    i64::try_from(duration.as_secs())
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, duration.subsec_nanos()))
        .unwrap_or_default()
}

/// It converts a `DateTime::<Utc>` to a timestamp. Instants before the Unix
/// Epoch are clamped to it.
#[must_use]
pub fn convert_from_datetime_utc_to_timestamp(datetime_utc: &DateTime<Utc>) -> DurationSinceUnixEpoch {
    u64::try_from(datetime_utc.timestamp())
        .map(|secs| DurationSinceUnixEpoch::new(secs, datetime_utc.timestamp_subsec_nanos()))
        .unwrap_or_default()
}

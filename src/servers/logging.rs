/// This is the prefix used in logs to identify a started service.
///
/// For example:
///
/// ```text
/// 2026-06-25T12:36:25.025445Z  INFO HTTP TRACKER: Started on: http://0.0.0.0:3000
/// 2026-06-25T12:36:25.025527Z  INFO PEER LISTENER: Started on: tcp://0.0.0.0:16384
/// ```
pub const STARTED_ON: &str = "Started on";

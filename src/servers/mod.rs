//! Servers. Services that can be started and stopped.
//!
//! - [`http`]: the HTTP tracker, answering `announce` requests.
//! - [`peer`]: the peer listener, accepting handshakes on the advertised
//!   peer port.
pub mod http;
pub mod logging;
pub mod peer;
pub mod signals;

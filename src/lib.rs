//! **Swarm Canary** is a `BitTorrent` tracker and peer listener that watches a
//! single swarm and reports the network address of everybody who joins it.
//!
//! It is meant to check that a torrent client does not leak its real address:
//! add the canary torrent to a client that should only be reachable through a
//! VPN, and the canary runs your notify command for every address that is not
//! one of the expected ones.
//!
//! # Table of contents
//!
//! - [Features](#features)
//! - [Running](#running)
//! - [Configuration](#configuration)
//! - [Components](#components)
//!
//! # Features
//!
//! - An HTTP tracker (`BEP 3` announces, compact and normal peer lists).
//! - A peer wire listener answering the `BEP 3` handshake.
//! - A content hash computed from any local file, with the torrent file
//!   written next to it.
//! - A notify command run once per unexpected address and cooldown.
//!
//! # Running
//!
//! ```text
//! swarm-canary --notify "notify-send leak %IP" --file canary.txt --expected 198.51.100.7
//! ```
//!
//! The canary writes `file.torrent`, announcing to its own HTTP tracker. Add
//! it to the client under test. Every announce and every handshake is then
//! checked against the expected addresses.
//!
//! # Configuration
//!
//! The configuration is loaded from a TOML file given with `--config`, the
//! `SWARM_CANARY_CONFIG_TOML_PATH` environment variable or the whole document
//! in `SWARM_CANARY_CONFIG_TOML`. Single values can be overridden with
//! variables like `SWARM_CANARY_CONFIG_OVERRIDE_CANARY__COOLDOWN`. The command
//! line options win over both.
//!
//! Refer to the [`swarm-canary-configuration`](https://docs.rs/swarm-canary-configuration)
//! crate for every option.
//!
//! # Components
//!
//! - [`core`]: the canary service, the content hash and the evaluation of the
//!   observed addresses.
//! - [`servers`]: the HTTP tracker and the peer listener.
//! - [`bootstrap`] and [`app`]: the setup and the jobs.
use swarm_canary_clock::clock;

pub mod app;
pub mod bootstrap;
pub mod core;
pub mod servers;

/// This code needs to be copied into each crate.
/// Working version, for production.
#[cfg(not(test))]
pub(crate) type CurrentClock = clock::Working;

/// Stopped version, for testing.
#[cfg(test)]
pub(crate) type CurrentClock = clock::Stopped;

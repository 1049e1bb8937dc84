//! Peer listener.
//!
//! It listens on the port the canary advertises as its own peer in announce
//! responses. Clients that believe the swarm reach out there to start the
//! `BitTorrent` peer protocol, and that connection is a second, independent
//! observation of the address a client uses.
//!
//! Only the handshake is spoken. It's a fixed 68-byte message:
//!
//! Offset | Length | Content
//! ---|---|---
//! `0` | `1` | Length of the protocol name: `19`
//! `1` | `19` | `BitTorrent protocol`
//! `20` | `8` | Reserved bytes
//! `28` | `20` | Info hash
//! `48` | `20` | Peer id
//!
//! A connection for the tracked hash is reported to the canary and the peer
//! joins the swarm. When enabled, the listener answers with its own
//! handshake, and then the connection is closed. No content is ever
//! transferred.
//!
//! Connections with a different protocol name or hash are closed without a
//! report. The peer id of a connection for another hash is never read.
//!
//! Refer to [BEP 03. The `BitTorrent` Protocol Specification](https://www.bittorrent.org/beps/bep_0003.html).
pub mod handshake;
pub mod server;

pub const PEER_LISTENER_LOG_TARGET: &str = "PEER LISTENER";

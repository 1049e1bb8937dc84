//! HTTP Tracker.
//!
//! This module contains the canary's HTTP tracker. It responds to a single
//! `GET` request, the `announce`, used by clients to announce their presence
//! in the swarm. There is no `scrape`.
//!
//! ## Announce
//!
//! The tracker registers the peer and answers with the peers of the swarm.
//! The first one is always the canary's own peer listener, so the client
//! follows up with a handshake. The peer that made the request is never in the
//! list. By default the own peer is advertised on the address the client
//! reached the tracker at (see [`connection`]).
//!
//! Only the tracked hash is registered. Any other hash is answered with an
//! empty swarm.
//!
//! The address of the peer is always the source address of the TCP
//! connection. Proxy headers like `X-Forwarded-For` are never trusted and the
//! `ip` param is ignored: the canary is about the real network path.
//!
//! `Announce` responses are encoded in [bencoded](https://en.wikipedia.org/wiki/Bencode)
//! format.
//!
//! **Query parameters**
//!
//! Parameter | Type | Description | Required |  Default | Example
//! ---|---|---|---|---|---
//! [`info_hash`](crate::servers::http::v1::requests::announce::Announce::info_hash) | percent encoded of 20-byte array | The `Info Hash` of the torrent. | Yes | No | `%81%00%00%00%00%00%00%00%00%00%00%00%00%00%00%00%00%00%00%00`
//! [`peer_id`](crate::servers::http::v1::requests::announce::Announce::peer_id) | percent encoded of 20-byte array  | The ID of the peer. | Yes | No | `-qB00000000000000001`
//! [`port`](crate::servers::http::v1::requests::announce::Announce::port) | integer in `1..=65535` | The port used by the peer. | Yes | No | `17548`
//! [`downloaded`](crate::servers::http::v1::requests::announce::Announce::downloaded) | positive integer |The number of bytes downloaded by the peer. | No | `0` | `0`
//! [`uploaded`](crate::servers::http::v1::requests::announce::Announce::uploaded) | positive integer | The number of bytes uploaded by the peer. | No | `0` | `0`
//! [`left`](crate::servers::http::v1::requests::announce::Announce::left) | positive integer | The number of bytes pending to download. | No | `0` | `0`
//! [`event`](crate::servers::http::v1::requests::announce::Announce::event) | `started`, `completed`, `stopped` or `empty` | The event that triggered the `Announce` request. | No | `None` | `completed`
//! [`compact`](crate::servers::http::v1::requests::announce::Announce::compact) | `0` or `1` | Whether the tracker should return a compact peer list. | No | `None` | `0`
//!
//! The params are validated in this order: `info_hash`, `peer_id`, `port`.
//! A request that can't be parsed gets a `400 Bad Request` with a bencoded
//! failure reason:
//!
//! ```text
//! d14:failure reason...e
//! ```
//!
//! > **NOTICE**: the `info_hash` and `peer_id` params are NOT `URL` encoded
//! string params. They are the percent encoding of raw 20-byte arrays, which
//! can contain any bytes, not only well-formed UTF-8. Check the
//! [`percent_encoding`] module to know more about the encoding.
//!
//! **Sample announce URL**
//!
//! <http://0.0.0.0:3000/announce?info_hash=%81%00%00%00%00%00%00%00%00%00%00%00%00%00%00%00%00%00%00%00&downloaded=0&uploaded=0&peer_id=-qB00000000000000001&port=17548&left=0&event=started&compact=0>
//!
//! **Sample non-compact response**
//!
//! ```text
//! d8:completei1e10:incompletei1e8:intervali300e12:min intervali120e5:peersld2:ip9:127.0.0.17:peer id20:-SC0100-f3Xq1lB0mZ8c4:porti16384eee15:warning message26:Your IP is 203.0.113.5e
//! ```
//!
//! And represented as a json:
//!
//! ```json
//! {
//!     "complete": 1,
//!     "incomplete": 1,
//!     "interval": 300,
//!     "min interval": 120,
//!     "peers": [
//!        {
//!           "ip": "127.0.0.1",
//!           "peer id": "-SC0100-f3Xq1lB0mZ8c",
//!           "port": 16384
//!        }
//!     ],
//!     "warning message": "Your IP is 203.0.113.5"
//! }
//! ```
//!
//! **Sample compact response**
//!
//! IPv4 peers are packed in `peers` (6 bytes each) and IPv6 peers in
//! `peers6` (18 bytes each):
//!
//! ```json
//! {
//!     "complete": 1,
//!     "incomplete": 1,
//!     "interval": 300,
//!     "min interval": 120,
//!     "peers": "iiiipp",
//!     "peers6": "",
//!     "warning message": "Your IP is 203.0.113.5"
//! }
//! ```
//!
//! Refer to the [`responses`](crate::servers::http::v1::responses) module for
//! more information about the responses.
//!
//! **Protocol**
//!
//! - [BEP 03. The `BitTorrent` Protocol Specification](https://www.bittorrent.org/beps/bep_0003.html)
//! - [BEP 07. IPv6 Tracker Extension](https://www.bittorrent.org/beps/bep_0007.html)
//! - [BEP 23. Tracker Returns Compact Peer Lists](https://www.bittorrent.org/beps/bep_0023.html)
pub mod connection;
pub mod percent_encoding;
pub mod server;
pub mod v1;

pub const HTTP_TRACKER_LOG_TARGET: &str = "HTTP TRACKER";

//! Axum [`extractors`](axum::extract) for the HTTP server.
//!
//! The client address is not extracted here. It's always the source address of
//! the connection, taken with [`ConnectInfo`](axum::extract::ConnectInfo).
pub mod announce_request;

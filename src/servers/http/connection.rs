//! Per-connection data for the HTTP tracker handlers.
//!
//! Axum only hands the remote address to the handlers. The canary also needs
//! the local address of the connection: it is the address the client reached
//! the canary at, so it is the one advertised for the canary's own peer
//! listener when nothing else is configured.
//!
//! The [`LocalAddrAcceptor`] stores it in the request extensions of every
//! request served on the connection:
//!
//! ```text
//! axum_server::from_tcp(listener).acceptor(LocalAddrAcceptor)
//! ```
use std::future::Ready;
use std::net::SocketAddr;

use axum_server::accept::Accept;
use tokio::net::TcpStream;
use tower_http::add_extension::AddExtension;

/// The local address of the connection a request came in on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LocalAddr(pub SocketAddr);

#[derive(Clone, Copy, Debug, Default)]
pub struct LocalAddrAcceptor;

impl<S> Accept<TcpStream, S> for LocalAddrAcceptor {
    type Stream = TcpStream;
    type Service = AddExtension<S, LocalAddr>;
    type Future = Ready<std::io::Result<(Self::Stream, Self::Service)>>;

    fn accept(&self, stream: TcpStream, service: S) -> Self::Future {
        let accepted = stream
            .local_addr()
            .map(|local_addr| (stream, AddExtension::new(service, LocalAddr(local_addr))));

        std::future::ready(accepted)
    }
}


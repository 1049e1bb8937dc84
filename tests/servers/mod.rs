mod environment;
pub mod http;
pub mod peer;

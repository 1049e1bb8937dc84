use std::net::SocketAddr;

use reqwest::{Client as ReqwestClient, Response};

use super::requests::Query;

/// HTTP Tracker Client
pub struct Client {
    server_addr: SocketAddr,
    reqwest_client: ReqwestClient,
}

/// URL components in this context:
///
/// ```text
/// http://127.0.0.1:62304/announce?info_hash=%9C8B%22%13%E3%0B%FF%21%2B0%C3%60%D2o%9A%02%13d%22
/// \_____________________/\______/ \___________________________________________________________/
///            |               |                                   |
///         base url         path                                query
/// ```
impl Client {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self {
            server_addr,
            reqwest_client: reqwest::Client::builder().build().unwrap(),
        }
    }

    pub async fn announce(&self, query: &Query) -> Response {
        self.get(&format!("announce?{query}")).await
    }

    pub async fn get(&self, path: &str) -> Response {
        self.reqwest_client
            .get(format!("http://{}/{path}", self.server_addr))
            .send()
            .await
            .unwrap()
    }
}

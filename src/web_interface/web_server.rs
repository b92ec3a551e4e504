use std::net::{IpAddr, SocketAddr};

use log::info;

use super::handlers::AppState;
use super::routes::routes;
use crate::error_handling::types::WebError;

/// Web server for the HTTP API and dashboard
pub struct WebServer {
    state: AppState,
}

impl WebServer {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn socket_addr(bind_address: &str, port: u16) -> Result<SocketAddr, WebError> {
        let ip: IpAddr = bind_address
            .parse()
            .map_err(|_| WebError::InvalidAddress(bind_address.to_string()))?;
        Ok(SocketAddr::new(ip, port))
    }

    /// Serves until the process is stopped.
    pub async fn start(&self, addr: SocketAddr) -> Result<(), WebError> {
        info!("Web interface listening on http://{}", addr);
        warp::serve(routes(self.state.clone())).run(addr).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let addr = WebServer::socket_addr("0.0.0.0", 9000).unwrap();
        assert_eq!(addr.port(), 9000);
        assert!(matches!(
            WebServer::socket_addr("localhost", 80),
            Err(WebError::InvalidAddress(_))
        ));
    }
}

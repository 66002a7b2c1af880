use log::{error, info};
use std::io;
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::config::{GateConfig, is_auth_required};
use crate::error::GateError;
use crate::server::handlers::{AppState, router};
use crate::server::security::{check_deployment_security, log_advisories};

pub struct Server {
    listener: TcpListener,
    state: AppState,
}

impl Server {
    /// Reports startup advisories, builds shared state, and binds the listener.
    pub async fn new(config: &GateConfig) -> Result<Self, GateError> {
        let advisories =
            check_deployment_security(&config.bind_address, config.tls, is_auth_required(config));
        log_advisories(&advisories);

        let state = AppState::from_config(config)?;

        let address = config.listen_address();
        let listener = match TcpListener::bind(&address).await {
            Ok(listener) => {
                info!("Server bound to {}", address);
                listener
            }
            Err(e) => {
                error!("Failed to bind to {}: {}", address, e);
                return Err(e.into());
            }
        };

        info!(
            "Password authentication is {}",
            if state.authenticator.is_auth_required() {
                "enabled"
            } else {
                "disabled"
            }
        );

        Ok(Self { listener, state })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serves requests until Ctrl-C.
    pub async fn start(self) -> Result<(), GateError> {
        info!(
            "Serving login at http://{}{}login",
            self.local_addr()?,
            self.state.authenticator.base_url()
        );

        axum::serve(self.listener, router(self.state))
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

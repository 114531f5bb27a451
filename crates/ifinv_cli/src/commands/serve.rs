//! Serve command implementation.

use ifinv_core::{seed, RecordStore, SortMode};
use ifinv_server::{Credentials, InventoryServer, ServerConfig};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

/// Options for the serve command.
#[derive(Debug)]
pub struct ServeOptions {
    /// Listen address.
    pub bind: SocketAddr,
    /// JSON seed file.
    pub seed: Option<PathBuf>,
    /// Accepted username.
    pub username: String,
    /// Accepted password.
    pub password: String,
    /// Fixed token signing secret.
    pub jwt_secret: Option<String>,
    /// Token lifetime in seconds.
    pub token_expiry_secs: u64,
    /// Compare numeric fields as integers.
    pub numeric_sort: bool,
}

impl ServeOptions {
    /// Maps the command line onto a server configuration.
    pub fn to_config(&self) -> ServerConfig {
        let mut config = ServerConfig::new(self.bind)
            .with_credentials(Credentials::new(&self.username, &self.password))
            .with_token_expiry(Duration::from_secs(self.token_expiry_secs));

        if let Some(secret) = &self.jwt_secret {
            config = config.with_jwt_secret(secret.as_bytes().to_vec());
        }
        if self.numeric_sort {
            config = config.with_sort_mode(SortMode::Natural);
        }
        config
    }
}

/// Runs the serve command.
pub fn run(options: ServeOptions) -> Result<(), Box<dyn std::error::Error>> {
    let store = RecordStore::new();
    match &options.seed {
        Some(path) => {
            let added = store.load(seed::read_json(path)?);
            info!(path = %path.display(), added, "seeded record store");
        }
        None => warn!("no seed file given, starting with an empty inventory"),
    }

    let config = options.to_config();
    if options.jwt_secret.is_none() {
        info!("using a random token signing secret; tokens will not survive a restart");
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(InventoryServer::new(config, store).serve())?;
    Ok(())
}

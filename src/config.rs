use std::sync::Arc;

use anyhow::Context;

use crate::chain::AlgodNode;
use crate::db::Database;
use crate::state::AppState;

/// Public Algorand TestNet API, no token required.
pub const DEFAULT_ALGOD_URL: &str = "https://testnet-api.algonode.cloud";

pub struct AppConfig {
    pub algod_url: String,
    pub algod_token: String,
    pub database_url: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let algod_url =
            std::env::var("ALGOD_URL").unwrap_or_else(|_| DEFAULT_ALGOD_URL.to_string());

        let algod_token = std::env::var("ALGOD_TOKEN").unwrap_or_default();

        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let port = match std::env::var("PORT") {
            Ok(port) => port.parse().context("PORT must be a valid port number")?,
            Err(_) => 5000,
        };

        Ok(Self {
            algod_url,
            algod_token,
            database_url,
            port,
        })
    }

    pub async fn create_app_state(&self) -> anyhow::Result<AppState> {
        let node = AlgodNode::new(&self.algod_url, &self.algod_token)
            .context("Failed to create algod client")?;

        let db = Database::new(&self.database_url)
            .await
            .context("Failed to initialize database")?;
        log::info!("Database initialized successfully!");

        Ok(AppState::new(Arc::new(node), Arc::new(db)))
    }
}

// SPDX-License-Identifier: MPL-2.0
//! HTTP API.
//!
//! Routes:
//!
//! - `GET /weatherforecast` - five forecast records with localized summaries
//!
//! Every request passes through [`locale::negotiate_locale`] first, which
//! hands the chosen locale to the handler as an explicit extension.

pub mod forecast;
pub mod locale;

use crate::config::Config;
use crate::error::Result;
use crate::i18n::{ResourceCatalog, ResourceLocalizer};
use crate::weather::weather_scope;
use axum::routing::get;
use axum::{middleware, Router};
use std::sync::Arc;

pub use locale::RequestLocale;

/// Shared, read-only state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub weather: ResourceLocalizer,
    pub max_accept_language_values: usize,
}

impl AppState {
    pub fn new(catalog: Arc<ResourceCatalog>, max_accept_language_values: usize) -> Self {
        Self {
            weather: ResourceLocalizer::new(catalog, weather_scope()),
            max_accept_language_values,
        }
    }

    /// Loads the resource catalog described by the configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let catalog = ResourceCatalog::from_config(&config.localization)?;
        Ok(Self::new(
            Arc::new(catalog),
            config.localization.max_accept_language_values,
        ))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/weatherforecast", get(forecast::get_weather_forecast))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            locale::negotiate_locale,
        ))
        .with_state(state)
}

/// Binds the configured address and serves until Ctrl+C.
pub async fn serve(config: &Config) -> Result<()> {
    let state = AppState::from_config(config)?;
    let address = format!("{}:{}", config.server.bind_address, config.server.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %listener.local_addr()?, "listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

// SPDX-License-Identifier: MPL-2.0
//! HTTP client for the forecast endpoint.

use super::{LanguageService, PreferenceStore};
use crate::error::{Error, Result};
use crate::weather::WeatherForecast;
use reqwest::Url;

const FORECAST_PATH: &str = "weatherforecast";

pub struct ForecastClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ForecastClient {
    pub fn new(base_address: &str) -> Result<Self> {
        let mut base_url = Url::parse(base_address)
            .map_err(|error| Error::Config(format!("invalid API address {base_address}: {error}")))?;
        // Keep any path prefix when joining the endpoint.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
        })
    }

    pub fn endpoint(&self) -> Result<Url> {
        self.base_url
            .join(FORECAST_PATH)
            .map_err(|error| Error::Config(error.to_string()))
    }

    /// Fetches the forecast in the service's current language.
    pub async fn fetch_forecast<S: PreferenceStore>(
        &self,
        language: &LanguageService<S>,
    ) -> Result<Vec<WeatherForecast>> {
        let mut request = self.http.get(self.endpoint()?).build()?;
        language.configure_request(&mut request);
        tracing::debug!(url = %request.url(), language = %language.current_language(), "fetching forecast");

        let response = self.http.execute(request).await?.error_for_status()?;
        Ok(response.json().await?)
    }
}

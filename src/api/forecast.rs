// SPDX-License-Identifier: MPL-2.0
//! `GET /weatherforecast`.

use super::locale::RequestLocale;
use super::AppState;
use crate::weather::{self, WeatherForecast};
use axum::extract::State;
use axum::{Extension, Json};
use chrono::Local;

/// Returns the next days' forecast with summaries in the request locale.
pub async fn get_weather_forecast(
    State(state): State<AppState>,
    Extension(RequestLocale(locale)): Extension<RequestLocale>,
) -> Json<Vec<WeatherForecast>> {
    let today = Local::now().date_naive();
    let forecasts = weather::generate(&state.weather, &locale, today, &mut rand::rng());
    Json(forecasts)
}

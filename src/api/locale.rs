// SPDX-License-Identifier: MPL-2.0
//! Request locale negotiation middleware.

use super::AppState;
use crate::i18n::negotiate_header;
use axum::extract::{Request, State};
use axum::http::header::ACCEPT_LANGUAGE;
use axum::middleware::Next;
use axum::response::Response;
use unic_langid::LanguageIdentifier;

/// Locale chosen for the current request, stored in request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLocale(pub LanguageIdentifier);

/// Negotiates the request locale from `Accept-Language` once, before the
/// handler runs. Absent or unsupported values select the fallback locale.
pub async fn negotiate_locale(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let catalog = state.weather.catalog();
    let header = req
        .headers()
        .get(ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok());
    let locale = negotiate_header(
        header,
        catalog.supported_locales(),
        catalog.fallback_locale(),
        state.max_accept_language_values,
    );
    tracing::debug!(accept_language = ?header, %locale, "negotiated request locale");

    req.extensions_mut().insert(RequestLocale(locale));
    next.run(req).await
}

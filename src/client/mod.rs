// SPDX-License-Identifier: MPL-2.0
//! Client-side language preference and API access.
//!
//! [`LanguageService`] remembers the user's language across sessions and
//! stamps it on outgoing requests as `Accept-Language`. [`ForecastClient`]
//! uses it to fetch localized forecasts from the API.

pub mod forecast;
pub mod storage;

pub use forecast::ForecastClient;
pub use storage::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};

use reqwest::header::{HeaderValue, ACCEPT_LANGUAGE};
use tokio::sync::watch;
use unic_langid::{langid, LanguageIdentifier};

/// Storage key of the persisted language tag.
pub const SELECTED_LANGUAGE_KEY: &str = "selectedLanguage";

/// Language used until a supported preference is restored or chosen.
pub const DEFAULT_LANGUAGE: LanguageIdentifier = langid!("en-US");

/// Languages offered to the user, with their native display names.
pub fn supported_languages() -> Vec<(LanguageIdentifier, &'static str)> {
    vec![(langid!("en-US"), "English"), (langid!("hu"), "Magyar")]
}

pub struct LanguageService<S> {
    store: S,
    current: LanguageIdentifier,
    supported: Vec<(LanguageIdentifier, &'static str)>,
    changes: watch::Sender<LanguageIdentifier>,
}

impl<S: PreferenceStore> LanguageService<S> {
    pub fn new(store: S) -> Self {
        Self::with_languages(store, DEFAULT_LANGUAGE, supported_languages())
    }

    pub fn with_languages(
        store: S,
        default: LanguageIdentifier,
        supported: Vec<(LanguageIdentifier, &'static str)>,
    ) -> Self {
        let (changes, _) = watch::channel(default.clone());
        Self {
            store,
            current: default,
            supported,
            changes,
        }
    }

    pub fn current_language(&self) -> &LanguageIdentifier {
        &self.current
    }

    pub fn supported_languages(&self) -> &[(LanguageIdentifier, &'static str)] {
        &self.supported
    }

    pub fn is_supported(&self, language: &LanguageIdentifier) -> bool {
        self.supported.iter().any(|(supported, _)| supported == language)
    }

    pub fn display_name(&self, language: &LanguageIdentifier) -> Option<&'static str> {
        self.supported
            .iter()
            .find(|(supported, _)| supported == language)
            .map(|(_, name)| *name)
    }

    /// Receiver that observes every [`set_language`](Self::set_language).
    pub fn subscribe(&self) -> watch::Receiver<LanguageIdentifier> {
        self.changes.subscribe()
    }

    /// Switches language, notifies subscribers and persists the choice.
    ///
    /// A failed write is logged; the in-memory switch still applies.
    pub fn set_language(&mut self, language: LanguageIdentifier) {
        self.current = language.clone();
        self.changes.send_replace(language);

        let tag = self.current.to_string();
        if let Err(error) = self.store.set_item(SELECTED_LANGUAGE_KEY, &tag) {
            tracing::warn!(%error, language = %tag, "failed to persist language preference");
        }
    }

    /// Restores a previously persisted language if it is supported.
    ///
    /// Storage failures and unknown tags leave the current language as is.
    pub fn initialize(&mut self) {
        let saved = match self.store.get_item(SELECTED_LANGUAGE_KEY) {
            Ok(Some(saved)) if !saved.is_empty() => saved,
            Ok(_) => return,
            Err(error) => {
                tracing::debug!(%error, "language preference unavailable, keeping default");
                return;
            }
        };

        match saved.parse::<LanguageIdentifier>() {
            Ok(language) if self.is_supported(&language) => {
                self.changes.send_if_modified(|value| {
                    *value = language.clone();
                    false
                });
                self.current = language;
            }
            _ => tracing::debug!(saved = %saved, "ignoring unsupported saved language"),
        }
    }

    /// Replaces any `Accept-Language` on `request` with the current language.
    pub fn configure_request(&self, request: &mut reqwest::Request) {
        let headers = request.headers_mut();
        headers.remove(ACCEPT_LANGUAGE);
        match HeaderValue::from_str(&self.current.to_string()) {
            Ok(value) => {
                headers.insert(ACCEPT_LANGUAGE, value);
            }
            Err(error) => tracing::warn!(%error, "language tag is not a valid header value"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;
    use std::sync::Arc;

    fn hu() -> LanguageIdentifier {
        langid!("hu")
    }

    fn request() -> reqwest::Request {
        let url = reqwest::Url::parse("http://localhost:5122/weatherforecast").expect("valid url");
        reqwest::Request::new(Method::GET, url)
    }

    #[test]
    fn starts_with_default_language() {
        let service = LanguageService::new(MemoryPreferenceStore::new());
        assert_eq!(service.current_language(), &DEFAULT_LANGUAGE);
    }

    #[test]
    fn set_language_persists_and_initialize_restores() {
        let store = Arc::new(MemoryPreferenceStore::new());
        let mut first = LanguageService::new(Arc::clone(&store));
        first.set_language(hu());

        let mut second = LanguageService::new(store);
        second.initialize();

        assert_eq!(second.current_language(), &hu());
    }

    #[test]
    fn initialize_with_unavailable_storage_keeps_default() {
        let mut service = LanguageService::new(MemoryPreferenceStore::unavailable());
        service.initialize();
        assert_eq!(service.current_language(), &DEFAULT_LANGUAGE);
    }

    #[test]
    fn set_language_with_unavailable_storage_still_switches() {
        let mut service = LanguageService::new(MemoryPreferenceStore::unavailable());
        service.set_language(hu());
        assert_eq!(service.current_language(), &hu());
    }

    #[test]
    fn initialize_ignores_unsupported_saved_language() {
        let store = MemoryPreferenceStore::new();
        store.set_item(SELECTED_LANGUAGE_KEY, "fr-FR").expect("write");
        let mut service = LanguageService::new(store);

        service.initialize();

        assert_eq!(service.current_language(), &DEFAULT_LANGUAGE);
    }

    #[test]
    fn initialize_ignores_malformed_saved_language() {
        let store = MemoryPreferenceStore::new();
        store.set_item(SELECTED_LANGUAGE_KEY, "not a tag").expect("write");
        let mut service = LanguageService::new(store);

        service.initialize();

        assert_eq!(service.current_language(), &DEFAULT_LANGUAGE);
    }

    #[test]
    fn set_language_notifies_subscribers() {
        let mut service = LanguageService::new(MemoryPreferenceStore::new());
        let mut receiver = service.subscribe();

        service.set_language(hu());

        assert!(receiver.has_changed().expect("sender alive"));
        assert_eq!(*receiver.borrow_and_update(), hu());
    }

    #[test]
    fn initialize_does_not_notify_subscribers() {
        let store = MemoryPreferenceStore::new();
        store.set_item(SELECTED_LANGUAGE_KEY, "hu").expect("write");
        let mut service = LanguageService::new(store);
        let receiver = service.subscribe();

        service.initialize();

        assert!(!receiver.has_changed().expect("sender alive"));
        assert_eq!(*receiver.borrow(), hu());
    }

    #[test]
    fn configure_request_replaces_accept_language() {
        let mut service = LanguageService::new(MemoryPreferenceStore::new());
        service.set_language(hu());
        let mut request = request();
        request
            .headers_mut()
            .append(ACCEPT_LANGUAGE, HeaderValue::from_static("de"));
        request
            .headers_mut()
            .append(ACCEPT_LANGUAGE, HeaderValue::from_static("fr"));

        service.configure_request(&mut request);

        let values: Vec<_> = request
            .headers()
            .get_all(ACCEPT_LANGUAGE)
            .iter()
            .map(|value| value.to_str().expect("ascii header").to_string())
            .collect();
        assert_eq!(values, vec!["hu".to_string()]);
    }

    #[test]
    fn display_names_cover_supported_languages() {
        let service = LanguageService::new(MemoryPreferenceStore::new());
        assert_eq!(service.display_name(&hu()), Some("Magyar"));
        assert_eq!(service.display_name(&DEFAULT_LANGUAGE), Some("English"));
        assert_eq!(service.display_name(&langid!("fr")), None);
    }
}

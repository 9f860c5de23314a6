// SPDX-License-Identifier: MPL-2.0
//! Resource localizer bound to one scope.

use super::{ResourceCatalog, ResourceScope};
use fluent_bundle::FluentArgs;
use std::sync::Arc;
use unic_langid::LanguageIdentifier;

/// Resolves keys of one resource scope to strings for a given locale.
///
/// Resolution order: the requested locale's table, then the fallback
/// locale's table, then the catalog's [`MissingKeyPolicy`](super::MissingKeyPolicy).
/// Lookups never fail and have no side effects; clones share the catalog.
#[derive(Clone)]
pub struct ResourceLocalizer {
    catalog: Arc<ResourceCatalog>,
    scope: ResourceScope,
}

impl ResourceLocalizer {
    pub fn new(catalog: Arc<ResourceCatalog>, scope: ResourceScope) -> Self {
        if !catalog.has_scope(&scope) {
            tracing::warn!(%scope, "localizer bound to a scope without resources");
        }
        Self { catalog, scope }
    }

    pub fn scope(&self) -> &ResourceScope {
        &self.scope
    }

    pub fn catalog(&self) -> &ResourceCatalog {
        &self.catalog
    }

    pub fn localize(&self, key: &str, locale: &LanguageIdentifier) -> String {
        self.localize_with_args(key, locale, None)
    }

    /// Like [`localize`](Self::localize), substituting Fluent arguments.
    pub fn localize_with_args(
        &self,
        key: &str,
        locale: &LanguageIdentifier,
        args: Option<&FluentArgs>,
    ) -> String {
        self.catalog
            .lookup(&self.scope, key, locale, args)
            .unwrap_or_else(|| {
                tracing::debug!(scope = %self.scope, key, %locale, "missing translation");
                self.catalog.missing_key_policy().apply(key)
            })
    }

    /// Resolves with fallback but without the missing-key policy.
    pub fn try_localize(&self, key: &str, locale: &LanguageIdentifier) -> Option<String> {
        self.catalog.lookup(&self.scope, key, locale, None)
    }
}

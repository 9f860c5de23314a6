// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support.
//!
//! Localized strings live in Fluent (`.ftl`) resource tables, one table per
//! resource scope and locale. The catalog loads every table once at startup;
//! a [`ResourceLocalizer`] bound to one scope then resolves keys against it.
//!
//! # Features
//!
//! - Embedded `assets/i18n/<scope>/<locale>.ftl` tables, or the same layout
//!   loaded from a directory
//! - Per-key fallback to the fallback locale
//! - `Accept-Language` parsing and negotiation against the supported locales
//! - Coverage reports listing keys a locale has not translated yet

pub mod catalog;
pub mod localizer;
pub mod negotiation;
pub mod scope;

pub use catalog::{CoverageReport, ResourceCatalog, ResourceCatalogBuilder};
pub use localizer::ResourceLocalizer;
pub use negotiation::{negotiate, negotiate_header, parent_chain, parse_accept_language};
pub use scope::ResourceScope;

use serde::{Deserialize, Serialize};

/// What a lookup yields when the key exists in no table of the scope.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum MissingKeyPolicy {
    /// Return the key unchanged.
    #[default]
    ReturnKey,
    /// Return an empty string.
    Empty,
}

impl MissingKeyPolicy {
    pub fn apply(self, key: &str) -> String {
        match self {
            MissingKeyPolicy::ReturnKey => key.to_string(),
            MissingKeyPolicy::Empty => String::new(),
        }
    }
}

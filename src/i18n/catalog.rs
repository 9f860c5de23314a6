// SPDX-License-Identifier: MPL-2.0
//! Resource catalog: every (scope, locale) table, loaded once.
//!
//! Tables are Fluent resources. Each message id is a lookup key and its
//! value pattern is the localized string. After [`ResourceCatalogBuilder::build`]
//! the catalog is read-only; bundles use the concurrent memoizer so a
//! shared catalog can serve lookups from any number of tasks.

use super::{MissingKeyPolicy, ResourceScope};
use crate::config::LocalizationConfig;
use crate::error::{Error, Result};
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource};
use fluent_syntax::ast::Entry;
use rust_embed::RustEmbed;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;
use unic_langid::LanguageIdentifier;

#[derive(RustEmbed)]
#[folder = "assets/i18n/"]
struct Asset;

const RESOURCE_EXTENSION: &str = "ftl";

/// Key → localized value mapping for one scope and locale.
struct ResourceTable {
    keys: BTreeSet<String>,
    bundle: FluentBundle<FluentResource>,
}

impl ResourceTable {
    fn new(locale: LanguageIdentifier) -> Self {
        let mut bundle = FluentBundle::new_concurrent(vec![locale]);
        // Values are served verbatim; no bidi isolation marks around arguments.
        bundle.set_use_isolating(false);
        Self {
            keys: BTreeSet::new(),
            bundle,
        }
    }

    fn add_source(&mut self, origin: &str, source: String) -> Result<()> {
        let resource = FluentResource::try_new(source).map_err(|(_, errors)| {
            Error::Resource(format!("failed to parse {}: {:?}", origin, errors))
        })?;

        let keys: Vec<String> = resource
            .entries()
            .filter_map(|entry| match entry {
                Entry::Message(message) if message.value.is_some() => {
                    Some(message.id.name.to_string())
                }
                _ => None,
            })
            .collect();

        self.bundle.add_resource(resource).map_err(|errors| {
            Error::Resource(format!("failed to register {}: {:?}", origin, errors))
        })?;
        self.keys.extend(keys);
        Ok(())
    }

    /// Formats `key`, or `None` if the table lacks it or formatting fails.
    fn format(&self, key: &str, args: Option<&FluentArgs>) -> Option<String> {
        let message = self.bundle.get_message(key)?;
        let pattern = message.value()?;
        let mut errors = vec![];
        let value = self.bundle.format_pattern(pattern, args, &mut errors);
        if errors.is_empty() {
            Some(value.into_owned())
        } else {
            tracing::debug!(key, ?errors, "failed to format localized value");
            None
        }
    }
}

/// Which fallback keys one locale has not translated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageReport {
    pub scope: ResourceScope,
    pub locale: LanguageIdentifier,
    /// Number of keys in the fallback table.
    pub total: usize,
    /// Fallback keys absent from this locale's table, sorted.
    pub missing: Vec<String>,
}

impl CoverageReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Translated share of the fallback keys, in `[0, 100]`.
    pub fn coverage_percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        let translated = self.total.saturating_sub(self.missing.len());
        translated as f64 * 100.0 / self.total as f64
    }
}

pub struct ResourceCatalog {
    tables: HashMap<ResourceScope, HashMap<LanguageIdentifier, ResourceTable>>,
    supported: Vec<LanguageIdentifier>,
    fallback: LanguageIdentifier,
    missing_key_policy: MissingKeyPolicy,
}

impl ResourceCatalog {
    pub fn builder(
        fallback: LanguageIdentifier,
        supported: Vec<LanguageIdentifier>,
    ) -> ResourceCatalogBuilder {
        ResourceCatalogBuilder {
            fallback,
            supported,
            missing_key_policy: MissingKeyPolicy::default(),
            sources: Vec::new(),
        }
    }

    /// Loads the catalog described by `config`: from `resources_dir` when
    /// set, otherwise from the resources embedded in the binary.
    pub fn from_config(config: &LocalizationConfig) -> Result<Self> {
        match &config.resources_dir {
            Some(dir) => Self::from_dir(dir, config),
            None => Self::embedded(config),
        }
    }

    /// Loads the `<scope>/<locale>.ftl` tables embedded at build time.
    pub fn embedded(config: &LocalizationConfig) -> Result<Self> {
        let mut builder = Self::builder_for(config)?;

        for file in Asset::iter() {
            let path = file.as_ref();
            let Some((scope, locale)) = parse_resource_path(path) else {
                tracing::warn!(path, "skipping embedded file outside the resource layout");
                continue;
            };
            if let Some(content) = Asset::get(path) {
                let source = String::from_utf8_lossy(content.data.as_ref()).into_owned();
                builder = builder.add_source(scope, locale, source);
            }
        }

        builder.build()
    }

    /// Loads `<scope>/<locale>.ftl` tables from a directory on disk.
    pub fn from_dir(dir: &Path, config: &LocalizationConfig) -> Result<Self> {
        let mut builder = Self::builder_for(config)?;

        let mut scope_dirs: Vec<_> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|entry| entry.path()))
            .filter(|path| path.is_dir())
            .collect();
        scope_dirs.sort();

        for scope_dir in scope_dirs {
            let Some(scope_name) = scope_dir.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            let scope_name = scope_name.to_string();

            let mut files: Vec<_> = fs::read_dir(&scope_dir)?
                .filter_map(|entry| entry.ok().map(|entry| entry.path()))
                .filter(|path| {
                    path.extension().and_then(|ext| ext.to_str()) == Some(RESOURCE_EXTENSION)
                })
                .collect();
            files.sort();

            for file in files {
                let Some(tag) = file.file_stem().and_then(|stem| stem.to_str()) else {
                    continue;
                };
                let Ok(locale) = tag.parse::<LanguageIdentifier>() else {
                    tracing::warn!(path = %file.display(), "skipping resource with invalid locale tag");
                    continue;
                };
                let source = fs::read_to_string(&file)?;
                builder = builder.add_source(ResourceScope::local(scope_name.as_str()), locale, source);
            }
        }

        builder.build()
    }

    fn builder_for(config: &LocalizationConfig) -> Result<ResourceCatalogBuilder> {
        let (fallback, supported) = config.locales()?;
        Ok(Self::builder(fallback, supported).missing_key_policy(config.missing_key_policy))
    }

    pub fn fallback_locale(&self) -> &LanguageIdentifier {
        &self.fallback
    }

    pub fn supported_locales(&self) -> &[LanguageIdentifier] {
        &self.supported
    }

    pub fn missing_key_policy(&self) -> MissingKeyPolicy {
        self.missing_key_policy
    }

    pub fn has_scope(&self, scope: &ResourceScope) -> bool {
        self.tables.contains_key(scope)
    }

    /// Scopes with at least one table, sorted.
    pub fn scopes(&self) -> Vec<&ResourceScope> {
        let mut scopes: Vec<_> = self.tables.keys().collect();
        scopes.sort();
        scopes
    }

    /// Keys of one table, sorted. Empty if the table does not exist.
    pub fn keys(&self, scope: &ResourceScope, locale: &LanguageIdentifier) -> Vec<&str> {
        self.table(scope, locale)
            .map(|table| table.keys.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Resolves `key` in `locale`, then in the fallback locale.
    ///
    /// Returns `None` only when neither table has a usable value.
    pub fn lookup(
        &self,
        scope: &ResourceScope,
        key: &str,
        locale: &LanguageIdentifier,
        args: Option<&FluentArgs>,
    ) -> Option<String> {
        if let Some(value) = self
            .table(scope, locale)
            .and_then(|table| table.format(key, args))
        {
            return Some(value);
        }
        if locale == &self.fallback {
            return None;
        }
        self.table(scope, &self.fallback)
            .and_then(|table| table.format(key, args))
    }

    /// Compares a locale's table against the fallback table.
    pub fn coverage(&self, scope: &ResourceScope, locale: &LanguageIdentifier) -> CoverageReport {
        let reference = self
            .table(scope, &self.fallback)
            .map(|table| &table.keys);
        let translated = self.table(scope, locale).map(|table| &table.keys);

        let missing = match reference {
            Some(reference) => reference
                .iter()
                .filter(|key| translated.is_none_or(|keys| !keys.contains(*key)))
                .cloned()
                .collect(),
            None => Vec::new(),
        };

        CoverageReport {
            scope: scope.clone(),
            locale: locale.clone(),
            total: reference.map_or(0, BTreeSet::len),
            missing,
        }
    }

    /// Coverage of every supported locale in every scope.
    pub fn coverage_reports(&self) -> Vec<CoverageReport> {
        self.scopes()
            .into_iter()
            .flat_map(|scope| {
                self.supported
                    .iter()
                    .filter(|locale| **locale != self.fallback)
                    .map(move |locale| self.coverage(scope, locale))
            })
            .collect()
    }

    fn table(&self, scope: &ResourceScope, locale: &LanguageIdentifier) -> Option<&ResourceTable> {
        self.tables.get(scope)?.get(locale)
    }
}

pub struct ResourceCatalogBuilder {
    fallback: LanguageIdentifier,
    supported: Vec<LanguageIdentifier>,
    missing_key_policy: MissingKeyPolicy,
    sources: Vec<(ResourceScope, LanguageIdentifier, String)>,
}

impl ResourceCatalogBuilder {
    pub fn missing_key_policy(mut self, policy: MissingKeyPolicy) -> Self {
        self.missing_key_policy = policy;
        self
    }

    /// Queues Fluent source for one (scope, locale) table. Several sources
    /// for the same table are merged; duplicate keys fail the build.
    pub fn add_source(
        mut self,
        scope: ResourceScope,
        locale: LanguageIdentifier,
        source: impl Into<String>,
    ) -> Self {
        self.sources.push((scope, locale, source.into()));
        self
    }

    pub fn build(self) -> Result<ResourceCatalog> {
        let mut supported = self.supported;
        if !supported.contains(&self.fallback) {
            supported.insert(0, self.fallback.clone());
        }

        let mut tables: HashMap<ResourceScope, HashMap<LanguageIdentifier, ResourceTable>> =
            HashMap::new();
        for (scope, locale, source) in self.sources {
            if !supported.contains(&locale) {
                tracing::debug!(%scope, %locale, "ignoring resources for unsupported locale");
                continue;
            }
            let origin = format!("{}/{}", scope, locale);
            tables
                .entry(scope)
                .or_default()
                .entry(locale.clone())
                .or_insert_with(|| ResourceTable::new(locale))
                .add_source(&origin, source)?;
        }

        let catalog = ResourceCatalog {
            tables,
            supported,
            fallback: self.fallback,
            missing_key_policy: self.missing_key_policy,
        };

        tracing::info!(
            scopes = catalog.tables.len(),
            locales = catalog.supported.len(),
            fallback = %catalog.fallback,
            "loaded resource catalog"
        );
        for report in catalog.coverage_reports() {
            if !report.is_complete() {
                tracing::warn!(
                    scope = %report.scope,
                    locale = %report.locale,
                    missing = ?report.missing,
                    "locale falls back for untranslated keys"
                );
            }
        }

        Ok(catalog)
    }
}

/// Splits `weather/en-US.ftl` into its scope and locale.
fn parse_resource_path(path: &str) -> Option<(ResourceScope, LanguageIdentifier)> {
    let (scope, file) = path.split_once('/')?;
    let tag = file.strip_suffix(".ftl")?;
    if scope.is_empty() || tag.contains('/') {
        return None;
    }
    let locale = tag.parse().ok()?;
    Some((ResourceScope::local(scope), locale))
}

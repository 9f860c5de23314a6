// SPDX-License-Identifier: MPL-2.0
//! Property-based invariant tests for resolution and negotiation.
//!
//! 1. A key translated in a locale resolves to that locale's value
//! 2. A key only in the fallback table resolves to the fallback value
//! 3. A key in no table resolves to itself, deterministically
//! 4. Locales without tables resolve exactly like the fallback
//! 5. Negotiation always yields a supported locale and never panics
//! 6. Requesting a supported tag selects it

use localization_demo::i18n::{
    negotiate_header, MissingKeyPolicy, ResourceCatalog, ResourceLocalizer, ResourceScope,
};
use proptest::prelude::*;
use std::collections::BTreeMap;
use std::sync::Arc;
use unic_langid::{langid, LanguageIdentifier};

// ── Helpers ──────────────────────────────────────────────────────────

const FALLBACK: LanguageIdentifier = langid!("en-US");
const HUNGARIAN: LanguageIdentifier = langid!("hu");

fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,10}"
}

/// Keys that never collide with generated table keys.
fn absent_key_strategy() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{0,8}"
}

/// Plain Fluent text: no placeables, no surrounding whitespace.
fn value_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9]([A-Za-z0-9 ]{0,14}[A-Za-z0-9])?"
}

fn table_strategy(min: usize) -> impl Strategy<Value = BTreeMap<String, String>> {
    prop::collection::btree_map(key_strategy(), value_strategy(), min..12)
}

fn to_source(table: &BTreeMap<String, String>) -> String {
    table
        .iter()
        .map(|(key, value)| format!("{key} = {value}\n"))
        .collect()
}

fn localizer(
    fallback: &BTreeMap<String, String>,
    hungarian: &BTreeMap<String, String>,
) -> ResourceLocalizer {
    let scope = ResourceScope::local("generated");
    let catalog = ResourceCatalog::builder(FALLBACK, vec![FALLBACK, HUNGARIAN])
        .missing_key_policy(MissingKeyPolicy::ReturnKey)
        .add_source(scope.clone(), FALLBACK, to_source(fallback))
        .add_source(scope.clone(), HUNGARIAN, to_source(hungarian))
        .build()
        .expect("generated tables should build");
    ResourceLocalizer::new(Arc::new(catalog), scope)
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Translated keys resolve to the locale's own value
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn translated_key_uses_locale_table(
        fallback in table_strategy(1),
        hungarian in table_strategy(0),
    ) {
        let localizer = localizer(&fallback, &hungarian);
        for (key, value) in &hungarian {
            prop_assert_eq!(&localizer.localize(key, &HUNGARIAN), value);
        }
        for (key, value) in &fallback {
            prop_assert_eq!(&localizer.localize(key, &FALLBACK), value);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Untranslated keys fall back per key
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn untranslated_key_uses_fallback_value(
        fallback in table_strategy(1),
        hungarian in table_strategy(0),
    ) {
        let localizer = localizer(&fallback, &hungarian);
        for (key, value) in fallback.iter().filter(|(key, _)| !hungarian.contains_key(*key)) {
            prop_assert_eq!(&localizer.localize(key, &HUNGARIAN), value);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Keys missing everywhere resolve to themselves, every time
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn missing_key_returns_key(
        fallback in table_strategy(0),
        hungarian in table_strategy(0),
        key in absent_key_strategy(),
    ) {
        let localizer = localizer(&fallback, &hungarian);
        let first = localizer.localize(&key, &HUNGARIAN);
        let second = localizer.localize(&key, &HUNGARIAN);
        prop_assert_eq!(&first, &key);
        prop_assert_eq!(first, second);
        prop_assert!(localizer.try_localize(&key, &FALLBACK).is_none());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Locales without tables behave like the fallback
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn locale_without_table_matches_fallback(
        fallback in table_strategy(1),
        hungarian in table_strategy(0),
        key in key_strategy(),
    ) {
        let localizer = localizer(&fallback, &hungarian);
        let french: LanguageIdentifier = langid!("fr-FR");
        prop_assert_eq!(
            localizer.localize(&key, &french),
            localizer.localize(&key, &FALLBACK)
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Negotiation is total over arbitrary headers
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn negotiation_always_yields_supported_locale(header in ".{0,64}", max in 0usize..6) {
        let supported = vec![FALLBACK, HUNGARIAN];
        let locale = negotiate_header(Some(header.as_str()), &supported, &FALLBACK, max);
        prop_assert!(supported.contains(&locale), "negotiated {} from {:?}", locale, header);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Supported tags select themselves
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn supported_tag_selects_itself(
        pick_hungarian in any::<bool>(),
        quality in 1u32..=1000,
    ) {
        let supported = vec![FALLBACK, HUNGARIAN];
        let wanted = if pick_hungarian { HUNGARIAN } else { FALLBACK };
        let header = format!("{};q={}", wanted, f64::from(quality) / 1000.0);
        let locale = negotiate_header(Some(header.as_str()), &supported, &FALLBACK, 3);
        prop_assert_eq!(locale, wanted);
    }
}

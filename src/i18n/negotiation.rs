// SPDX-License-Identifier: MPL-2.0
//! Locale negotiation for inbound requests.
//!
//! The client's `Accept-Language` header is turned into an ordered list of
//! preferred locales, and the first one the server supports wins. A
//! requested locale matches a supported one exactly or through one of its
//! parents, so `hu-HU` selects `hu` while `en-GB` does not select `en-US`.
//! When nothing matches, the fallback locale is used.

use unic_langid::LanguageIdentifier;

/// Parses an `Accept-Language` value into locales, most preferred first.
///
/// Only the first `max_values` entries of the header are considered. Among
/// those, ranges are ordered by descending `q` weight (ties keep header
/// order). Ranges with `q=0` or a malformed weight, the `*` wildcard and
/// tags that are not valid locale identifiers are dropped.
pub fn parse_accept_language(header: &str, max_values: usize) -> Vec<LanguageIdentifier> {
    let mut ranges: Vec<(LanguageIdentifier, f32)> = header
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .take(max_values)
        .filter_map(|part| {
            let mut pieces = part.split(';');
            let tag = pieces.next()?.trim();
            if tag.is_empty() || tag == "*" {
                return None;
            }
            let quality = match pieces.find_map(|param| param.trim().strip_prefix("q=")) {
                Some(weight) => weight.trim().parse::<f32>().ok()?,
                None => 1.0,
            };
            if quality <= 0.0 {
                return None;
            }
            Some((tag.parse().ok()?, quality))
        })
        .collect();

    ranges.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranges.into_iter().map(|(tag, _)| tag).collect()
}

/// Returns `locale` followed by its parents, most specific first.
///
/// Variants are dropped first, then the region, then the script:
/// `sr-Latn-RS` yields `sr-Latn-RS`, `sr-Latn`, `sr`.
pub fn parent_chain(locale: &LanguageIdentifier) -> Vec<LanguageIdentifier> {
    let mut chain = vec![locale.clone()];
    let mut current = locale.clone();
    loop {
        if current.variants().next().is_some() {
            current.clear_variants();
        } else if current.region.is_some() {
            current.region = None;
        } else if current.script.is_some() {
            current.script = None;
        } else {
            return chain;
        }
        chain.push(current.clone());
    }
}

/// Picks the first requested locale supported exactly or through a parent,
/// or `fallback`.
pub fn negotiate(
    requested: &[LanguageIdentifier],
    supported: &[LanguageIdentifier],
    fallback: &LanguageIdentifier,
) -> LanguageIdentifier {
    requested
        .iter()
        .find_map(|locale| {
            parent_chain(locale)
                .into_iter()
                .find(|candidate| supported.contains(candidate))
        })
        .unwrap_or_else(|| fallback.clone())
}

/// Negotiates directly from an optional `Accept-Language` header value.
pub fn negotiate_header(
    header: Option<&str>,
    supported: &[LanguageIdentifier],
    fallback: &LanguageIdentifier,
    max_values: usize,
) -> LanguageIdentifier {
    match header {
        Some(value) => negotiate(&parse_accept_language(value, max_values), supported, fallback),
        None => fallback.clone(),
    }
}

// SPDX-License-Identifier: MPL-2.0
//! `localization_demo` resolves culture-specific strings for a minimal
//! weather forecast HTTP API.
//!
//! Strings live in per-locale Fluent tables grouped by resource scope. Each
//! request's locale is negotiated from `Accept-Language` and passed
//! explicitly to a [`ResourceLocalizer`](i18n::ResourceLocalizer), which
//! falls back to the default locale key by key. A companion client keeps the
//! user's language across sessions and sends it with every request.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod i18n;
pub mod logging;
pub mod paths;
pub mod weather;

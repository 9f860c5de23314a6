// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.

// ==========================================================================
// Server Defaults
// ==========================================================================

/// Address the HTTP API binds to.
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";

/// Port the HTTP API listens on.
pub const DEFAULT_PORT: u16 = 5122;

// ==========================================================================
// Localization Defaults
// ==========================================================================

/// Fallback locale used whenever negotiation or a lookup misses.
pub const DEFAULT_LOCALE: &str = "en-US";

/// Locales the API serves, fallback first.
pub const DEFAULT_SUPPORTED_LOCALES: &[&str] = &["en-US", "hu"];

/// How many `Accept-Language` ranges are tried before giving up.
pub const DEFAULT_MAX_ACCEPT_LANGUAGE_VALUES: usize = 3;

// ==========================================================================
// Client Defaults
// ==========================================================================

/// Base address the forecast client talks to.
pub const DEFAULT_API_BASE_ADDRESS: &str = "http://localhost:5122";

// ==========================================================================
// Forecast Defaults
// ==========================================================================

/// Number of daily records returned by the forecast endpoint.
pub const FORECAST_DAYS: u64 = 5;

/// Lowest generated temperature (inclusive).
pub const MIN_TEMPERATURE_C: i32 = -20;

/// Highest generated temperature (exclusive).
pub const MAX_TEMPERATURE_C: i32 = 55;

// SPDX-License-Identifier: MPL-2.0
//! Resource scope identity.

use std::fmt;

/// Names a group of localizable strings, such as the weather summaries.
///
/// A scope is identified by its name together with the module that owns the
/// resources, so two crates can both ship a `weather` scope without clashing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceScope {
    module: String,
    name: String,
}

impl ResourceScope {
    pub fn new(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            name: name.into(),
        }
    }

    /// A scope owned by this crate; matches the embedded resource layout.
    pub fn local(name: impl Into<String>) -> Self {
        Self::new(env!("CARGO_CRATE_NAME"), name)
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ResourceScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.module, self.name)
    }
}

//! Dependency tagging for outbound calls.

use std::time::Duration;

/// External services the storefront talks to.
///
/// Each tag carries a default timeout and a name used in log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyTag {
    /// Hosted search index.
    Search,
    /// Commerce backend catalog endpoints.
    Catalog,
    /// Custom dependency with name.
    Custom(&'static str),
}

impl DependencyTag {
    /// Get the default timeout for this dependency type.
    pub fn default_timeout(&self) -> Duration {
        match self {
            Self::Search => Duration::from_millis(500),
            Self::Catalog => Duration::from_millis(1000),
            Self::Custom(_) => Duration::from_millis(500),
        }
    }

    /// Get the name of this dependency.
    pub fn name(&self) -> &str {
        match self {
            Self::Search => "search",
            Self::Catalog => "catalog",
            Self::Custom(name) => name,
        }
    }
}

impl std::fmt::Display for DependencyTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

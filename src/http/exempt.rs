//! Path-prefix exemption predicate.

use async_trait::async_trait;
use axum::http::request::Parts;

use super::middleware::ExemptionPredicate;

/// Exempts requests whose path starts with one of the configured prefixes.
///
/// Prefix matching is case-sensitive, like route paths.
#[derive(Debug, Clone, Default)]
pub struct PathPrefixExemption {
    prefixes: Vec<String>,
}

impl PathPrefixExemption {
    pub fn new<I, P>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}

#[async_trait]
impl ExemptionPredicate for PathPrefixExemption {
    async fn is_exempt(&self, request: &Parts) -> bool {
        let path = request.uri.path();
        self.prefixes.iter().any(|p| path.starts_with(p.as_str()))
    }
}

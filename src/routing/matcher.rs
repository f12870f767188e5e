//! Path pattern compilation.
//!
//! # Responsibilities
//! - Translate axum route syntax into an anchored regular expression
//! - Match request paths in full (no prefix matches)
//!
//! # Design Decisions
//! - `{name}` captures exactly one non-empty segment
//! - `{*name}` captures the remainder of the path, slashes included
//! - Literal text is escaped, so `.` or `+` in a route are literal

use regex::Regex;
use thiserror::Error;

/// Errors raised while compiling a route pattern.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("route pattern {0:?} has an unclosed '{{'")]
    Unclosed(String),

    #[error("route pattern {0:?} has an unmatched '}}'")]
    Unmatched(String),

    #[error("route pattern {0:?} has an empty parameter name")]
    EmptyParameter(String),
}

/// A compiled route path.
#[derive(Debug, Clone)]
pub struct PathPattern {
    source: String,
    regex: Regex,
}

impl PathPattern {
    /// Compile an axum-style route path such as `/items/{id}`.
    pub fn compile(pattern: &str) -> Result<Self, PatternError> {
        let mut expr = String::from("^");
        let mut rest = pattern;

        while let Some(open) = rest.find(['{', '}']) {
            if rest[open..].starts_with('}') {
                return Err(PatternError::Unmatched(pattern.to_string()));
            }
            expr.push_str(&regex::escape(&rest[..open]));

            let after = &rest[open + 1..];
            let close = after
                .find('}')
                .ok_or_else(|| PatternError::Unclosed(pattern.to_string()))?;
            let param = &after[..close];
            if param.contains('{') {
                return Err(PatternError::Unclosed(pattern.to_string()));
            }

            match param.strip_prefix('*') {
                Some(name) if !name.is_empty() => expr.push_str(".*"),
                None if !param.is_empty() => expr.push_str("[^/]+"),
                _ => return Err(PatternError::EmptyParameter(pattern.to_string())),
            }
            rest = &after[close + 1..];
        }
        expr.push_str(&regex::escape(rest));
        expr.push('$');

        let regex = Regex::new(&expr)
            .map_err(|_| PatternError::Unclosed(pattern.to_string()))?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// Returns true if `path` matches this pattern in full.
    pub fn matches(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_path_is_full_match() {
        let pattern = PathPattern::compile("/api").unwrap();
        assert!(pattern.matches("/api"));
        assert!(!pattern.matches("/api/v1"));
        assert!(!pattern.matches("/ap"));
        assert!(!pattern.matches("/v1/api"));
    }

    #[test]
    fn test_segment_parameter() {
        let pattern = PathPattern::compile("/items/{id}/detail").unwrap();
        assert!(pattern.matches("/items/42/detail"));
        assert!(!pattern.matches("/items//detail"));
        assert!(!pattern.matches("/items/4/2/detail"));
    }

    #[test]
    fn test_wildcard_parameter() {
        let pattern = PathPattern::compile("/files/{*rest}").unwrap();
        assert!(pattern.matches("/files/a/b/c.txt"));
        assert!(pattern.matches("/files/"));
        assert!(!pattern.matches("/file"));
    }

    #[test]
    fn test_literals_are_escaped() {
        let pattern = PathPattern::compile("/v1.0/status").unwrap();
        assert!(pattern.matches("/v1.0/status"));
        assert!(!pattern.matches("/v1x0/status"));
    }

    #[test]
    fn test_malformed_patterns() {
        assert_eq!(
            PathPattern::compile("/items/{id").unwrap_err(),
            PatternError::Unclosed("/items/{id".into())
        );
        assert_eq!(
            PathPattern::compile("/items/id}").unwrap_err(),
            PatternError::Unmatched("/items/id}".into())
        );
        assert_eq!(
            PathPattern::compile("/items/{}").unwrap_err(),
            PatternError::EmptyParameter("/items/{}".into())
        );
    }
}

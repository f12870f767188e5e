//! Per-route maintenance overrides.

use super::matcher::PathPattern;
use super::registry::RouteEntry;

/// Override attached to a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteMarker {
    /// Always answer with the maintenance response.
    ForcedOn,
    /// Never answer with the maintenance response (unless also forced on).
    ForcedOff,
}

/// Markers in the order they were applied to a route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markers(Vec<RouteMarker>);

impl Markers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn force_on(self) -> Self {
        self.with(RouteMarker::ForcedOn)
    }

    pub fn force_off(self) -> Self {
        self.with(RouteMarker::ForcedOff)
    }

    pub fn with(mut self, marker: RouteMarker) -> Self {
        self.0.push(marker);
        self
    }

    pub fn applied(&self) -> &[RouteMarker] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Marker the decider acts on.
    ///
    /// `ForcedOn` is absolute: it wins whenever present, regardless of
    /// whether `ForcedOff` was applied before or after it.
    pub fn effective(&self) -> Option<RouteMarker> {
        if self.0.contains(&RouteMarker::ForcedOn) {
            Some(RouteMarker::ForcedOn)
        } else if self.0.contains(&RouteMarker::ForcedOff) {
            Some(RouteMarker::ForcedOff)
        } else {
            None
        }
    }
}

impl From<RouteMarker> for Markers {
    fn from(marker: RouteMarker) -> Self {
        Markers::new().with(marker)
    }
}

/// Compiled forced-on and forced-off path lists.
#[derive(Debug, Default)]
pub struct ForcedPaths {
    forced_on: Vec<PathPattern>,
    forced_off: Vec<PathPattern>,
}

impl ForcedPaths {
    /// Compile the patterns of every marked route.
    ///
    /// Routes whose pattern does not compile are logged and skipped.
    pub fn collect(entries: &[RouteEntry]) -> Self {
        let mut paths = Self::default();
        for entry in entries {
            let Some(marker) = entry.markers.effective() else {
                continue;
            };
            let pattern = match PathPattern::compile(&entry.path) {
                Ok(p) => p,
                Err(e) => {
                    tracing::warn!(path = %entry.path, error = %e, "Skipping marked route with invalid pattern");
                    continue;
                }
            };
            match marker {
                RouteMarker::ForcedOn => paths.forced_on.push(pattern),
                RouteMarker::ForcedOff => paths.forced_off.push(pattern),
            }
        }
        tracing::debug!(
            forced_on = paths.forced_on.len(),
            forced_off = paths.forced_off.len(),
            "Collected forced maintenance paths"
        );
        paths
    }

    pub fn is_forced_on(&self, path: &str) -> bool {
        self.forced_on.iter().any(|p| p.matches(path))
    }

    pub fn is_forced_off(&self, path: &str) -> bool {
        self.forced_off.iter().any(|p| p.matches(path))
    }
}

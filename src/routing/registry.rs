//! Side table of registered routes and their markers.

use std::sync::{Arc, RwLock};

use axum::routing::MethodRouter;
use axum::Router;

use super::marker::{Markers, RouteMarker};

/// A registered route path and the markers applied to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub path: String,
    pub markers: Markers,
}

/// Shared, append-only list of registered routes.
///
/// Cloning yields another handle to the same table.
#[derive(Debug, Clone, Default)]
pub struct RouteRegistry {
    entries: Arc<RwLock<Vec<RouteEntry>>>,
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a route. Registering the same path again merges the markers.
    pub fn register(&self, path: impl Into<String>, markers: Markers) {
        let path = path.into();
        let mut entries = self.entries.write().expect("route registry lock poisoned");
        match entries.iter_mut().find(|e| e.path == path) {
            Some(existing) => {
                for marker in markers.applied() {
                    existing.markers = std::mem::take(&mut existing.markers).with(*marker);
                }
            }
            None => entries.push(RouteEntry { path, markers }),
        }
    }

    pub fn mark(&self, path: impl Into<String>, marker: RouteMarker) {
        self.register(path, marker.into());
    }

    /// Copy of the table as it is right now.
    pub fn snapshot(&self) -> Vec<RouteEntry> {
        self.entries.read().expect("route registry lock poisoned").clone()
    }

    pub fn len(&self) -> usize {
        self.entries.read().expect("route registry lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An `axum::Router` that records every route in a [`RouteRegistry`].
pub struct MarkedRouter<S = ()> {
    router: Router<S>,
    registry: RouteRegistry,
}

impl<S> MarkedRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::with_registry(RouteRegistry::new())
    }

    pub fn with_registry(registry: RouteRegistry) -> Self {
        Self {
            router: Router::new(),
            registry,
        }
    }

    /// Add an unmarked route.
    pub fn route(self, path: &str, method_router: MethodRouter<S>) -> Self {
        self.route_marked(path, method_router, Markers::new())
    }

    /// Add a route with markers applied in the given order.
    pub fn route_marked(
        mut self,
        path: &str,
        method_router: MethodRouter<S>,
        markers: impl Into<Markers>,
    ) -> Self {
        self.registry.register(path, markers.into());
        self.router = self.router.route(path, method_router);
        self
    }

    pub fn registry(&self) -> RouteRegistry {
        self.registry.clone()
    }

    pub fn into_parts(self) -> (Router<S>, RouteRegistry) {
        (self.router, self.registry)
    }
}

impl<S> Default for MarkedRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

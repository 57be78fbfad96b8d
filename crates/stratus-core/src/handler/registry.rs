//! Handler registry: the mapping from resource-kind tag to handler.
//!
//! The registry is an explicit value constructed once at program start and
//! passed by reference into plan and apply. Registration is idempotent, and
//! a missing registration is always a fatal condition, never a silent skip.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::EngineError;
use crate::handler::Handler;

/// Registry of resource handlers keyed by kind tag.
#[derive(Debug, Default)]
pub struct HandlerRegistry {
    handlers: BTreeMap<String, Box<dyn Handler>>,
}

impl HandlerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for its kind tag.
    ///
    /// Repeated registration of an already-known kind is a no-op, so provider
    /// modules can register unconditionally.
    pub fn register(&mut self, handler: Box<dyn Handler>) {
        let kind = handler.kind();
        if self.handlers.contains_key(kind) {
            debug!(kind = %kind, "handler already registered, skipping");
            return;
        }
        self.handlers.insert(kind.to_string(), handler);
    }

    /// Whether a handler is registered for the given kind.
    pub fn is_registered(&self, kind: &str) -> bool {
        self.handlers.contains_key(kind)
    }

    /// Get a handler by kind.
    pub fn get(&self, kind: &str) -> Option<&dyn Handler> {
        self.handlers.get(kind).map(|h| h.as_ref())
    }

    /// Get a handler by kind, failing if none is registered.
    pub fn resolve(&self, kind: &str) -> Result<&dyn Handler, EngineError> {
        self.get(kind)
            .ok_or_else(|| EngineError::HandlerNotFound(kind.to_string()))
    }

    /// List all registered kind tags.
    pub fn kinds(&self) -> Vec<&str> {
        self.handlers.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

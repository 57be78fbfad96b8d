//! Handler layer: per-kind implementations of the step operations.
//!
//! Each resource kind is owned by exactly one handler. The engine only calls
//! the operations below and reads their return values; handlers own their
//! provider-API clients and credentials.

pub mod registry;

pub use registry::HandlerRegistry;

use std::fmt;

use serde_json::Value;

use crate::apply::StepContext;
use crate::entry::Entry;

/// Per-kind implementation of the five step operations.
///
/// Operations return `anyhow::Result` because their internals (HTTP calls,
/// SDK clients, polling loops) are opaque to the engine. A returned value is
/// the materialized output recorded as the entry's `result`.
pub trait Handler: fmt::Debug + Send + Sync {
    /// Stable resource-kind tag this handler owns.
    fn kind(&self) -> &'static str;

    /// Compare desired vs recorded parameters for equivalence.
    ///
    /// The default is structural equality; handlers override it when parts of
    /// the parameters are not semantically significant.
    fn equals(&self, candidate: &Value, current: &Value) -> bool {
        candidate == current
    }

    /// Whether this parameter change can only be applied by tearing the
    /// resource down and recreating it.
    ///
    /// Consulted only when [`equals`](Handler::equals) reported a difference.
    /// The default is an in-place update; a handler that cannot mutate in
    /// place returns `true`.
    fn requires_replace(&self, _candidate: &Value, _current: &Value) -> bool {
        false
    }

    /// Materialize a new resource.
    fn create(&self, candidate: &Entry, ctx: &StepContext<'_>) -> anyhow::Result<Value>;

    /// Mutate an existing resource in place.
    fn update(
        &self,
        candidate: &Entry,
        current: &Entry,
        ctx: &StepContext<'_>,
    ) -> anyhow::Result<Value>;

    /// Tear down the old resource and recreate it under the same identity.
    fn replace(
        &self,
        candidate: &Entry,
        current: &Entry,
        ctx: &StepContext<'_>,
    ) -> anyhow::Result<Value>;

    /// Tear down a resource that is no longer declared.
    fn delete(&self, current: &Entry, ctx: &StepContext<'_>) -> anyhow::Result<()>;
}

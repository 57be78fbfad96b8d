//! Shared fixtures: entry builders and recording handlers.
#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use serde_json::{Value, json};

use stratus_core::apply::{CancelToken, StepContext};
use stratus_core::entry::{Entry, EntryId};
use stratus_core::handler::Handler;
use stratus_core::identity::entry_id;

/// Shared call log recording `"<op>:<name>"` lines across handlers.
pub type CallLog = Arc<Mutex<Vec<String>>>;

pub fn new_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn calls(log: &CallLog) -> Vec<String> {
    log.lock().expect("call log lock").clone()
}

/// Human-readable name carried in an entry's parameters.
pub fn name_of(entry: &Entry) -> String {
    entry
        .parameters
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or("?")
        .to_string()
}

pub fn id_of(kind: &str, name: &str) -> EntryId {
    entry_id(kind, [name])
}

/// Entry whose parameters carry its name plus `extra` fields.
pub fn entry_with(kind: &str, name: &str, extra: Value) -> Entry {
    let mut params = serde_json::Map::new();
    params.insert("name".to_string(), json!(name));
    if let Value::Object(extra) = extra {
        params.extend(extra);
    }
    Entry::new(kind, entry_id(kind, [name]), Value::Object(params))
}

pub fn entry(kind: &str, name: &str) -> Entry {
    entry_with(kind, name, json!({}))
}

/// Handler that records every operation and materializes a synthetic output.
#[derive(Debug)]
pub struct RecordingHandler {
    kind: &'static str,
    log: CallLog,
    fail_names: HashSet<String>,
    force_replace: bool,
    result_template: Option<Value>,
    cancel_after: Option<(String, CancelToken)>,
}

impl RecordingHandler {
    pub fn new(kind: &'static str, log: CallLog) -> Self {
        Self {
            kind,
            log,
            fail_names: HashSet::new(),
            force_replace: false,
            result_template: None,
            cancel_after: None,
        }
    }

    /// Fail any operation touching the entry with this name.
    pub fn failing_on(mut self, name: &str) -> Self {
        self.fail_names.insert(name.to_string());
        self
    }

    /// Treat every parameter change as identity-bearing.
    pub fn forcing_replace(mut self) -> Self {
        self.force_replace = true;
        self
    }

    /// Materialize this fixed output instead of the synthetic one.
    pub fn with_result(mut self, result: Value) -> Self {
        self.result_template = Some(result);
        self
    }

    /// Cancel the token right after the named entry's operation succeeds.
    pub fn cancelling_after(mut self, name: &str, token: CancelToken) -> Self {
        self.cancel_after = Some((name.to_string(), token));
        self
    }

    fn run_op(&self, op: &str, entry: &Entry) -> anyhow::Result<Value> {
        let name = name_of(entry);
        self.log
            .lock()
            .expect("call log lock")
            .push(format!("{op}:{name}"));
        if self.fail_names.contains(&name) {
            anyhow::bail!("provider rejected {} '{}'", self.kind, name);
        }
        if let Some((trigger, token)) = &self.cancel_after
            && *trigger == name
        {
            token.cancel();
        }
        Ok(self.result_template.clone().unwrap_or_else(|| {
            json!({
                "id": format!("{}-{}", self.kind, name),
                "arn": format!("arn:{}:{}", self.kind, name),
            })
        }))
    }
}

impl Handler for RecordingHandler {
    fn kind(&self) -> &'static str {
        self.kind
    }

    fn requires_replace(&self, _candidate: &Value, _current: &Value) -> bool {
        self.force_replace
    }

    fn create(&self, candidate: &Entry, _ctx: &StepContext<'_>) -> anyhow::Result<Value> {
        self.run_op("create", candidate)
    }

    fn update(
        &self,
        candidate: &Entry,
        _current: &Entry,
        _ctx: &StepContext<'_>,
    ) -> anyhow::Result<Value> {
        self.run_op("update", candidate)
    }

    fn replace(
        &self,
        candidate: &Entry,
        _current: &Entry,
        _ctx: &StepContext<'_>,
    ) -> anyhow::Result<Value> {
        self.run_op("replace", candidate)
    }

    fn delete(&self, current: &Entry, _ctx: &StepContext<'_>) -> anyhow::Result<()> {
        let name = name_of(current);
        self.log
            .lock()
            .expect("call log lock")
            .push(format!("delete:{name}"));
        if self.fail_names.contains(&name) {
            anyhow::bail!("provider rejected {} '{}'", self.kind, name);
        }
        Ok(())
    }
}

/// Handler for `"function"` entries that wires each function to the output
/// of its `"role"` dependency, exercising the step context the way provider
/// modules do.
#[derive(Debug)]
pub struct FunctionHandler {
    log: CallLog,
}

impl FunctionHandler {
    pub fn new(log: CallLog) -> Self {
        Self { log }
    }

    fn materialize(&self, op: &str, entry: &Entry, ctx: &StepContext<'_>) -> anyhow::Result<Value> {
        let name = name_of(entry);
        self.log
            .lock()
            .expect("call log lock")
            .push(format!("{op}:{name}"));

        let role = ctx
            .dependency_of_kind("role")
            .context("function requires a role dependency")?;
        let arn = ctx.require_result_field(&role.entry_id, "arn")?;

        Ok(json!({
            "id": format!("function-{name}"),
            "role_arn": arn,
        }))
    }
}

impl Handler for FunctionHandler {
    fn kind(&self) -> &'static str {
        "function"
    }

    fn create(&self, candidate: &Entry, ctx: &StepContext<'_>) -> anyhow::Result<Value> {
        self.materialize("create", candidate, ctx)
    }

    fn update(
        &self,
        candidate: &Entry,
        _current: &Entry,
        ctx: &StepContext<'_>,
    ) -> anyhow::Result<Value> {
        self.materialize("update", candidate, ctx)
    }

    fn replace(
        &self,
        candidate: &Entry,
        _current: &Entry,
        ctx: &StepContext<'_>,
    ) -> anyhow::Result<Value> {
        self.materialize("replace", candidate, ctx)
    }

    fn delete(&self, current: &Entry, _ctx: &StepContext<'_>) -> anyhow::Result<()> {
        self.log
            .lock()
            .expect("call log lock")
            .push(format!("delete:{}", name_of(current)));
        Ok(())
    }
}

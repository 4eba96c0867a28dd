/// Task model consumed by the cacheability resolver
///
/// A `TaskDefinition` is the frozen configuration of one task: its string
/// properties, declared outputs, caching predicates and any overlap reported
/// by the overlap detector.
pub mod batch;
pub mod condition;
pub mod manifest;

pub use batch::{resolve_tasks, TaskOutcome};
pub use condition::Condition;
pub use manifest::{parse_manifest, parse_manifest_str};

use std::collections::BTreeMap;

use crate::cacheability::{
    OutputSpec, OutputSpecError, OutputSpecs, OverlappingOutputs, ResolutionRequest,
    SelfDescribingPredicate,
};

pub type TaskPredicate = SelfDescribingPredicate<TaskDefinition>;

#[derive(Debug, Clone)]
pub struct TaskDefinition {
    name: String,
    properties: BTreeMap<String, String>,
    outputs: OutputSpecs,
    declares_outputs: Option<bool>,
    cache_if: Vec<TaskPredicate>,
    do_not_cache_if: Vec<TaskPredicate>,
    overlap: Option<OverlappingOutputs>,
}

impl TaskDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: BTreeMap::new(),
            outputs: OutputSpecs::new(),
            declares_outputs: None,
            cache_if: Vec::new(),
            do_not_cache_if: Vec::new(),
            overlap: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn outputs(&self) -> &OutputSpecs {
        &self.outputs
    }

    pub fn cache_if(&self) -> &[TaskPredicate] {
        &self.cache_if
    }

    pub fn do_not_cache_if(&self) -> &[TaskPredicate] {
        &self.do_not_cache_if
    }

    pub fn overlap(&self) -> Option<&OverlappingOutputs> {
        self.overlap.as_ref()
    }

    /// Whether the task declared any outputs
    ///
    /// An explicit `declares-outputs` setting wins; otherwise any output
    /// property counts.
    pub fn has_declared_outputs(&self) -> bool {
        self.declares_outputs
            .unwrap_or_else(|| !self.outputs.is_empty())
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn add_output(&mut self, spec: OutputSpec) -> Result<(), OutputSpecError> {
        self.outputs.insert(spec)
    }

    pub fn set_declares_outputs(&mut self, declares: bool) {
        self.declares_outputs = Some(declares);
    }

    pub fn add_cache_if(&mut self, predicate: TaskPredicate) {
        self.cache_if.push(predicate);
    }

    pub fn add_do_not_cache_if(&mut self, predicate: TaskPredicate) {
        self.do_not_cache_if.push(predicate);
    }

    pub fn set_overlap(&mut self, overlap: OverlappingOutputs) {
        self.overlap = Some(overlap);
    }

    /// Borrow this task's configuration as a resolver request
    pub fn resolution_request(&self) -> ResolutionRequest<'_, TaskDefinition> {
        ResolutionRequest {
            has_declared_outputs: self.has_declared_outputs(),
            output_specs: &self.outputs,
            task: self,
            cache_if: &self.cache_if,
            do_not_cache_if: &self.do_not_cache_if,
            overlapping_outputs: self.overlap.as_ref(),
        }
    }
}

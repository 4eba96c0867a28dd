/// Cacheability resolution
///
/// Decides, right before a task executes, whether its outputs may be loaded
/// from or stored into the build cache. Rules are checked in a fixed order and
/// the first one that applies is the only reason reported.
use tracing::debug;

use super::outputs::OutputSpecs;
use super::overlap::OverlappingOutputs;
use super::predicate::SelfDescribingPredicate;
use super::reason::{
    CachingDisabledReason, CachingDisabledReasonCategory, CACHING_NOT_ENABLED,
    NO_OUTPUTS_DECLARED,
};
use crate::paths::DisplayPathResolver;

/// Inputs for a single resolution, borrowed from the task being executed
#[derive(Debug)]
pub struct ResolutionRequest<'a, T> {
    pub has_declared_outputs: bool,
    pub output_specs: &'a OutputSpecs,
    pub task: &'a T,
    pub cache_if: &'a [SelfDescribingPredicate<T>],
    pub do_not_cache_if: &'a [SelfDescribingPredicate<T>],
    pub overlapping_outputs: Option<&'a OverlappingOutputs>,
}

// Manual impls: the request only holds references, so `T` need not be `Clone`.
impl<T> Clone for ResolutionRequest<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ResolutionRequest<'_, T> {}

/// Decides whether caching must be disabled for a task execution
pub trait TaskCacheabilityResolver<T> {
    /// Returns `None` when the task is cacheable
    fn should_disable_caching(
        &self,
        request: &ResolutionRequest<'_, T>,
    ) -> Option<CachingDisabledReason>;
}

/// Standard rule chain
///
/// 1. no `cache-if` predicates registered
/// 2. no outputs declared
/// 3. overlapping outputs detected
/// 4. first output property that is a file tree
/// 5. first `cache-if` predicate that does not hold
/// 6. first `do-not-cache-if` predicate that holds
#[derive(Debug, Clone)]
pub struct DefaultTaskCacheabilityResolver<R> {
    path_resolver: R,
}

impl<R: DisplayPathResolver> DefaultTaskCacheabilityResolver<R> {
    pub fn new(path_resolver: R) -> Self {
        Self { path_resolver }
    }

    fn resolve<T>(&self, request: &ResolutionRequest<'_, T>) -> Option<CachingDisabledReason> {
        if request.cache_if.is_empty() {
            return Some(CACHING_NOT_ENABLED);
        }

        if !request.has_declared_outputs {
            return Some(NO_OUTPUTS_DECLARED);
        }

        if let Some(overlap) = request.overlapping_outputs {
            let display_path = self
                .path_resolver
                .resolve_for_display(overlap.overlapped_path());
            return Some(CachingDisabledReason::new(
                CachingDisabledReasonCategory::OverlappingOutputs,
                format!(
                    "Cachegate does not know how file '{}' was created (output property '{}'). \
                     Task output caching requires exclusive access to output paths to guarantee \
                     correctness (i.e. multiple tasks are not allowed to produce output in the \
                     same location).",
                    display_path,
                    overlap.property_name()
                ),
            ));
        }

        if let Some(spec) = request.output_specs.iter().find(|spec| !spec.is_cacheable()) {
            return Some(CachingDisabledReason::new(
                CachingDisabledReasonCategory::NonCacheableOutput,
                format!("Output property '{}' contains a file tree", spec.property_name),
            ));
        }

        if let Some(predicate) = request
            .cache_if
            .iter()
            .find(|predicate| !predicate.is_satisfied_by(request.task))
        {
            return Some(CachingDisabledReason::new(
                CachingDisabledReasonCategory::EnableConditionNotSatisfied,
                format!("'{}' not satisfied", predicate.display_name()),
            ));
        }

        if let Some(predicate) = request
            .do_not_cache_if
            .iter()
            .find(|predicate| predicate.is_satisfied_by(request.task))
        {
            return Some(CachingDisabledReason::new(
                CachingDisabledReasonCategory::DisableConditionSatisfied,
                format!("'{}' satisfied", predicate.display_name()),
            ));
        }

        None
    }
}

impl<T, R: DisplayPathResolver> TaskCacheabilityResolver<T> for DefaultTaskCacheabilityResolver<R> {
    fn should_disable_caching(
        &self,
        request: &ResolutionRequest<'_, T>,
    ) -> Option<CachingDisabledReason> {
        let reason = self.resolve(request);
        if let Some(reason) = &reason {
            debug!(
                category = %reason.category(),
                message = reason.message(),
                "caching disabled"
            );
        }
        reason
    }
}

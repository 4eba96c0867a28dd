pub mod outputs;
pub mod overlap;
pub mod predicate;
pub mod reason;
pub mod resolver;
pub mod summary;

pub use outputs::{OutputKind, OutputSpec, OutputSpecError, OutputSpecs};
pub use overlap::OverlappingOutputs;
pub use predicate::SelfDescribingPredicate;
pub use reason::{
    CachingDisabledReason, CachingDisabledReasonCategory, CACHING_NOT_ENABLED,
    NO_OUTPUTS_DECLARED,
};
pub use resolver::{DefaultTaskCacheabilityResolver, ResolutionRequest, TaskCacheabilityResolver};
pub use summary::CachingSummary;

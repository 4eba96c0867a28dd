// Library interface for Cachegate
// The binary and integration tests build on these modules

pub mod cacheability;
pub mod config;
pub mod config_discovery;
pub mod logging;
pub mod paths;
pub mod task;

// Re-export commonly used types
pub use cacheability::{
    CachingDisabledReason, CachingDisabledReasonCategory, DefaultTaskCacheabilityResolver,
    OutputKind, OutputSpec, OutputSpecs, OverlappingOutputs, ResolutionRequest,
    SelfDescribingPredicate, TaskCacheabilityResolver,
};
pub use paths::{DisplayPathResolver, RelativeFilePathResolver};
pub use task::{parse_manifest, TaskDefinition};

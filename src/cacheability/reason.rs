/// Caching-disabled reasons
///
/// A closed classification of why a task's outputs will not be stored into or
/// loaded from the build cache, paired with a display message.
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

/// Category of a caching-disabled reason, usable for aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CachingDisabledReasonCategory {
    /// Reason could not be determined
    Unknown,
    /// The build cache is turned off for the whole build
    BuildCacheDisabled,
    /// Caching has not been opted into for the task type
    NotCacheable,
    /// A `cache-if` condition did not hold
    EnableConditionNotSatisfied,
    /// A `do-not-cache-if` condition held
    DisableConditionSatisfied,
    /// The task declares no outputs at all
    NoOutputsDeclared,
    /// An output property is an open-ended file tree
    NonCacheableOutput,
    /// Another producer wrote into one of the task's output locations
    OverlappingOutputs,
    /// Task validation reported problems
    ValidationFailure,
}

impl CachingDisabledReasonCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::BuildCacheDisabled => "BUILD_CACHE_DISABLED",
            Self::NotCacheable => "NOT_CACHEABLE",
            Self::EnableConditionNotSatisfied => "ENABLE_CONDITION_NOT_SATISFIED",
            Self::DisableConditionSatisfied => "DISABLE_CONDITION_SATISFIED",
            Self::NoOutputsDeclared => "NO_OUTPUTS_DECLARED",
            Self::NonCacheableOutput => "NON_CACHEABLE_OUTPUT",
            Self::OverlappingOutputs => "OVERLAPPING_OUTPUTS",
            Self::ValidationFailure => "VALIDATION_FAILURE",
        }
    }
}

impl fmt::Display for CachingDisabledReasonCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why caching is disabled for a task execution
///
/// Immutable once built. The message is formatted when the reason is produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CachingDisabledReason {
    category: CachingDisabledReasonCategory,
    message: Cow<'static, str>,
}

/// Caching has not been opted into for the task
pub const CACHING_NOT_ENABLED: CachingDisabledReason = CachingDisabledReason::from_static(
    CachingDisabledReasonCategory::NotCacheable,
    "Caching has not been enabled for the task.",
);

/// The task has nothing to cache
pub const NO_OUTPUTS_DECLARED: CachingDisabledReason = CachingDisabledReason::from_static(
    CachingDisabledReasonCategory::NoOutputsDeclared,
    "No outputs declared",
);

impl CachingDisabledReason {
    pub fn new(category: CachingDisabledReasonCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: Cow::Owned(message.into()),
        }
    }

    /// Build a reason with fixed text, usable in `const` context
    pub const fn from_static(category: CachingDisabledReasonCategory, message: &'static str) -> Self {
        Self {
            category,
            message: Cow::Borrowed(message),
        }
    }

    pub fn category(&self) -> CachingDisabledReasonCategory {
        self.category
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CachingDisabledReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

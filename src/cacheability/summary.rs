/// Per-build aggregation of cacheability outcomes
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use super::reason::{CachingDisabledReason, CachingDisabledReasonCategory};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CachingSummary {
    cacheable: usize,
    disabled: BTreeMap<CachingDisabledReasonCategory, usize>,
}

impl CachingSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of one resolution
    pub fn record(&mut self, outcome: Option<&CachingDisabledReason>) {
        match outcome {
            None => self.cacheable += 1,
            Some(reason) => *self.disabled.entry(reason.category()).or_insert(0) += 1,
        }
    }

    pub fn cacheable(&self) -> usize {
        self.cacheable
    }

    pub fn disabled(&self) -> usize {
        self.disabled.values().sum()
    }

    pub fn total(&self) -> usize {
        self.cacheable + self.disabled()
    }

    pub fn count(&self, category: CachingDisabledReasonCategory) -> usize {
        self.disabled.get(&category).copied().unwrap_or(0)
    }

    /// Disabled counts per category, in category order
    pub fn by_category(&self) -> impl Iterator<Item = (CachingDisabledReasonCategory, usize)> + '_ {
        self.disabled.iter().map(|(category, count)| (*category, *count))
    }
}

impl fmt::Display for CachingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} tasks: {} cacheable, {} not cacheable",
            self.total(),
            self.cacheable,
            self.disabled()
        )?;
        for (category, count) in self.by_category() {
            writeln!(f, "  {}: {}", category, count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cacheability::reason::{CACHING_NOT_ENABLED, NO_OUTPUTS_DECLARED};

    #[test]
    fn test_record_groups_by_category() {
        let mut summary = CachingSummary::new();
        summary.record(None);
        summary.record(Some(&CACHING_NOT_ENABLED));
        summary.record(Some(&CACHING_NOT_ENABLED));
        summary.record(Some(&NO_OUTPUTS_DECLARED));

        assert_eq!(summary.total(), 4);
        assert_eq!(summary.cacheable(), 1);
        assert_eq!(summary.disabled(), 3);
        assert_eq!(summary.count(CachingDisabledReasonCategory::NotCacheable), 2);
        assert_eq!(
            summary.count(CachingDisabledReasonCategory::OverlappingOutputs),
            0
        );
    }

    #[test]
    fn test_display() {
        let mut summary = CachingSummary::new();
        summary.record(None);
        summary.record(Some(&NO_OUTPUTS_DECLARED));
        summary.record(Some(&CACHING_NOT_ENABLED));

        assert_eq!(
            summary.to_string(),
            "3 tasks: 1 cacheable, 2 not cacheable\n  NOT_CACHEABLE: 1\n  NO_OUTPUTS_DECLARED: 1\n"
        );
    }
}

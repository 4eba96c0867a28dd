/// Named predicates over task state
///
/// Used to build the ordered `cache-if` and `do-not-cache-if` lists a task
/// carries. Predicates run on every task execution and must be cheap and free
/// of side effects.
use std::fmt;
use std::sync::Arc;

type PredicateFn<T> = dyn Fn(&T) -> bool + Send + Sync;

/// A boolean test over `T` paired with a human-readable name
pub struct SelfDescribingPredicate<T> {
    display_name: String,
    test: Arc<PredicateFn<T>>,
}

impl<T> SelfDescribingPredicate<T> {
    pub fn new<F>(display_name: impl Into<String>, test: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self {
            display_name: display_name.into(),
            test: Arc::new(test),
        }
    }

    /// Predicate that holds for every value
    pub fn satisfy_all(display_name: impl Into<String>) -> Self {
        Self::new(display_name, |_| true)
    }

    /// Predicate that holds for no value
    pub fn satisfy_none(display_name: impl Into<String>) -> Self {
        Self::new(display_name, |_| false)
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Evaluate the predicate. A panicking predicate propagates to the caller.
    pub fn is_satisfied_by(&self, value: &T) -> bool {
        (self.test)(value)
    }
}

impl<T: 'static> SelfDescribingPredicate<T> {
    pub fn negate(&self) -> Self {
        let inner = Arc::clone(&self.test);
        Self {
            display_name: format!("not {}", self.display_name),
            test: Arc::new(move |value: &T| !inner(value)),
        }
    }

    pub fn and(&self, other: &Self) -> Self {
        let left = Arc::clone(&self.test);
        let right = Arc::clone(&other.test);
        Self {
            display_name: format!("{} and {}", self.display_name, other.display_name),
            test: Arc::new(move |value: &T| left(value) && right(value)),
        }
    }

    pub fn or(&self, other: &Self) -> Self {
        let left = Arc::clone(&self.test);
        let right = Arc::clone(&other.test);
        Self {
            display_name: format!("{} or {}", self.display_name, other.display_name),
            test: Arc::new(move |value: &T| left(value) || right(value)),
        }
    }
}

impl<T> Clone for SelfDescribingPredicate<T> {
    fn clone(&self) -> Self {
        Self {
            display_name: self.display_name.clone(),
            test: Arc::clone(&self.test),
        }
    }
}

impl<T> fmt::Debug for SelfDescribingPredicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelfDescribingPredicate")
            .field("display_name", &self.display_name)
            .finish_non_exhaustive()
    }
}

impl<T> fmt::Display for SelfDescribingPredicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name)
    }
}

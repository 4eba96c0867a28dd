use std::fmt;

use super::{TaskDefinition, TaskPredicate};

/// Declarative source of a task predicate, as written in a manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    Always,
    Never,
    PropertyEquals { property: String, value: String },
    PropertyEndsWith { property: String, suffix: String },
    PropertyPresent { property: String },
}

impl Condition {
    pub fn property_equals(property: impl Into<String>, value: impl Into<String>) -> Self {
        Condition::PropertyEquals {
            property: property.into(),
            value: value.into(),
        }
    }

    pub fn property_ends_with(property: impl Into<String>, suffix: impl Into<String>) -> Self {
        Condition::PropertyEndsWith {
            property: property.into(),
            suffix: suffix.into(),
        }
    }

    pub fn property_present(property: impl Into<String>) -> Self {
        Condition::PropertyPresent {
            property: property.into(),
        }
    }

    pub fn evaluate(&self, task: &TaskDefinition) -> bool {
        match self {
            Condition::Always => true,
            Condition::Never => false,
            Condition::PropertyEquals { property, value } => {
                task.property(property) == Some(value.as_str())
            }
            Condition::PropertyEndsWith { property, suffix } => task
                .property(property)
                .is_some_and(|v| v.ends_with(suffix.as_str())),
            Condition::PropertyPresent { property } => task.property(property).is_some(),
        }
    }

    pub fn into_predicate(self, display_name: impl Into<String>) -> TaskPredicate {
        TaskPredicate::new(display_name, move |task| self.evaluate(task))
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Always => f.write_str("always"),
            Condition::Never => f.write_str("never"),
            Condition::PropertyEquals { property, value } => {
                write!(f, "{} == \"{}\"", property, value)
            }
            Condition::PropertyEndsWith { property, suffix } => {
                write!(f, "{} ends with \"{}\"", property, suffix)
            }
            Condition::PropertyPresent { property } => write!(f, "{} is set", property),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task_with(key: &str, value: &str) -> TaskDefinition {
        let mut task = TaskDefinition::new("t");
        task.set_property(key, value);
        task
    }

    #[test]
    fn test_property_conditions() {
        let task = task_with("version", "1.2.0-SNAPSHOT");

        assert!(Condition::property_ends_with("version", "-SNAPSHOT").evaluate(&task));
        assert!(!Condition::property_equals("version", "1.2.0").evaluate(&task));
        assert!(Condition::property_present("version").evaluate(&task));
        assert!(!Condition::property_present("release").evaluate(&task));
        assert!(!Condition::property_ends_with("release", "x").evaluate(&task));
    }

    #[test]
    fn test_constant_conditions() {
        let task = TaskDefinition::new("t");
        assert!(Condition::Always.evaluate(&task));
        assert!(!Condition::Never.evaluate(&task));
    }

    #[test]
    fn test_predicate_keeps_display_name() {
        let predicate = Condition::property_equals("release", "true").into_predicate("release builds");
        assert_eq!(predicate.display_name(), "release builds");
        assert!(predicate.is_satisfied_by(&task_with("release", "true")));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Condition::property_equals("release", "true").to_string(),
            "release == \"true\""
        );
        assert_eq!(Condition::property_present("ci").to_string(), "ci is set");
    }
}

/// Declared output properties of a task
use std::collections::btree_map::{self, BTreeMap};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum OutputSpecError {
    #[error("Output property '{0}' is declared more than once")]
    DuplicateProperty(String),

    #[error("Invalid output kind: {0}. Use: file, dir, tree")]
    InvalidKind(String),
}

/// Shape of a declared output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    /// A single regular file
    File,
    /// A directory whose whole content belongs to the task
    Directory,
    /// An open-ended file tree without exclusivity guarantees
    FileTree,
}

impl OutputKind {
    pub fn is_cacheable(&self) -> bool {
        matches!(self, OutputKind::File | OutputKind::Directory)
    }
}

impl FromStr for OutputKind {
    type Err = OutputSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "file" => Ok(OutputKind::File),
            "dir" | "directory" => Ok(OutputKind::Directory),
            "tree" | "file-tree" => Ok(OutputKind::FileTree),
            other => Err(OutputSpecError::InvalidKind(other.to_string())),
        }
    }
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputKind::File => "file",
            OutputKind::Directory => "dir",
            OutputKind::FileTree => "tree",
        };
        f.write_str(name)
    }
}

/// One declared output property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSpec {
    pub property_name: String,
    pub kind: OutputKind,
}

impl OutputSpec {
    pub fn new(property_name: impl Into<String>, kind: OutputKind) -> Self {
        Self {
            property_name: property_name.into(),
            kind,
        }
    }

    pub fn is_cacheable(&self) -> bool {
        self.kind.is_cacheable()
    }
}

/// Output properties keyed and ordered by property name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputSpecs {
    specs: BTreeMap<String, OutputSpec>,
}

impl OutputSpecs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from specs in any order, rejecting duplicate property names
    pub fn try_from_specs<I>(specs: I) -> Result<Self, OutputSpecError>
    where
        I: IntoIterator<Item = OutputSpec>,
    {
        let mut collected = Self::new();
        for spec in specs {
            collected.insert(spec)?;
        }
        Ok(collected)
    }

    pub fn insert(&mut self, spec: OutputSpec) -> Result<(), OutputSpecError> {
        match self.specs.entry(spec.property_name.clone()) {
            btree_map::Entry::Occupied(_) => {
                Err(OutputSpecError::DuplicateProperty(spec.property_name))
            }
            btree_map::Entry::Vacant(slot) => {
                slot.insert(spec);
                Ok(())
            }
        }
    }

    pub fn get(&self, property_name: &str) -> Option<&OutputSpec> {
        self.specs.get(property_name)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Iterate in property name order
    pub fn iter(&self) -> impl Iterator<Item = &OutputSpec> {
        self.specs.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_cacheability() {
        assert!(OutputKind::File.is_cacheable());
        assert!(OutputKind::Directory.is_cacheable());
        assert!(!OutputKind::FileTree.is_cacheable());
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!("file".parse::<OutputKind>().unwrap(), OutputKind::File);
        assert_eq!("dir".parse::<OutputKind>().unwrap(), OutputKind::Directory);
        assert_eq!(
            "directory".parse::<OutputKind>().unwrap(),
            OutputKind::Directory
        );
        assert_eq!("tree".parse::<OutputKind>().unwrap(), OutputKind::FileTree);
        assert_eq!(
            "glob".parse::<OutputKind>(),
            Err(OutputSpecError::InvalidKind("glob".to_string()))
        );
    }

    #[test]
    fn test_specs_iterate_by_property_name() {
        let specs = OutputSpecs::try_from_specs([
            OutputSpec::new("reports", OutputKind::FileTree),
            OutputSpec::new("classes", OutputKind::Directory),
            OutputSpec::new("manifest", OutputKind::File),
        ])
        .unwrap();

        let names: Vec<_> = specs.iter().map(|s| s.property_name.as_str()).collect();
        assert_eq!(names, vec!["classes", "manifest", "reports"]);
    }

    #[test]
    fn test_duplicate_property_rejected() {
        let result = OutputSpecs::try_from_specs([
            OutputSpec::new("out", OutputKind::File),
            OutputSpec::new("out", OutputKind::Directory),
        ]);
        assert_eq!(
            result,
            Err(OutputSpecError::DuplicateProperty("out".to_string()))
        );
    }
}

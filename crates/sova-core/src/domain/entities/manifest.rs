use std::collections::HashSet;

use serde::Serialize;

use crate::domain::{
    entities::{common::RelativePath, template::TemplateRef},
    error::DomainError,
};

/// The output shape of one generation run.
///
/// Built from a blueprint for a given kind and feature set. It contains no
/// behavior beyond validation; the generator walks it in declared order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputManifest {
    pub(crate) directories: Vec<RelativePath>,
    pub(crate) mappings: Vec<FileMapping>,
}

/// One `template → destination` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileMapping {
    pub template: TemplateRef,
    #[serde(serialize_with = "serialize_display")]
    pub destination: RelativePath,
}

fn serialize_display<S: serde::Serializer>(
    path: &RelativePath,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(path)
}

impl FileMapping {
    pub fn new(template: TemplateRef, destination: RelativePath) -> Self {
        Self {
            template,
            destination,
        }
    }
}

impl OutputManifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_directory(&mut self, path: RelativePath) {
        self.directories.push(path);
    }

    pub fn add_mapping(&mut self, mapping: FileMapping) {
        self.mappings.push(mapping);
    }

    pub fn with_directory(mut self, path: RelativePath) -> Self {
        self.add_directory(path);
        self
    }

    pub fn with_mapping(mut self, mapping: FileMapping) -> Self {
        self.add_mapping(mapping);
        self
    }

    /// Check structural invariants.
    ///
    /// A manifest must map at least one file and never write two mappings to
    /// the same destination. Directories may repeat (creation is idempotent).
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.mappings.is_empty() {
            return Err(DomainError::InvalidManifest(
                "manifest declares no files".into(),
            ));
        }

        let mut seen = HashSet::new();
        for mapping in &self.mappings {
            if !seen.insert(mapping.destination.as_path()) {
                return Err(DomainError::DuplicatePath {
                    path: mapping.destination.to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn directories(&self) -> &[RelativePath] {
        &self.directories
    }

    pub fn mappings(&self) -> &[FileMapping] {
        &self.mappings
    }

    pub fn destinations(&self) -> impl Iterator<Item = &RelativePath> {
        self.mappings.iter().map(|m| &m.destination)
    }

    pub fn file_count(&self) -> usize {
        self.mappings.len()
    }

    pub fn directory_count(&self) -> usize {
        self.directories.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(name: &str, dest: &str) -> FileMapping {
        FileMapping::new(
            TemplateRef::parse("cli", name).unwrap(),
            RelativePath::try_new(dest).unwrap(),
        )
    }

    #[test]
    fn manifest_builds_in_order() {
        let m = OutputManifest::new()
            .with_directory(RelativePath::try_new("cmd").unwrap())
            .with_mapping(mapping("main.tpl", "main.go"))
            .with_mapping(mapping("root.tpl", "cmd/root.go"));

        assert!(m.validate().is_ok());
        assert_eq!(m.file_count(), 2);
        assert_eq!(m.directory_count(), 1);
        assert_eq!(
            m.destinations().map(ToString::to_string).collect::<Vec<_>>(),
            vec!["main.go", "cmd/root.go"]
        );
    }

    #[test]
    fn empty_manifest_is_invalid() {
        assert!(OutputManifest::new().validate().is_err());
    }

    #[test]
    fn duplicate_destinations_are_invalid() {
        let m = OutputManifest::new()
            .with_mapping(mapping("main.tpl", "main.go"))
            .with_mapping(mapping("other.tpl", "main.go"));
        assert!(matches!(m.validate(), Err(DomainError::DuplicatePath { .. })));
    }

    #[test]
    fn repeated_directories_are_allowed() {
        let m = OutputManifest::new()
            .with_directory(RelativePath::try_new("cmd").unwrap())
            .with_directory(RelativePath::try_new("cmd").unwrap())
            .with_mapping(mapping("main.tpl", "main.go"));
        assert!(m.validate().is_ok());
    }
}

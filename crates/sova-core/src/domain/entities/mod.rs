pub mod common;
pub mod manifest;
pub mod parameters;
pub mod project;
pub mod template;

pub use crate::domain::DomainError;
pub use common::RelativePath;
pub use manifest::{FileMapping, OutputManifest};
pub use parameters::{ParameterSet, ParameterValue};
pub use project::{DEFAULT_GO_VERSION, DEFAULT_MODULE_PREFIX, ProjectConfig, ProjectConfigBuilder};
pub use template::{ResolvedTemplate, TemplateCategory, TemplateName, TemplateRef};

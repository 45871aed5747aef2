//! Core domain layer for Sova.
//!
//! This module contains pure logic with no I/O. Template lookup, rendering
//! and disk writes are reached through the ports defined in the application
//! layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Immutable values**: names, paths and parameter sets are validated once
//!   at construction and never change afterwards
pub mod blueprint;
pub mod entities;
pub mod error;
pub mod render;
pub mod value_objects;

mod validation;

pub use blueprint::{Blueprint, Feature, GoModule};
pub use entities::{
    DEFAULT_GO_VERSION, DEFAULT_MODULE_PREFIX, FileMapping, OutputManifest, ParameterSet,
    ParameterValue, ProjectConfig, ProjectConfigBuilder, RelativePath, ResolvedTemplate,
    TemplateCategory, TemplateName, TemplateRef,
    template::CANONICAL_ENTRY,
};
pub use error::{DomainError, ErrorCategory};
pub use render::{placeholders, render};
pub use validation::DomainValidator;
pub use value_objects::{FeatureToggles, ProjectKind};

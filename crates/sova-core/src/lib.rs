//! Sova Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Sova
//! Go project scaffolder, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │             sova-cli (CLI)              │
//! │   prompts, flags, post-generation cmds  │
//! └──────────────────┬──────────────────────┘
//!                    │ ProjectConfig
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (ProjectService → GenerationService)    │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │   (TemplateStore, TemplateRenderer,     │
//! │    Filesystem)                          │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     sova-adapters (Infrastructure)      │
//! │ (InMemoryStore, DirectoryStore, Local-  │
//! │  Filesystem, SimpleRenderer, ...)       │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (names, ParameterSet, render, manifest, │
//! │  blueprints, ProjectConfig)             │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sova_core::prelude::*;
//!
//! let config = ProjectConfig::builder("demo")
//!     .kind(ProjectKind::Cli)
//!     .build()?;
//!
//! let service = ProjectService::new(store, renderer, filesystem);
//! let result = service.create(&config, "./demo");
//! assert!(result.is_complete());
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GenerationOptions, GenerationResult, GenerationService, GenerationState, ProjectService,
        RollbackPolicy, TemplateService,
        ports::{Filesystem, TemplateRenderer, TemplateStore},
    };
    pub use crate::domain::{
        FeatureToggles, FileMapping, OutputManifest, ParameterSet, ParameterValue, ProjectConfig,
        ProjectKind, RelativePath, ResolvedTemplate, TemplateCategory, TemplateName, TemplateRef,
    };
    pub use crate::error::{SovaError, SovaResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Application layer for Sova.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ProjectService, GenerationService, TemplateService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Result**: The generation report returned on success and failure
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod result;
pub mod services;

// Re-export main services
pub use services::{
    CategoryInfo, // DTO for catalog listings
    GenerationOptions,
    GenerationService,
    ProjectService,
    RollbackPolicy,
    TemplateService,
};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, TemplateRenderer, TemplateStore};

pub use error::ApplicationError;
pub use result::{GenerationResult, GenerationState, GenerationSummary};

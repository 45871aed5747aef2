//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "create a project" or "list the catalog".

pub mod generation_service;
pub mod project_service;
pub mod template_service;

pub use generation_service::{GenerationOptions, GenerationService, RollbackPolicy};
pub use project_service::ProjectService;
pub use template_service::{CategoryInfo, TemplateService};

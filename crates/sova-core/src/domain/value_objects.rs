//! Domain value objects: ProjectKind and FeatureToggles.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! They hold NO manifest logic. What each kind generates lives in
//! `blueprint.rs`. This file's only job is to define the types, their
//! string representations, and their `FromStr` parsers.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── ProjectKind ──────────────────────────────────────────────────────────────

/// The kind of project to scaffold.
///
/// Every kind maps to exactly one template category and one blueprint;
/// adding a variant makes every `match` in the blueprint module fail to
/// compile until the new kind is declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectKind {
    /// HTTP API with a clean-architecture layout.
    Api,
    /// Command-line application.
    Cli,
}

impl ProjectKind {
    pub const ALL: [ProjectKind; 2] = [ProjectKind::Api, ProjectKind::Cli];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::Cli => "cli",
        }
    }

    /// Name of the template category holding this kind's templates.
    pub const fn category(&self) -> &'static str {
        self.as_str()
    }

    pub const fn description(&self) -> &'static str {
        match self {
            Self::Api => "A Go API project with clean architecture",
            Self::Cli => "A Go CLI project with clean architecture",
        }
    }
}

impl fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "api" => Ok(Self::Api),
            "cli" => Ok(Self::Cli),
            other => Err(DomainError::UnsupportedKind(other.to_string())),
        }
    }
}

// ── FeatureToggles ───────────────────────────────────────────────────────────

/// Optional integrations selected for a project.
///
/// Toggles decide which optional manifest entries and parameter fragments are
/// included. They never change how the renderer behaves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeatureToggles {
    /// Structured logging via zap.
    pub structured_logger: bool,
    /// PostgreSQL datastore.
    pub relational_db: bool,
    /// Redis cache.
    pub cache: bool,
    /// RabbitMQ message queue.
    pub message_queue: bool,
}

impl FeatureToggles {
    pub const fn none() -> Self {
        Self {
            structured_logger: false,
            relational_db: false,
            cache: false,
            message_queue: false,
        }
    }

    pub const fn with_structured_logger(mut self, on: bool) -> Self {
        self.structured_logger = on;
        self
    }

    pub const fn with_relational_db(mut self, on: bool) -> Self {
        self.relational_db = on;
        self
    }

    pub const fn with_cache(mut self, on: bool) -> Self {
        self.cache = on;
        self
    }

    pub const fn with_message_queue(mut self, on: bool) -> Self {
        self.message_queue = on;
        self
    }

    /// Whether any toggle needs an external service (database, cache, queue).
    pub const fn needs_services(&self) -> bool {
        self.relational_db || self.cache || self.message_queue
    }

    /// Labels of the enabled toggles, in declaration order.
    pub fn enabled(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.structured_logger {
            out.push("zap");
        }
        if self.relational_db {
            out.push("postgres");
        }
        if self.cache {
            out.push("redis");
        }
        if self.message_queue {
            out.push("rabbitmq");
        }
        out
    }
}

impl fmt::Display for FeatureToggles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let enabled = self.enabled();
        if enabled.is_empty() {
            f.write_str("none")
        } else {
            f.write_str(&enabled.join(", "))
        }
    }
}

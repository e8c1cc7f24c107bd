/// Shared types used across the codebase

use serde::{Deserialize, Serialize};

/// Operations an admin screen performs against the backend
/// Used by notices, logs and the per-entity route table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
    StatusChange, // Active flag or card publication status
}

impl Operation {
    pub fn verb(&self) -> &'static str {
        match self {
            Operation::List => "load",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::StatusChange => "update status of",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Operation::List => "list",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::StatusChange => "status_change",
        };
        f.write_str(name)
    }
}

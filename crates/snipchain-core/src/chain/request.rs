//! Chain creation request model.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{Chain, ChainId, ChainOption};
use crate::resolve::scanner::is_token_name_char;

/// Request to create a new chain.
///
/// Used by `snipchain add <json>` and by any editor front-end. The id is
/// always assigned by the repository and is not accepted here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChainRequest {
    /// Chain name (required, referenced as `[Chain:name]`)
    pub name: String,

    /// Selectable bodies (at least one)
    pub options: Vec<ChainOption>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_data: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_pinned: Option<bool>,
}

impl CreateChainRequest {
    /// Creates a request for a chain with a single untitled option.
    pub fn single(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: vec![ChainOption::new("1", "Default", body)],
            description: None,
            tags: Vec::new(),
            layout_data: None,
            is_pinned: None,
        }
    }

    /// Validate the request and return errors if any.
    pub fn validate(&self) -> Result<(), String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Name is required and cannot be empty".to_string());
        }

        // A name outside the token grammar could never be referenced
        if !name.chars().all(is_token_name_char) {
            return Err(format!(
                "Chain name '{}' may only contain letters, digits, '_', '-' and spaces",
                name
            ));
        }

        if self.options.is_empty() {
            return Err("At least one option is required".to_string());
        }

        let mut ids = HashSet::new();
        for option in &self.options {
            if !ids.insert(option.id.as_str()) {
                return Err(format!("Duplicate option id '{}'", option.id));
            }
        }

        if self.options.len() > 1 {
            let mut titles = HashSet::new();
            for option in &self.options {
                if option.title.trim().is_empty() {
                    return Err("Option titles are required when a chain has several options".to_string());
                }
                if !titles.insert(option.title.as_str()) {
                    return Err(format!("Duplicate option title '{}'", option.title));
                }
            }
        }

        Ok(())
    }

    /// Convert this request into a Chain with the given id.
    pub fn into_chain(self, id: ChainId) -> Chain {
        let mut chain = Chain::new(id, self.name.trim(), self.options);
        chain.description = self.description;
        chain.tags = self.tags;
        chain.layout_data = self.layout_data;
        chain.is_pinned = self.is_pinned.unwrap_or(false);
        chain.touch();
        chain
    }

}

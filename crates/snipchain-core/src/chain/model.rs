//! Chain domain models.

use serde::{Deserialize, Serialize};

/// Numeric identifier of a chain. Assigned once at creation and never reused.
pub type ChainId = u64;

/// One selectable template body within a chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainOption {
    /// Identifier unique within the owning chain (UI list key only).
    pub id: String,
    /// Label shown when the user has to pick between several options.
    pub title: String,
    /// Raw template text; may contain `[Chain:Name]` and `[?:Label]` tokens.
    pub body: String,
}

impl ChainOption {
    pub fn new(id: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            body: body.into(),
        }
    }
}

/// A named, user-authored template.
///
/// Only `id`, `name` and `options` take part in resolution. The remaining
/// fields belong to the editor/storage side and are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chain {
    pub id: ChainId,
    /// Lookup key for `[Chain:Name]` references (exact, case-sensitive).
    pub name: String,
    #[serde(default)]
    pub options: Vec<ChainOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Free-form editor layout state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_data: Option<serde_json::Value>,
    #[serde(default)]
    pub is_starter_chain: bool,
    #[serde(default)]
    pub is_pinned: bool,
    /// RFC3339 timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// RFC3339 timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Chain {
    /// Creates a chain with the given options and no metadata.
    pub fn new(id: ChainId, name: impl Into<String>, options: Vec<ChainOption>) -> Self {
        Self {
            id,
            name: name.into(),
            options,
            description: None,
            tags: Vec::new(),
            layout_data: None,
            is_starter_chain: false,
            is_pinned: false,
            created_at: None,
            updated_at: None,
        }
    }

    /// Convenience constructor for the common one-option chain.
    pub fn single(id: ChainId, name: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(id, name, vec![ChainOption::new("1", "Default", body)])
    }

    /// Finds an option by its exact title.
    pub fn option_by_title(&self, title: &str) -> Option<&ChainOption> {
        self.options.iter().find(|o| o.title == title)
    }

    /// Titles of all options, in order.
    pub fn option_titles(&self) -> Vec<String> {
        self.options.iter().map(|o| o.title.clone()).collect()
    }

    /// Stamps `updated_at` (and `created_at` when unset) with the current time.
    pub fn touch(&mut self) {
        let now = chrono::Utc::now().to_rfc3339();
        if self.created_at.is_none() {
            self.created_at = Some(now.clone());
        }
        self.updated_at = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_by_title_is_exact() {
        let chain = Chain::new(
            1,
            "Greeting",
            vec![
                ChainOption::new("a", "Formal", "Dear [?:Name],"),
                ChainOption::new("b", "Casual", "Hey [?:Name]!"),
            ],
        );

        assert_eq!(chain.option_by_title("Casual").unwrap().id, "b");
        assert!(chain.option_by_title("casual").is_none());
        assert_eq!(chain.option_titles(), vec!["Formal", "Casual"]);
    }

    #[test]
    fn test_touch_sets_timestamps() {
        let mut chain = Chain::single(1, "Sig", "Regards");
        chain.touch();
        let created = chain.created_at.clone();
        assert!(created.is_some());
        chain.touch();
        assert_eq!(chain.created_at, created);
        assert!(chain.updated_at.is_some());
    }

    #[test]
    fn test_deserialize_minimal_json() {
        let json = r#"{"id": 7, "name": "Empty"}"#;
        let chain: Chain = serde_json::from_str(json).unwrap();
        assert_eq!(chain.id, 7);
        assert!(chain.options.is_empty());
        assert!(!chain.is_pinned);
    }
}

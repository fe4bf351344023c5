//! Starter chains shipped with the application.
//!
//! These are example templates offered on first run. They are regular chains
//! once installed; `is_starter_chain` only records where they came from.

use std::sync::OnceLock;

use super::{ChainOption, CreateChainRequest};

/// Static storage for starter chain definitions (initialized once).
static STARTER_CHAINS: OnceLock<Vec<CreateChainRequest>> = OnceLock::new();

/// Returns the starter chain definitions.
pub fn starter_chains() -> &'static [CreateChainRequest] {
    STARTER_CHAINS.get_or_init(|| {
        vec![
            CreateChainRequest::single("Signature", "Best regards,\n[?:Your Name]"),
            CreateChainRequest {
                name: "Greeting".to_string(),
                options: vec![
                    ChainOption::new("formal", "Formal", "Dear [?:Recipient],"),
                    ChainOption::new("casual", "Casual", "Hi [?:Recipient]!"),
                ],
                description: Some("Opening line for emails".to_string()),
                tags: vec!["email".to_string()],
                layout_data: None,
                is_pinned: Some(true),
            },
            CreateChainRequest {
                name: "Follow Up".to_string(),
                options: vec![ChainOption::new(
                    "1",
                    "Default",
                    "[Chain:Greeting]\n\nJust following up on [?:Topic]. Let me know if you need anything else.\n\n[Chain:Signature]",
                )],
                description: Some("Polite follow-up email".to_string()),
                tags: vec!["email".to_string()],
                layout_data: None,
                is_pinned: None,
            },
            CreateChainRequest {
                name: "Bug Report".to_string(),
                options: vec![ChainOption::new(
                    "1",
                    "Default",
                    "Steps to reproduce:\n[?:Steps]\n\nExpected: [?:Expected]\nActual: [?:Actual]",
                )],
                description: None,
                tags: vec!["dev".to_string()],
                layout_data: None,
                is_pinned: None,
            },
        ]
    })
}

//! Collaborator contracts consumed by the resolver.
//!
//! A GUI backs [`ChoiceProvider`] and [`InputProvider`] with modal dialogs,
//! the CLI with a line editor, and tests with scripted stubs. To cancel a
//! resolution a provider returns a sentinel (e.g. an empty string).

use std::collections::HashMap;

use async_trait::async_trait;

use crate::chain::{Chain, ChainRepository};
use crate::error::Result;

/// Looks chains up by exact name.
#[async_trait]
pub trait ChainLookup: Send + Sync {
    /// Returns `Ok(None)` when no chain has this name. Absence is not an error.
    async fn get_chain(&self, name: &str) -> Result<Option<Chain>>;
}

#[async_trait]
impl<R: ChainRepository + ?Sized> ChainLookup for R {
    async fn get_chain(&self, name: &str) -> Result<Option<Chain>> {
        self.find_by_name(name).await
    }
}

/// Lets the user pick one option of a multi-option chain.
#[async_trait]
pub trait ChoiceProvider: Send + Sync {
    /// Returns the selected entry of `choices`.
    async fn provide_choice(&self, prompt: &str, choices: &[String]) -> Result<String>;
}

/// Asks the user for a literal value.
#[async_trait]
pub trait InputProvider: Send + Sync {
    async fn provide_input(&self, prompt: &str, initial_value: Option<&str>) -> Result<String>;
}

/// An immutable in-memory set of chains keyed by name.
#[derive(Debug, Clone, Default)]
pub struct ChainSet {
    chains: HashMap<String, Chain>,
}

impl ChainSet {
    pub fn new(chains: impl IntoIterator<Item = Chain>) -> Self {
        Self {
            chains: chains.into_iter().map(|c| (c.name.clone(), c)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}

#[async_trait]
impl ChainLookup for ChainSet {
    async fn get_chain(&self, name: &str) -> Result<Option<Chain>> {
        Ok(self.chains.get(name).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_chain_set_lookup_is_case_sensitive() {
        let set = ChainSet::new(vec![Chain::single(1, "Sig", "Regards")]);
        assert_eq!(set.len(), 1);
        assert!(set.get_chain("Sig").await.unwrap().is_some());
        assert!(set.get_chain("sig").await.unwrap().is_none());
    }
}

//! Chain repository trait.

use async_trait::async_trait;

use crate::chain::{Chain, ChainId, CreateChainRequest};
use crate::error::Result;

/// Repository for managing chains.
///
/// The resolution engine only ever needs [`find_by_name`](Self::find_by_name);
/// every repository is usable as a [`ChainLookup`](crate::resolve::ChainLookup).
#[async_trait]
pub trait ChainRepository: Send + Sync {
    /// Lists all chains, ordered by id.
    async fn list_chains(&self) -> Result<Vec<Chain>>;

    /// Finds a chain by exact (case-sensitive) name. Absence is `Ok(None)`.
    async fn find_by_name(&self, name: &str) -> Result<Option<Chain>>;

    /// Finds a chain by id.
    async fn find_by_id(&self, id: ChainId) -> Result<Option<Chain>>;

    /// Validates the request, assigns the next id and stores the new chain.
    async fn create_chain(&self, request: CreateChainRequest) -> Result<Chain>;

    /// Inserts or replaces a chain, keyed by id.
    async fn save_chain(&self, chain: Chain) -> Result<()>;

    /// Removes a chain by id.
    async fn remove_chain(&self, id: ChainId) -> Result<()>;
}

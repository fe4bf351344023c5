//! TOML-backed ChainRepository implementation.
//!
//! The whole library lives in a single file:
//!
//! ```toml
//! next_id = 3
//!
//! [[chain]]
//! id = 1
//! name = "Signature"
//!
//! [[chain.options]]
//! id = "1"
//! title = "Default"
//! body = "Best regards,\n[?:Your Name]"
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use snipchain_core::chain::{Chain, ChainId, ChainRepository, CreateChainRequest, starter_chains};
use snipchain_core::error::{Result, SnipchainError};

use crate::paths::SnipchainPaths;
use crate::storage::AtomicTomlFile;

/// On-disk layout of `chains.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChainLibrary {
    /// Next id to hand out. Ids are never reused, even after deletion.
    #[serde(default)]
    pub next_id: ChainId,
    #[serde(default, rename = "chain")]
    pub chains: Vec<Chain>,
}

impl ChainLibrary {
    fn allocate_id(&mut self) -> ChainId {
        let max_existing = self.chains.iter().map(|c| c.id).max().unwrap_or(0);
        let id = self.next_id.max(max_existing + 1).max(1);
        self.next_id = id + 1;
        id
    }

    fn name_taken(&self, name: &str, except: Option<ChainId>) -> bool {
        self.chains
            .iter()
            .any(|c| c.name == name && Some(c.id) != except)
    }

    fn insert(&mut self, request: CreateChainRequest) -> Result<Chain> {
        request.validate().map_err(SnipchainError::validation)?;
        if self.name_taken(request.name.trim(), None) {
            return Err(SnipchainError::validation(format!(
                "A chain named '{}' already exists",
                request.name.trim()
            )));
        }
        let chain = request.into_chain(self.allocate_id());
        self.chains.push(chain.clone());
        Ok(chain)
    }
}

/// A repository storing every chain in one TOML file.
///
/// File access is blocking and runs on tokio's blocking pool.
pub struct TomlChainRepository {
    file: AtomicTomlFile<ChainLibrary>,
}

impl TomlChainRepository {
    /// Creates a repository at the default location (`~/.config/snipchain/chains.toml`).
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(SnipchainPaths::chains_file()?))
    }

    /// Creates a repository with a custom file path.
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    async fn load_library(&self) -> Result<ChainLibrary> {
        let file = self.file.clone();
        let library = tokio::task::spawn_blocking(move || file.load())
            .await
            .map_err(|e| SnipchainError::internal(format!("Storage task failed: {}", e)))??;
        Ok(library.unwrap_or_default())
    }

    async fn update<R, F>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut ChainLibrary) -> Result<R> + Send + 'static,
        R: Send + 'static,
    {
        let file = self.file.clone();
        tokio::task::spawn_blocking(move || file.update(ChainLibrary::default(), f))
            .await
            .map_err(|e| SnipchainError::internal(format!("Storage task failed: {}", e)))?
    }

    /// Installs the starter chains whose names are not taken yet.
    /// Returns the chains that were added.
    pub async fn seed_starter_chains(&self) -> Result<Vec<Chain>> {
        let added = self
            .update(|library| {
                let mut added = Vec::new();
                for request in starter_chains() {
                    if library.name_taken(&request.name, None) {
                        continue;
                    }
                    let mut chain = library.insert(request.clone())?;
                    chain.is_starter_chain = true;
                    if let Some(stored) = library.chains.iter_mut().find(|c| c.id == chain.id) {
                        stored.is_starter_chain = true;
                    }
                    added.push(chain);
                }
                Ok(added)
            })
            .await?;
        info!(count = added.len(), "Seeded starter chains");
        Ok(added)
    }

    /// Lists pinned chains only.
    pub async fn list_pinned(&self) -> Result<Vec<Chain>> {
        Ok(self
            .list_chains()
            .await?
            .into_iter()
            .filter(|c| c.is_pinned)
            .collect())
    }
}

#[async_trait]
impl ChainRepository for TomlChainRepository {
    async fn list_chains(&self) -> Result<Vec<Chain>> {
        let mut chains = self.load_library().await?.chains;
        chains.sort_by_key(|c| c.id);
        Ok(chains)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Chain>> {
        let library = self.load_library().await?;
        Ok(library.chains.into_iter().find(|c| c.name == name))
    }

    async fn find_by_id(&self, id: ChainId) -> Result<Option<Chain>> {
        let library = self.load_library().await?;
        Ok(library.chains.into_iter().find(|c| c.id == id))
    }

    async fn create_chain(&self, request: CreateChainRequest) -> Result<Chain> {
        let chain = self.update(move |library| library.insert(request)).await?;
        debug!(id = chain.id, name = %chain.name, "Created chain");
        Ok(chain)
    }

    async fn save_chain(&self, mut chain: Chain) -> Result<()> {
        chain.touch();
        let id = chain.id;
        self.update(move |library| {
            if library.name_taken(&chain.name, Some(chain.id)) {
                return Err(SnipchainError::validation(format!(
                    "A chain named '{}' already exists",
                    chain.name
                )));
            }
            match library.chains.iter_mut().find(|c| c.id == chain.id) {
                Some(existing) => *existing = chain,
                None => {
                    library.next_id = library.next_id.max(chain.id + 1);
                    library.chains.push(chain);
                }
            }
            Ok(())
        })
        .await?;
        debug!(id, "Saved chain");
        Ok(())
    }

    async fn remove_chain(&self, id: ChainId) -> Result<()> {
        self.update(move |library| {
            let before = library.chains.len();
            library.chains.retain(|c| c.id != id);
            if library.chains.len() == before {
                return Err(SnipchainError::not_found("chain", id.to_string()));
            }
            Ok(())
        })
        .await?;
        debug!(id, "Removed chain");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snipchain_core::chain::ChainOption;
    use tempfile::TempDir;

    fn repo(temp_dir: &TempDir) -> TomlChainRepository {
        TomlChainRepository::with_path(temp_dir.path().join("chains.toml"))
    }

    #[tokio::test]
    async fn test_empty_library() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repo(&temp_dir);

        assert!(repo.list_chains().await.unwrap().is_empty());
        assert!(repo.find_by_name("Anything").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repo(&temp_dir);

        let a = repo.create_chain(CreateChainRequest::single("A", "a")).await.unwrap();
        let b = repo.create_chain(CreateChainRequest::single("B", "b")).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);

        // Ids are not reused after deletion
        repo.remove_chain(b.id).await.unwrap();
        let c = repo.create_chain(CreateChainRequest::single("C", "c")).await.unwrap();
        assert_eq!(c.id, 3);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_name() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repo(&temp_dir);

        repo.create_chain(CreateChainRequest::single("Sig", "a")).await.unwrap();
        let err = repo
            .create_chain(CreateChainRequest::single("Sig", "b"))
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(repo.list_chains().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_find_by_name_is_exact() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repo(&temp_dir);
        repo.create_chain(CreateChainRequest::single("Greeting", "Hi")).await.unwrap();

        assert!(repo.find_by_name("Greeting").await.unwrap().is_some());
        assert!(repo.find_by_name("greeting").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_updates_in_place() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repo(&temp_dir);
        let mut chain = repo
            .create_chain(CreateChainRequest::single("Tone", "plain"))
            .await
            .unwrap();

        chain.options.push(ChainOption::new("2", "Warm", "warmly"));
        chain.is_pinned = true;
        repo.save_chain(chain.clone()).await.unwrap();

        let loaded = repo.find_by_id(chain.id).await.unwrap().unwrap();
        assert_eq!(loaded.options.len(), 2);
        assert!(loaded.is_pinned);
        assert_eq!(repo.list_pinned().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_remove_missing_chain() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repo(&temp_dir);
        assert!(repo.remove_chain(9).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_seed_starter_chains_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repo(&temp_dir);

        let first = repo.seed_starter_chains().await.unwrap();
        assert_eq!(first.len(), starter_chains().len());
        assert!(first.iter().all(|c| c.is_starter_chain));

        let second = repo.seed_starter_chains().await.unwrap();
        assert!(second.is_empty());

        let stored = repo.find_by_name("Greeting").await.unwrap().unwrap();
        assert!(stored.is_starter_chain);
        assert!(stored.is_pinned);
    }
}

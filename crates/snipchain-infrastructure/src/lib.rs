pub mod config_service;
pub mod paths;
pub mod storage;
pub mod toml_chain_repository;

pub use crate::config_service::ConfigService;
pub use crate::paths::SnipchainPaths;
pub use crate::toml_chain_repository::{ChainLibrary, TomlChainRepository};

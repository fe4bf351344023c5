//! Core domain of Snipchain: chains, their storage contract, and the engine
//! that expands `[Chain:Name]` references and `[?:Label]` prompts.

pub mod chain;
pub mod config;
pub mod error;
pub mod resolve;

// Re-export common error type
pub use error::SnipchainError;

pub use chain::{Chain, ChainId, ChainOption, ChainRepository, CreateChainRequest};
pub use config::{AppConfig, CycleDetection, ResolverConfig};
pub use resolve::{ChainLookup, ChainResolver, ChoiceProvider, InputProvider, resolve};

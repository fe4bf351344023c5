//! Chain definitions and storage contracts.
//!
//! A chain is a named set of template bodies ("options"). Bodies may reference
//! other chains with `[Chain:Name]` and ask the user for values with `[?:Label]`.

pub mod model;
pub mod repository;
pub mod request;
pub mod starter;

pub use model::{Chain, ChainId, ChainOption};
pub use repository::ChainRepository;
pub use request::CreateChainRequest;
pub use starter::starter_chains;

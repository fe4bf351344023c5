//! Chain resolution: token scanning, recursive expansion and library checks.

pub mod analysis;
pub mod engine;
pub mod provider;
pub mod scanner;

pub use analysis::{LibraryReport, MissingReference, analyze_library};
pub use engine::{ChainResolver, error_marker, resolve};
pub use provider::{ChainLookup, ChainSet, ChoiceProvider, InputProvider};
pub use scanner::{ReferenceSummary, Token, TokenKind, scan_references};

//! Recursive chain expansion.
//!
//! Each level of a resolution runs two passes over its text:
//!
//! 1. Every `[Chain:Name]` token is replaced, left to right, by the resolved
//!    body of the referenced chain. Bodies are resolved recursively (including
//!    their own prompts) before the next token is looked at.
//! 2. Every `[?:Label]` token in the assembled text is replaced by a value from
//!    the [`InputProvider`]. This also covers prompts that arrive through a
//!    fallback value or a body returned unexpanded by the depth cap.
//!
//! Chain references are scanned once per level, so text inserted for a
//! reference is not expanded again by the level that inserted it. Values
//! typed for a prompt are not rescanned by the pass that filled them in.
//!
//! Nothing here fails: missing chains, empty chains, self-references, depth
//! overflow and collaborator errors all degrade to text in the output.

use futures::future::BoxFuture;
use tracing::{debug, warn};

use super::provider::{ChainLookup, ChoiceProvider, InputProvider};
use super::scanner::{self, Token};
use crate::chain::{Chain, ChainId};
use crate::config::{CycleDetection, ResolverConfig};
use crate::error::{Result, SnipchainError};

/// Renders a collaborator failure as an inline marker.
pub fn error_marker(err: &SnipchainError) -> String {
    format!("[ERROR: {}]", err.detail())
}

/// Prompt passed to the input provider when a reference cannot be expanded.
pub fn missing_chain_prompt(name: &str) -> String {
    format!("Chain \"{}\" not found. Enter replacement text:", name)
}

/// Prompt passed to the choice provider for multi-option chains.
pub fn choice_prompt(chain_name: &str) -> String {
    format!("Select an option for \"{}\":", chain_name)
}

/// Prompt passed to the input provider when a selection matches no option.
pub fn unknown_option_prompt(chain_name: &str, selection: &str) -> String {
    format!(
        "Option \"{}\" not found in chain \"{}\". Enter replacement text:",
        selection, chain_name
    )
}

/// Expands chain references and prompts against a set of collaborators.
///
/// The resolver holds no state between calls; each [`resolve`](Self::resolve)
/// is independent.
pub struct ChainResolver<'a, L: ?Sized, C: ?Sized, I: ?Sized> {
    lookup: &'a L,
    chooser: &'a C,
    input: &'a I,
    config: ResolverConfig,
}

impl<'a, L, C, I> ChainResolver<'a, L, C, I>
where
    L: ChainLookup + ?Sized,
    C: ChoiceProvider + ?Sized,
    I: InputProvider + ?Sized,
{
    pub fn new(lookup: &'a L, chooser: &'a C, input: &'a I) -> Self {
        Self {
            lookup,
            chooser,
            input,
            config: ResolverConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Fully resolves `text`.
    pub async fn resolve(&self, text: &str) -> String {
        self.resolve_at(text.to_string(), 0, Vec::new()).await
    }

    /// Resolves a stored chain exactly as a top-level `[Chain:Name]`
    /// reference to it would be, without going through the lookup.
    pub async fn resolve_chain(&self, chain: &Chain) -> String {
        let expanded = match self.expand_chain(chain, 0, &[]).await {
            Ok(expanded) => expanded,
            Err(e) => {
                warn!(chain = %chain.name, error = %e, "Failed to resolve chain");
                error_marker(&e)
            }
        };
        self.fill_prompts(&expanded).await
    }

    /// `stack` holds the ids of the chains whose bodies are being expanded,
    /// innermost last.
    fn resolve_at(&self, text: String, depth: usize, stack: Vec<ChainId>) -> BoxFuture<'_, String> {
        Box::pin(async move {
            if depth > self.config.max_depth {
                warn!(
                    depth,
                    max_depth = self.config.max_depth,
                    "Maximum chain depth exceeded, leaving text unexpanded"
                );
                return text;
            }
            if !scanner::has_tokens(&text) {
                return text;
            }

            // Pass 1: chain references, scanned once over this level's text.
            let mut expanded = String::with_capacity(text.len());
            let mut last = 0;
            for token in scanner::chain_references(&text) {
                expanded.push_str(&text[last..token.span.start]);
                match self.expand_reference(&token, depth, &stack).await {
                    Ok(body) => expanded.push_str(&body),
                    Err(e) => {
                        warn!(chain = %token.name, error = %e, "Failed to resolve chain reference");
                        expanded.push_str(&error_marker(&e));
                    }
                }
                last = token.span.end;
            }
            expanded.push_str(&text[last..]);

            // Pass 2: prompts in the assembled text, including fallback values
            // and bodies cut off by the depth cap.
            self.fill_prompts(&expanded).await
        })
    }

    async fn expand_reference(&self, token: &Token, depth: usize, stack: &[ChainId]) -> Result<String> {
        let name = token.name.as_str();

        match self.lookup.get_chain(name).await? {
            Some(chain) => self.expand_chain(&chain, depth, stack).await,
            None => {
                warn!(chain = %name, "Referenced chain not found");
                self.input.provide_input(&missing_chain_prompt(name), None).await
            }
        }
    }

    async fn expand_chain(&self, chain: &Chain, depth: usize, stack: &[ChainId]) -> Result<String> {
        let name = chain.name.as_str();

        if self.is_reentry(chain.id, stack) {
            warn!(chain = %name, id = chain.id, "Skipping self-referencing chain");
            return Ok(self.config.self_reference_marker.clone());
        }

        let option = match chain.options.len() {
            0 => {
                warn!(chain = %name, "Referenced chain has no options");
                return self.input.provide_input(&missing_chain_prompt(name), None).await;
            }
            1 => &chain.options[0],
            _ => {
                let selected = self
                    .chooser
                    .provide_choice(&choice_prompt(name), &chain.option_titles())
                    .await?;
                match chain.option_by_title(&selected) {
                    Some(option) => option,
                    None => {
                        warn!(chain = %name, selection = %selected, "Selection matches no option");
                        return self
                            .input
                            .provide_input(&unknown_option_prompt(name, &selected), None)
                            .await;
                    }
                }
            }
        };

        debug!(chain = %name, option = %option.title, depth = depth + 1, "Expanding chain");
        let mut child_stack = stack.to_vec();
        child_stack.push(chain.id);
        Ok(self.resolve_at(option.body.clone(), depth + 1, child_stack).await)
    }

    fn is_reentry(&self, id: ChainId, stack: &[ChainId]) -> bool {
        match self.config.cycle_detection {
            CycleDetection::SelfOnly => stack.last() == Some(&id),
            CycleDetection::Ancestors => stack.contains(&id),
        }
    }

    async fn fill_prompts(&self, text: &str) -> String {
        let tokens = scanner::prompts(text);
        if tokens.is_empty() {
            return text.to_string();
        }

        let mut output = String::with_capacity(text.len());
        let mut last = 0;
        for token in tokens {
            output.push_str(&text[last..token.span.start]);
            match self.input.provide_input(&token.name, None).await {
                Ok(value) => output.push_str(&value),
                Err(e) => {
                    warn!(label = %token.name, error = %e, "Failed to read prompt value");
                    output.push_str(&error_marker(&e));
                }
            }
            last = token.span.end;
        }
        output.push_str(&text[last..]);
        output
    }
}

/// Resolves `text` with the default configuration.
pub async fn resolve<L, C, I>(text: &str, lookup: &L, chooser: &C, input: &I) -> String
where
    L: ChainLookup + ?Sized,
    C: ChoiceProvider + ?Sized,
    I: InputProvider + ?Sized,
{
    ChainResolver::new(lookup, chooser, input).resolve(text).await
}

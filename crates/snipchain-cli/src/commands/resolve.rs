use anyhow::{Result, anyhow, bail};
use clap::Args;
use snipchain_core::chain::ChainRepository;
use snipchain_core::config::ResolverConfig;
use snipchain_core::resolve::ChainResolver;
use snipchain_infrastructure::TomlChainRepository;

use crate::prompt::{TerminalPrompter, parse_assignment};

#[derive(Args)]
pub struct ResolveArgs {
    /// Chain to expand
    #[arg(required_unless_present = "text", conflicts_with = "text")]
    name: Option<String>,

    /// Expand this text instead of a stored chain
    #[arg(long)]
    text: Option<String>,

    /// Answer a prompt: LABEL=VALUE (repeatable)
    #[arg(long = "set", value_name = "LABEL=VALUE", value_parser = parse_assignment)]
    sets: Vec<(String, String)>,

    /// Pick an option: CHAIN=TITLE (repeatable)
    #[arg(long = "choose", value_name = "CHAIN=TITLE", value_parser = parse_assignment)]
    chooses: Vec<(String, String)>,

    /// Never ask on the terminal; unanswered prompts become empty
    #[arg(long)]
    no_input: bool,
}

pub async fn run(repo: &TomlChainRepository, config: ResolverConfig, args: ResolveArgs) -> Result<()> {
    let prompter = TerminalPrompter::new(args.sets, args.chooses, !args.no_input);
    let resolver = ChainResolver::new(repo, &prompter, &prompter).with_config(config);

    let resolved = match (args.name, args.text) {
        (_, Some(text)) => resolver.resolve(&text).await,
        (Some(name), None) => {
            let chain = repo
                .find_by_name(&name)
                .await?
                .ok_or_else(|| anyhow!("Chain '{}' not found", name))?;
            resolver.resolve_chain(&chain).await
        }
        (None, None) => bail!("Give a chain name or --text"),
    };

    println!("{}", resolved);
    Ok(())
}

//! Library management: list, show, add, remove, seed.

use anyhow::{Context, Result, anyhow};
use colored::Colorize;
use snipchain_core::chain::{Chain, ChainRepository, CreateChainRequest};
use snipchain_infrastructure::TomlChainRepository;

fn flags(chain: &Chain) -> String {
    let mut flags = Vec::new();
    if chain.is_pinned {
        flags.push("pinned");
    }
    if chain.is_starter_chain {
        flags.push("starter");
    }
    if flags.is_empty() {
        String::new()
    } else {
        format!("[{}]", flags.join(", "))
    }
}

async fn find(repo: &TomlChainRepository, name: &str) -> Result<Chain> {
    repo.find_by_name(name)
        .await?
        .ok_or_else(|| anyhow!("Chain '{}' not found", name))
}

pub async fn list(repo: &TomlChainRepository, pinned_only: bool) -> Result<()> {
    let chains = if pinned_only {
        repo.list_pinned().await?
    } else {
        repo.list_chains().await?
    };

    if chains.is_empty() {
        println!("No chains in {}", repo.path().display());
        return Ok(());
    }

    for chain in chains {
        let count = chain.options.len();
        println!(
            "{:>4}  {}  {} {}",
            chain.id.to_string().bright_black(),
            chain.name.bold(),
            format!("({} option{})", count, if count == 1 { "" } else { "s" }).bright_black(),
            flags(&chain).yellow()
        );
    }
    Ok(())
}

pub async fn show(repo: &TomlChainRepository, name: &str) -> Result<()> {
    let chain = find(repo, name).await?;

    println!("{} {}", chain.name.bold(), flags(&chain).yellow());
    if let Some(description) = &chain.description {
        println!("{}", description.bright_black());
    }
    if !chain.tags.is_empty() {
        println!("tags: {}", chain.tags.join(", "));
    }
    for option in &chain.options {
        println!();
        println!("{}", format!("--- {} ---", option.title).cyan());
        println!("{}", option.body);
    }
    Ok(())
}

pub async fn add(repo: &TomlChainRepository, json: &str) -> Result<()> {
    let request: CreateChainRequest =
        serde_json::from_str(json).context("Invalid chain JSON")?;
    let chain = repo.create_chain(request).await?;
    println!("{} {} (id {})", "Created".green(), chain.name.bold(), chain.id);
    Ok(())
}

pub async fn remove(repo: &TomlChainRepository, name: &str) -> Result<()> {
    let chain = find(repo, name).await?;
    repo.remove_chain(chain.id).await?;
    println!("{} {}", "Removed".green(), chain.name.bold());
    Ok(())
}

pub async fn seed(repo: &TomlChainRepository) -> Result<()> {
    let added = repo.seed_starter_chains().await?;
    if added.is_empty() {
        println!("Starter chains already installed");
    }
    for chain in added {
        println!("{} {}", "Added".green(), chain.name.bold());
    }
    Ok(())
}

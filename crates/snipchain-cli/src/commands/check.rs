use anyhow::{Result, bail};
use colored::Colorize;
use snipchain_core::chain::ChainRepository;
use snipchain_core::resolve::analyze_library;
use snipchain_infrastructure::TomlChainRepository;

pub async fn run(repo: &TomlChainRepository) -> Result<()> {
    let chains = repo.list_chains().await?;
    let report = analyze_library(&chains);

    if report.is_clean() {
        println!("{} {} chains, no problems found", "OK".green(), chains.len());
        return Ok(());
    }

    for missing in &report.missing_references {
        println!(
            "{} {} / {} references missing chain '{}'",
            "missing".red(),
            missing.chain,
            missing.option,
            missing.target
        );
    }
    for name in &report.self_references {
        println!("{} {} references itself", "self".yellow(), name);
    }
    for cycle in &report.cycles {
        let mut path = cycle.clone();
        if let Some(first) = cycle.first() {
            path.push(first.clone());
        }
        println!("{} {}", "cycle".yellow(), path.join(" -> "));
    }
    for name in &report.empty_chains {
        println!("{} {} has no options", "empty".yellow(), name);
    }
    for name in &report.duplicate_names {
        println!("{} more than one chain is named '{}'", "duplicate".yellow(), name);
    }

    if !report.missing_references.is_empty() {
        bail!("{} missing reference(s)", report.missing_references.len());
    }
    Ok(())
}

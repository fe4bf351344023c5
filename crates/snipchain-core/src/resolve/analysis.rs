//! Static checks over a whole chain library.
//!
//! The resolver tolerates broken references at run time; this module reports
//! them up front so an editor can flag them. Cycles among distinct chains are
//! found here by walking the reference graph, independently of how the
//! resolver is configured to treat them.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::scanner::scan_references;
use crate::chain::Chain;

/// A reference from one chain option to a chain name that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingReference {
    pub chain: String,
    pub option: String,
    pub target: String,
}

/// Findings from [`analyze_library`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LibraryReport {
    pub missing_references: Vec<MissingReference>,
    /// Chains with at least one option that references the chain itself.
    pub self_references: Vec<String>,
    /// Chains that resolve to a fallback prompt because they have no options.
    pub empty_chains: Vec<String>,
    /// Each cycle is listed once, starting at its alphabetically first chain.
    pub cycles: Vec<Vec<String>>,
    /// Names used by more than one chain; lookups only ever see one of them.
    pub duplicate_names: Vec<String>,
}

impl LibraryReport {
    pub fn is_clean(&self) -> bool {
        self.missing_references.is_empty()
            && self.self_references.is_empty()
            && self.empty_chains.is_empty()
            && self.cycles.is_empty()
            && self.duplicate_names.is_empty()
    }
}

/// Analyzes every option body of every chain.
pub fn analyze_library(chains: &[Chain]) -> LibraryReport {
    let mut report = LibraryReport::default();

    let mut seen = BTreeSet::new();
    let mut duplicates = BTreeSet::new();
    for chain in chains {
        if !seen.insert(chain.name.as_str()) {
            duplicates.insert(chain.name.clone());
        }
    }
    report.duplicate_names = duplicates.into_iter().collect();

    // name -> referenced names, across all options
    let mut graph: BTreeMap<&str, BTreeSet<String>> = BTreeMap::new();

    for chain in chains {
        if chain.options.is_empty() {
            report.empty_chains.push(chain.name.clone());
        }

        let edges = graph.entry(chain.name.as_str()).or_default();
        let mut self_referencing = false;
        for option in &chain.options {
            for target in scan_references(&option.body).chains {
                if target == chain.name {
                    self_referencing = true;
                } else if !seen.contains(target.as_str()) {
                    report.missing_references.push(MissingReference {
                        chain: chain.name.clone(),
                        option: option.title.clone(),
                        target: target.clone(),
                    });
                }
                edges.insert(target);
            }
        }
        if self_referencing {
            report.self_references.push(chain.name.clone());
        }
    }

    report.cycles = find_cycles(&graph);
    report
}

/// Finds elementary cycles of length >= 2 with a DFS from each node,
/// only following edges to nodes that sort after the start node so each
/// cycle is reported once.
fn find_cycles(graph: &BTreeMap<&str, BTreeSet<String>>) -> Vec<Vec<String>> {
    let mut cycles = Vec::new();

    for &start in graph.keys() {
        let mut path = vec![start.to_string()];
        walk(graph, start, start, &mut path, &mut cycles);
    }

    cycles
}

fn walk(
    graph: &BTreeMap<&str, BTreeSet<String>>,
    start: &str,
    node: &str,
    path: &mut Vec<String>,
    cycles: &mut Vec<Vec<String>>,
) {
    let Some(edges) = graph.get(node) else {
        return;
    };
    for next in edges {
        if next == start {
            if path.len() > 1 {
                cycles.push(path.clone());
            }
            continue;
        }
        if next.as_str() < start || path.contains(next) || !graph.contains_key(next.as_str()) {
            continue;
        }
        path.push(next.clone());
        walk(graph, start, next, path, cycles);
        path.pop();
    }
}

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use snipchain_core::chain::{Chain, ChainRepository, CreateChainRequest};
use snipchain_core::error::Result;
use snipchain_core::resolve::{ChainResolver, ChoiceProvider, InputProvider, analyze_library, resolve};
use snipchain_core::{CycleDetection, ResolverConfig};
use snipchain_infrastructure::TomlChainRepository;
use tempfile::TempDir;

/// Answers prompts by label and records the order they were asked in.
#[derive(Default)]
struct Answers {
    values: Mutex<HashMap<String, VecDeque<String>>>,
    asked: Mutex<Vec<String>>,
}

impl Answers {
    fn with(pairs: &[(&str, &str)]) -> Self {
        let answers = Self::default();
        {
            let mut values = answers.values.lock().unwrap();
            for (label, value) in pairs {
                values
                    .entry(label.to_string())
                    .or_default()
                    .push_back(value.to_string());
            }
        }
        answers
    }

    fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }
}

#[async_trait]
impl InputProvider for Answers {
    async fn provide_input(&self, prompt: &str, _initial: Option<&str>) -> Result<String> {
        self.asked.lock().unwrap().push(prompt.to_string());
        let mut values = self.values.lock().unwrap();
        Ok(values
            .get_mut(prompt)
            .and_then(|queue| queue.pop_front())
            .unwrap_or_default())
    }
}

struct Pick(&'static str);

#[async_trait]
impl ChoiceProvider for Pick {
    async fn provide_choice(&self, _prompt: &str, choices: &[String]) -> Result<String> {
        assert!(choices.iter().any(|c| c == self.0), "{:?}", choices);
        Ok(self.0.to_string())
    }
}

fn temp_repo() -> (TempDir, TomlChainRepository) {
    let temp_dir = TempDir::new().unwrap();
    let repo = TomlChainRepository::with_path(temp_dir.path().join("chains.toml"));
    (temp_dir, repo)
}

#[tokio::test]
async fn test_starter_follow_up_resolves_end_to_end() {
    let (_temp_dir, repo) = temp_repo();
    repo.seed_starter_chains().await.unwrap();

    let answers = Answers::with(&[
        ("Recipient", "Sam"),
        ("Your Name", "Alex"),
        ("Topic", "the invoice"),
    ]);

    let out = resolve("[Chain:Follow Up]", &repo, &Pick("Casual"), &answers).await;

    assert_eq!(
        out,
        "Hi Sam!\n\nJust following up on the invoice. Let me know if you need anything else.\n\nBest regards,\nAlex"
    );
    assert_eq!(answers.asked(), vec!["Recipient", "Your Name", "Topic"]);
}

#[tokio::test]
async fn test_resolves_through_trait_object() {
    let (_temp_dir, repo) = temp_repo();
    repo.create_chain(CreateChainRequest::single("Sig", "-- [?:Name]"))
        .await
        .unwrap();
    let repo: Arc<dyn ChainRepository> = Arc::new(repo);

    let answers = Answers::with(&[("Name", "Kim")]);
    let out = resolve("Thanks\n[Chain:Sig]", repo.as_ref(), &Pick("Default"), &answers).await;

    assert_eq!(out, "Thanks\n-- Kim");
}

#[tokio::test]
async fn test_missing_reference_asks_for_stand_in() {
    let (_temp_dir, repo) = temp_repo();
    repo.create_chain(CreateChainRequest::single("Outer", "[[Chain:Nowhere]]"))
        .await
        .unwrap();

    let answers = Answers::with(&[]);
    let out = resolve("[Chain:Outer]", &repo, &Pick("Default"), &answers).await;

    assert_eq!(out, "[]");
    assert_eq!(answers.asked(), vec!["Chain \"Nowhere\" not found. Enter replacement text:"]);

    let report = analyze_library(&repo.list_chains().await.unwrap());
    assert_eq!(report.missing_references.len(), 1);
    assert_eq!(report.missing_references[0].target, "Nowhere");
}

#[tokio::test]
async fn test_renamed_chain_breaks_reference_until_fixed() {
    let (_temp_dir, repo) = temp_repo();
    let mut inner = repo
        .create_chain(CreateChainRequest::single("Inner", "inside"))
        .await
        .unwrap();
    repo.create_chain(CreateChainRequest::single("Outer", "<[Chain:Inner]>"))
        .await
        .unwrap();

    inner.name = "Renamed".to_string();
    repo.save_chain(inner).await.unwrap();

    let answers = Answers::with(&[]);
    let out = resolve("[Chain:Outer]", &repo, &Pick("Default"), &answers).await;
    assert_eq!(out, "<>");
    assert_eq!(answers.asked().len(), 1);
}

#[tokio::test]
async fn test_cycle_configuration_applies_to_stored_chains() {
    let (_temp_dir, repo) = temp_repo();
    for (name, next) in [("A", "B"), ("B", "C"), ("C", "A")] {
        let request = CreateChainRequest::single(name, format!("{}>[Chain:{}]", name, next));
        repo.create_chain(request).await.unwrap();
    }

    let report = analyze_library(&repo.list_chains().await.unwrap());
    assert_eq!(report.cycles, vec![vec!["A".to_string(), "B".to_string(), "C".to_string()]]);

    let answers = Answers::default();
    let chooser = Pick("Default");
    let config = ResolverConfig {
        cycle_detection: CycleDetection::Ancestors,
        ..ResolverConfig::default()
    };
    let out = ChainResolver::new(&repo, &chooser, &answers)
        .with_config(config)
        .resolve("[Chain:A]")
        .await;

    assert_eq!(out, "A>B>C>[Self-reference skipped]");
}

#[tokio::test]
async fn test_stored_chain_resolves_without_matchable_name() {
    let (_temp_dir, repo) = temp_repo();
    repo.save_chain(Chain::single(1, "Q&A", "[Chain:Sig] says [?:Answer]"))
        .await
        .unwrap();
    repo.create_chain(CreateChainRequest::single("Sig", "Kim"))
        .await
        .unwrap();

    let chain = repo.find_by_name("Q&A").await.unwrap().unwrap();
    let answers = Answers::with(&[("Answer", "yes")]);
    let chooser = Pick("Default");
    let out = ChainResolver::new(&repo, &chooser, &answers)
        .resolve_chain(&chain)
        .await;

    assert_eq!(out, "Kim says yes");
    assert_eq!(answers.asked(), vec!["Answer"]);
}

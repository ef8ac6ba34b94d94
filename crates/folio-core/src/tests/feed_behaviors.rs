//! Behavioral tests for the project feed

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use crate::config::SiteConfig;
use crate::error::Error;
use crate::feed::{LanguageLookup, assemble_cards, select_repositories};
use crate::repo::{Repository, parse_listing};

fn archived(name: &str) -> Repository {
    let mut repo = Repository::new("octo", name).with_stars(99);
    repo.archived = true;
    repo
}

// ============================================================================
// ORDERING BEHAVIORS
// ============================================================================

#[test]
fn given_featured_repo_with_no_stars_when_selecting_then_it_is_first() {
    let repos = vec![
        Repository::new("octo", "popular").with_stars(500),
        Repository::new("octo", "BONDI").with_stars(0),
    ];

    let picked = select_repositories(repos, "Bondi", 6).unwrap();

    assert_eq!(picked[0].name, "BONDI");
}

#[test]
fn given_non_featured_repos_when_selecting_then_stars_descend() {
    let repos = vec![
        Repository::new("octo", "low").with_stars(1),
        Repository::new("octo", "high").with_stars(40),
        Repository::new("octo", "mid").with_stars(7),
    ];

    let picked = select_repositories(repos, "Bondi", 6).unwrap();
    let stars: Vec<u64> = picked.iter().map(|r| r.stargazers_count).collect();

    assert_eq!(stars, vec![40, 7, 1]);
}

#[test]
fn given_more_eligible_repos_than_limit_when_selecting_then_limit_holds() {
    let repos = (0..20u64)
        .map(|i| Repository::new("octo", format!("repo-{i}")).with_stars(i))
        .collect();

    let picked = select_repositories(repos, "Bondi", 6).unwrap();

    assert_eq!(picked.len(), 6);
}

// ============================================================================
// PLACEHOLDER BEHAVIORS
// ============================================================================

#[test]
fn given_empty_listing_when_selecting_then_no_eligible_repositories() {
    let err = select_repositories(Vec::new(), "Bondi", 6).unwrap_err();
    assert_eq!(err, Error::NoEligibleRepositories);
    assert!(err.is_listing_failure());
}

#[test]
fn given_only_archived_and_forked_repos_when_selecting_then_no_eligible_repositories() {
    let mut fork = Repository::new("octo", "fork");
    fork.fork = true;
    let mut disabled = Repository::new("octo", "disabled");
    disabled.disabled = true;

    let err = select_repositories(vec![archived("old"), fork, disabled], "Bondi", 6).unwrap_err();

    assert_eq!(err, Error::NoEligibleRepositories);
}

#[test]
fn given_listing_body_that_is_not_a_list_when_parsing_then_listing_failure() {
    let err = parse_listing(r#"{"message":"API rate limit exceeded"}"#).unwrap_err();
    assert!(err.is_listing_failure());
}

// ============================================================================
// DEGRADATION BEHAVIORS
// ============================================================================

#[test]
fn given_one_failed_language_lookup_when_assembling_then_other_cards_keep_rich_tech() {
    let picked = vec![
        Repository::new("octo", "a")
            .with_language("Rust")
            .with_topics(["wasm"]),
        Repository::new("octo", "b").with_language("Go"),
    ];
    let lookups = vec![
        LanguageLookup::Fetched([("Rust", 10), ("JavaScript", 5)].into_iter().collect()),
        LanguageLookup::Failed {
            reason: "connection reset".to_string(),
        },
    ];

    let cards = assemble_cards(&picked, &lookups, &SiteConfig::default()).unwrap();

    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].record.technologies, vec!["Rust", "JavaScript", "wasm"]);
    assert_eq!(cards[1].record.technologies, vec!["Go"]);
}

#[test]
fn given_featured_repo_when_assembling_then_demo_uses_override() {
    let picked = vec![Repository::new("octo", "Bondi")];
    let lookups = vec![LanguageLookup::Rejected { status: 403 }];

    let cards = assemble_cards(&picked, &lookups, &SiteConfig::default()).unwrap();

    assert_eq!(cards[0].record.demo.href(), Some("https://octo.github.io/Bondi/"));
}

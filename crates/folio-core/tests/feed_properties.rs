//! Property-based tests for project feed ordering.
//!
//! Uses proptest to validate:
//! - The featured repository always leads, whatever its star count
//! - Non-featured repositories descend by stars, equal counts keep source order
//! - The grid never exceeds the configured limit
//! - Ineligible repositories never reach the grid

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

use folio_core::feed::select_repositories;
use folio_core::{Error, Repository};
use proptest::prelude::*;

const FEATURED: &str = "Bondi";

fn repository() -> impl Strategy<Value = Repository> {
    ("[a-z]{1,8}", 0u64..50, any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(name, stars, fork, archived, disabled)| {
            let mut repo = Repository::new("octo", name).with_stars(stars);
            repo.fork = fork && stars % 3 == 0;
            repo.archived = archived && stars % 5 == 0;
            repo.disabled = disabled && stars % 7 == 0;
            repo
        },
    )
}

/// Listing with unique names, none of which is the featured one
fn listing() -> impl Strategy<Value = Vec<Repository>> {
    prop::collection::vec(repository(), 0..30).prop_map(|repos| {
        repos
            .into_iter()
            .enumerate()
            .map(|(i, mut repo)| {
                repo.name = format!("{}-{i}", repo.name);
                repo
            })
            .collect()
    })
}

fn featured_spelling() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["Bondi", "bondi", "BONDI", "bOnDi"]).prop_map(str::to_string)
}

proptest! {
    /// Property: an eligible featured repository is always first
    #[test]
    fn prop_featured_first(
        mut repos in listing(),
        spelling in featured_spelling(),
        stars in 0u64..50,
        slot in any::<prop::sample::Index>(),
    ) {
        let at = slot.index(repos.len() + 1);
        repos.insert(at, Repository::new("octo", spelling).with_stars(stars));

        let picked = select_repositories(repos, FEATURED, 6);
        prop_assert!(picked.is_ok());
        let picked = picked.unwrap_or_default();
        prop_assert!(picked.first().is_some_and(|repo| repo.is_named(FEATURED)));
    }

    /// Property: stars never increase, and ties keep their input order
    #[test]
    fn prop_stars_descend_stably(repos in listing()) {
        let input_order: Vec<String> = repos.iter().map(|r| r.name.clone()).collect();
        let position = |name: &str| input_order.iter().position(|n| n == name);

        let picked = select_repositories(repos, FEATURED, 100).unwrap_or_default();

        for pair in picked.windows(2) {
            let [a, b] = pair else { continue };
            prop_assert!(a.stargazers_count >= b.stargazers_count);
            if a.stargazers_count == b.stargazers_count {
                prop_assert!(position(&a.name) < position(&b.name));
            }
        }
    }

    /// Property: the number of picked repositories never exceeds the limit
    #[test]
    fn prop_limit_holds(repos in listing(), limit in 1usize..10) {
        let eligible = repos.iter().filter(|r| r.is_eligible()).count();

        match select_repositories(repos, FEATURED, limit) {
            Ok(picked) => {
                prop_assert!(picked.len() <= limit);
                prop_assert_eq!(picked.len(), eligible.min(limit));
            }
            Err(error) => {
                prop_assert_eq!(error, Error::NoEligibleRepositories);
                prop_assert_eq!(eligible, 0);
            }
        }
    }

    /// Property: forks, archived, and disabled repositories are never picked
    #[test]
    fn prop_only_eligible(repos in listing()) {
        let picked = select_repositories(repos, FEATURED, 100).unwrap_or_default();
        prop_assert!(picked.iter().all(Repository::is_eligible));
    }
}

//! Provider selection policy
//!
//! Chooses which provider serves a job when its type has more than one.
//! Candidate lists arrive in stable name order, so both policies are
//! deterministic for a given sequence of picks.

use std::str::FromStr;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

/// Strategy for choosing among a job type's providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Cycle through the type's providers in stable name order
    RoundRobin,

    /// Pick the provider with the fewest assignments handed out so far
    LeastLoaded,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        SelectionPolicy::RoundRobin
    }
}

impl FromStr for SelectionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "round_robin" | "round-robin" => Ok(SelectionPolicy::RoundRobin),
            "least_loaded" | "least-loaded" => Ok(SelectionPolicy::LeastLoaded),
            other => Err(format!(
                "Unknown selection policy: {} (expected round_robin or least_loaded)",
                other
            )),
        }
    }
}

impl std::fmt::Display for SelectionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionPolicy::RoundRobin => write!(f, "round_robin"),
            SelectionPolicy::LeastLoaded => write!(f, "least_loaded"),
        }
    }
}

/// Applies a selection policy, tracking the state it needs across picks
#[derive(Debug)]
pub struct ProviderSelector {
    policy: SelectionPolicy,
    /// Next round-robin position per job type
    cursors: DashMap<String, usize>,
    /// Assignments handed to each provider so far
    assignments: DashMap<String, u64>,
}

impl ProviderSelector {
    /// Creates a selector with no pick history
    pub fn new(policy: SelectionPolicy) -> Self {
        Self {
            policy,
            cursors: DashMap::new(),
            assignments: DashMap::new(),
        }
    }

    /// The policy this selector applies
    pub fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    /// Picks a provider from a stably ordered candidate list
    ///
    /// Returns `None` only for an empty candidate list. Ties under
    /// `LeastLoaded` break toward the lexicographically smaller identifier.
    pub fn pick(&self, job_type: &str, candidates: &[String]) -> Option<String> {
        if candidates.is_empty() {
            return None;
        }

        let chosen = match self.policy {
            SelectionPolicy::RoundRobin => {
                let mut cursor = self.cursors.entry(job_type.to_string()).or_insert(0);
                let index = *cursor % candidates.len();
                *cursor += 1;
                candidates[index].clone()
            }
            SelectionPolicy::LeastLoaded => candidates
                .iter()
                .min_by_key(|id| (self.assignments_of(id), (*id).clone()))
                .cloned()?,
        };

        *self.assignments.entry(chosen.clone()).or_insert(0) += 1;
        Some(chosen)
    }

    /// Number of assignments handed to a provider so far
    pub fn assignments_of(&self, provider_id: &str) -> u64 {
        self.assignments
            .get(provider_id)
            .map(|count| *count)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn test_round_robin_cycles_in_order() {
        let selector = ProviderSelector::new(SelectionPolicy::RoundRobin);
        let pool = candidates(&["pk1", "pk2", "pk3"]);

        let picks: Vec<String> = (0..4)
            .map(|_| selector.pick("text_generation", &pool).unwrap())
            .collect();
        assert_eq!(picks, vec!["pk1", "pk2", "pk3", "pk1"]);
    }

    #[test]
    fn test_round_robin_cursors_are_per_type() {
        let selector = ProviderSelector::new(SelectionPolicy::RoundRobin);
        let pool = candidates(&["pk1", "pk2"]);

        assert_eq!(selector.pick("text_generation", &pool).unwrap(), "pk1");
        // A different type starts its own cycle from the beginning
        assert_eq!(selector.pick("translation", &pool).unwrap(), "pk1");
        assert_eq!(selector.pick("text_generation", &pool).unwrap(), "pk2");
    }

    #[test]
    fn test_least_loaded_balances_assignments() {
        let selector = ProviderSelector::new(SelectionPolicy::LeastLoaded);
        let pool = candidates(&["pk1", "pk2"]);

        assert_eq!(selector.pick("text_generation", &pool).unwrap(), "pk1");
        assert_eq!(selector.pick("text_generation", &pool).unwrap(), "pk2");
        // Tie again: break toward the smaller identifier
        assert_eq!(selector.pick("text_generation", &pool).unwrap(), "pk1");
        assert_eq!(selector.assignments_of("pk1"), 2);
        assert_eq!(selector.assignments_of("pk2"), 1);
    }

    #[test]
    fn test_least_loaded_counts_span_job_types() {
        let selector = ProviderSelector::new(SelectionPolicy::LeastLoaded);
        selector.pick("text_generation", &candidates(&["pk1"]));

        // pk1 already carries one assignment from the other type
        let pick = selector.pick("translation", &candidates(&["pk1", "pk2"]));
        assert_eq!(pick.unwrap(), "pk2");
    }

    #[test]
    fn test_empty_candidates_yield_none() {
        let selector = ProviderSelector::new(SelectionPolicy::RoundRobin);
        assert!(selector.pick("text_generation", &[]).is_none());
    }

    #[test]
    fn test_policy_parses_from_str() {
        assert_eq!(
            "round_robin".parse::<SelectionPolicy>().unwrap(),
            SelectionPolicy::RoundRobin
        );
        assert_eq!(
            "Least-Loaded".parse::<SelectionPolicy>().unwrap(),
            SelectionPolicy::LeastLoaded
        );
        assert!("first_free".parse::<SelectionPolicy>().is_err());
    }
}

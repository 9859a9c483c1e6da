use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamBallot {
    Accept,
    Reject,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestCard {
    Success,
    Fail,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CastOutcome {
    Accepted,
    Duplicate,
    Ineligible,
}

/// Collects one vote per eligible voter.
#[derive(Clone, Debug)]
pub struct VoteTally<V> {
    eligible: Vec<String>,
    votes: Vec<(String, V)>,
}

impl<V> Default for VoteTally<V> {
    fn default() -> Self {
        Self {
            eligible: Vec::new(),
            votes: Vec::new(),
        }
    }
}

impl<V: Copy + Eq + Hash> VoteTally<V> {
    pub fn new(eligible: Vec<String>) -> Self {
        Self {
            eligible,
            votes: Vec::new(),
        }
    }

    /// What `cast` would answer for this voter, without recording anything.
    pub fn check(&self, voter: &str) -> CastOutcome {
        if !self.eligible.iter().any(|e| e == voter) {
            CastOutcome::Ineligible
        } else if self.has_voted(voter) {
            CastOutcome::Duplicate
        } else {
            CastOutcome::Accepted
        }
    }

    pub fn cast(&mut self, voter: &str, value: V) -> CastOutcome {
        let outcome = self.check(voter);
        if outcome == CastOutcome::Accepted {
            self.votes.push((voter.to_string(), value));
        }
        outcome
    }

    pub fn has_voted(&self, voter: &str) -> bool {
        self.votes.iter().any(|(name, _)| name == voter)
    }

    pub fn is_complete(&self) -> bool {
        !self.eligible.is_empty() && self.votes.len() == self.eligible.len()
    }

    pub fn count(&self, value: V) -> usize {
        self.votes.iter().filter(|(_, v)| *v == value).count()
    }

    pub fn tally(&self) -> HashMap<V, usize> {
        let mut counts = HashMap::new();
        for (_, value) in &self.votes {
            *counts.entry(*value).or_insert(0) += 1;
        }
        counts
    }

    /// Voters who cast `value`, in the order the eligible list names them.
    pub fn voters_for(&self, value: V) -> Vec<&str> {
        self.eligible
            .iter()
            .filter(|name| {
                self.votes
                    .iter()
                    .any(|(voter, v)| voter == *name && *v == value)
            })
            .map(String::as_str)
            .collect()
    }

    pub fn missing(&self) -> Vec<&str> {
        self.eligible
            .iter()
            .filter(|name| !self.has_voted(name))
            .map(String::as_str)
            .collect()
    }
}

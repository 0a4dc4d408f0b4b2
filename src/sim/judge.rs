//! Collision outcomes between two throws

use serde::{Deserialize, Serialize};

use super::kind::{explanation, ThrowKind};
use super::rules::RuleTable;
use super::throw::Throw;

/// Result of pitting the first throw against the second
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    FirstWins,
    SecondWins,
    Tie,
}

impl Outcome {
    pub fn is_tie(self) -> bool {
        self == Outcome::Tie
    }
}

/// Decides who survives a collision
#[derive(Debug, Clone, Copy)]
pub struct Judge {
    rules: &'static RuleTable,
}

impl Default for Judge {
    fn default() -> Self {
        Self::new()
    }
}

impl Judge {
    pub fn new() -> Self {
        Self {
            rules: RuleTable::standard(),
        }
    }

    pub fn rules(&self) -> &RuleTable {
        self.rules
    }

    /// Blackhole wins against anything except another Blackhole;
    /// everything else goes through the rule table.
    pub fn resolve(&self, first: ThrowKind, second: ThrowKind) -> Outcome {
        match (first.is_blackhole(), second.is_blackhole()) {
            (true, true) => Outcome::Tie,
            (true, false) => Outcome::FirstWins,
            (false, true) => Outcome::SecondWins,
            (false, false) => match self.rules.between(first, second) {
                RuleTable::WIN => Outcome::FirstWins,
                RuleTable::LOSE => Outcome::SecondWins,
                _ => Outcome::Tie,
            },
        }
    }

    pub fn resolve_throws(&self, first: &Throw, second: &Throw) -> Outcome {
        self.resolve(first.kind, second.kind)
    }

    /// Winner-to-loser sentence, or None on a tie
    pub fn explain(&self, first: ThrowKind, second: ThrowKind) -> Option<String> {
        match self.resolve(first, second) {
            Outcome::FirstWins => Some(explanation(first, second)),
            Outcome::SecondWins => Some(explanation(second, first)),
            Outcome::Tie => None,
        }
    }
}

//! Win/tie/lose matrix for the cyclic kinds
//!
//! Row is the first throw, column the second. For the order
//! [r, p, s, k, l] the table reads:
//!
//! ```text
//!       r   p   s   k   l
//!  r [  0  -1   1  -1   1 ]
//!  p [  1   0  -1   1  -1 ]
//!  s [ -1   1   0  -1   1 ]
//!  k [  1  -1   1   0  -1 ]
//!  l [ -1   1  -1   1   0 ]
//! ```

use std::fmt;
use std::sync::OnceLock;

use super::kind::{library_size, ThrowKind};

/// Square rule table built by filling wrapped diagonals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    size: usize,
    cells: Vec<i8>,
}

impl RuleTable {
    /// Row kind beats column kind
    pub const WIN: i8 = 1;
    pub const TIE: i8 = 0;
    /// Row kind loses to column kind
    pub const LOSE: i8 = -1;

    /// Shared table for the play library
    pub fn standard() -> &'static RuleTable {
        static STANDARD: OnceLock<RuleTable> = OnceLock::new();
        STANDARD.get_or_init(|| RuleTable::with_size(library_size()))
    }

    /// Build the odd-cycle tournament of the given size
    ///
    /// # Panics
    /// If `size` is even or smaller than 3.
    pub fn with_size(size: usize) -> Self {
        assert!(
            size >= 3 && size % 2 == 1,
            "rule table needs an odd size of at least 3, got {size}"
        );

        let mut table = Self {
            size,
            cells: vec![Self::TIE; size * size],
        };

        table.fill_diagonal(0, Self::TIE);
        // Odd backward offsets are victories
        for offset in (1..size).step_by(2) {
            table.fill_diagonal(offset, Self::WIN);
        }
        // Everything left over (even offsets) is a loss
        for offset in (2..size).step_by(2) {
            table.fill_diagonal(offset, Self::LOSE);
        }

        table
    }

    /// Fill the wrapped diagonal whose first column-0 cell is at `start_row`
    fn fill_diagonal(&mut self, start_row: usize, value: i8) {
        for column in 0..self.size {
            let row = (start_row + column) % self.size;
            self.cells[row * self.size + column] = value;
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Rule for row `first` against column `second`
    ///
    /// # Panics
    /// If either index is outside the table.
    pub fn get(&self, first: usize, second: usize) -> i8 {
        assert!(
            first < self.size && second < self.size,
            "rule lookup ({first}, {second}) outside a {0}x{0} table",
            self.size
        );
        self.cells[first * self.size + second]
    }

    /// Rule between two cyclic kinds
    ///
    /// # Panics
    /// If either kind has no cyclic index.
    pub fn between(&self, first: ThrowKind, second: ThrowKind) -> i8 {
        match (first.cyclic_index(), second.cyclic_index()) {
            (Some(row), Some(column)) => self.get(row, column),
            _ => panic!("{first} vs {second} is not covered by the rule table"),
        }
    }

    /// Column indices the given row defeats
    pub fn victims(&self, row: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.size).filter(move |&column| self.get(row, column) == Self::WIN)
    }
}

impl fmt::Display for RuleTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            let cells: Vec<String> = (0..self.size)
                .map(|column| format!("{:>2}", self.get(row, column)))
                .collect();
            writeln!(f, "[{}]", cells.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_standard_table_concrete_cells() {
        let rules = RuleTable::standard();
        assert_eq!(rules.size(), 5);
        assert_eq!(rules.get(0, 2), 1); // Rock beats Scissors
        assert_eq!(rules.get(0, 4), 1); // Rock beats Lizard
        assert_eq!(rules.get(0, 1), -1); // Rock loses to Paper
        assert_eq!(rules.get(0, 3), -1); // Rock loses to Spock
    }

    #[test]
    fn test_standard_table_victims() {
        use crate::sim::kind::ThrowKind::*;
        let rules = RuleTable::standard();
        let expected = [
            (Rock, [Scissors, Lizard]),
            (Paper, [Spock, Rock]),
            (Scissors, [Lizard, Paper]),
            (Spock, [Rock, Scissors]),
            (Lizard, [Paper, Spock]),
        ];
        for (winner, losers) in expected {
            for loser in losers {
                assert_eq!(rules.between(winner, loser), RuleTable::WIN);
                assert_eq!(rules.between(loser, winner), RuleTable::LOSE);
            }
        }
    }

    #[test]
    fn test_standard_table_matches_doc() {
        let rendered = RuleTable::standard().to_string();
        let first_line = rendered.lines().next().unwrap_or_default();
        assert_eq!(first_line, "[ 0 -1  1 -1  1]");
    }

    #[test]
    fn test_classic_three() {
        let rules = RuleTable::with_size(3);
        // r p s: paper beats rock, scissors beats paper, rock beats scissors
        assert_eq!(rules.get(1, 0), 1);
        assert_eq!(rules.get(2, 1), 1);
        assert_eq!(rules.get(0, 2), 1);
    }

    #[test]
    #[should_panic(expected = "odd size")]
    fn test_even_size_rejected() {
        RuleTable::with_size(4);
    }

    #[test]
    #[should_panic(expected = "not covered")]
    fn test_blackhole_not_in_table() {
        RuleTable::standard().between(ThrowKind::Blackhole, ThrowKind::Rock);
    }

    proptest! {
        #[test]
        fn prop_antisymmetric_with_zero_diagonal(half in 1usize..12) {
            let size = half * 2 + 1;
            let rules = RuleTable::with_size(size);
            for i in 0..size {
                prop_assert_eq!(rules.get(i, i), 0);
                for j in 0..size {
                    prop_assert_eq!(rules.get(i, j), -rules.get(j, i));
                }
            }
        }

        #[test]
        fn prop_each_kind_beats_half(half in 1usize..12) {
            let size = half * 2 + 1;
            let rules = RuleTable::with_size(size);
            for row in 0..size {
                prop_assert_eq!(rules.victims(row).count(), half);
                for column in rules.victims(row) {
                    prop_assert_eq!((row + size - column) % size % 2, 1);
                }
            }
        }
    }
}

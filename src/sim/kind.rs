//! Throw kinds and the play library
//!
//! The cyclic kinds MUST be listed in the form (x, +, -, +, -, ...): relative
//! to any kind, the next one defeats it, the one after loses to it, and so on
//! around the circle. The rule table and the explanation lookup both depend on
//! this ordering. Blackhole sits outside the circle and is handled separately.

use std::fmt;
use std::str::FromStr;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::{BLACKHOLE_EXPLANATION, BLACKHOLE_HEIGHT, BLACKHOLE_WIDTH};
use crate::estimate_text_box;
use crate::settings::SettingsError;

/// Every kind a throw can have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum ThrowKind {
    Rock,
    Paper,
    Scissors,
    Spock,
    Lizard,
    /// Beats everything, ties with itself
    Blackhole,
}

/// All kinds, cyclic ones first
pub const ALL_KINDS: [ThrowKind; 6] = [
    ThrowKind::Rock,
    ThrowKind::Paper,
    ThrowKind::Scissors,
    ThrowKind::Spock,
    ThrowKind::Lizard,
    ThrowKind::Blackhole,
];

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// How a kind is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Appearance {
    /// Bold text label
    Text {
        label: &'static str,
        font: &'static str,
        size: u32,
        color: Rgb,
    },
    /// Filled ellipse inscribed in the bounding box
    Ellipse { width: i32, height: i32, color: Rgb },
}

impl Appearance {
    /// Bounding box a freshly created throw of this appearance occupies
    pub fn default_box(&self) -> IVec2 {
        match *self {
            Appearance::Text { label, size, .. } => estimate_text_box(label, size),
            Appearance::Ellipse { width, height, .. } => IVec2::new(width, height),
        }
    }

    /// Base font size for text kinds
    pub fn font_size(&self) -> Option<u32> {
        match *self {
            Appearance::Text { size, .. } => Some(size),
            Appearance::Ellipse { .. } => None,
        }
    }
}

/// One entry of the play library
#[derive(Debug)]
pub struct PlayEntry {
    pub kind: ThrowKind,
    pub code: char,
    pub name: &'static str,
    /// Verbs for the kinds this one defeats, in +2 stepping order
    pub actions: &'static [&'static str],
    pub appearance: Appearance,
}

/// The cyclic kinds, in rule order
pub static PLAY_LIBRARY: [PlayEntry; 5] = [
    PlayEntry {
        kind: ThrowKind::Rock,
        code: 'r',
        name: "Rock",
        actions: &["crushes", "crushes"],
        appearance: Appearance::Text {
            label: "ROCK",
            font: "Rockwell Extra Bold",
            size: 20,
            color: Rgb(139, 69, 19),
        },
    },
    PlayEntry {
        kind: ThrowKind::Paper,
        code: 'p',
        name: "Paper",
        actions: &["disproves", "covers"],
        appearance: Appearance::Text {
            label: "Paper",
            font: "Courier New",
            size: 22,
            color: Rgb(70, 130, 180),
        },
    },
    PlayEntry {
        kind: ThrowKind::Scissors,
        code: 's',
        name: "Scissors",
        actions: &["decapitates", "cuts"],
        appearance: Appearance::Text {
            label: "SCISSORS",
            font: "Impact",
            size: 20,
            color: Rgb(192, 0, 0),
        },
    },
    PlayEntry {
        kind: ThrowKind::Spock,
        code: 'k',
        name: "Spock",
        actions: &["vaporizes", "smashes"],
        appearance: Appearance::Text {
            label: "Spock",
            font: "Verdana",
            size: 22,
            color: Rgb(0, 0, 139),
        },
    },
    PlayEntry {
        kind: ThrowKind::Lizard,
        code: 'l',
        name: "Lizard",
        actions: &["eats", "poisons"],
        appearance: Appearance::Text {
            label: "Lizard",
            font: "Magneto",
            size: 25,
            color: Rgb(50, 205, 50),
        },
    },
];

const BLACKHOLE_CODE: char = 'h';
const BLACKHOLE_APPEARANCE: Appearance = Appearance::Ellipse {
    width: BLACKHOLE_WIDTH,
    height: BLACKHOLE_HEIGHT,
    color: Rgb(0, 0, 0),
};

/// Number of kinds taking part in the cyclic rules
#[inline]
pub fn library_size() -> usize {
    PLAY_LIBRARY.len()
}

impl ThrowKind {
    /// Position in the cyclic order (None for Blackhole)
    pub fn cyclic_index(self) -> Option<usize> {
        PLAY_LIBRARY.iter().position(|entry| entry.kind == self)
    }

    /// Kind at a cyclic position
    pub fn from_cyclic_index(index: usize) -> Option<Self> {
        PLAY_LIBRARY.get(index).map(|entry| entry.kind)
    }

    pub fn is_blackhole(self) -> bool {
        self == ThrowKind::Blackhole
    }

    fn entry(self) -> Option<&'static PlayEntry> {
        self.cyclic_index().map(|index| &PLAY_LIBRARY[index])
    }

    /// Single-character code
    pub fn code(self) -> char {
        self.entry().map_or(BLACKHOLE_CODE, |entry| entry.code)
    }

    pub fn from_code(code: char) -> Option<Self> {
        if code == BLACKHOLE_CODE {
            return Some(ThrowKind::Blackhole);
        }
        PLAY_LIBRARY
            .iter()
            .find(|entry| entry.code == code)
            .map(|entry| entry.kind)
    }

    /// Display name
    pub fn name(self) -> &'static str {
        self.entry().map_or("Blackhole", |entry| entry.name)
    }

    pub fn appearance(self) -> Appearance {
        self.entry()
            .map_or(BLACKHOLE_APPEARANCE, |entry| entry.appearance)
    }
}

impl fmt::Display for ThrowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ThrowKind {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ALL_KINDS
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SettingsError::UnknownKind(wanted.to_string()))
    }
}

impl TryFrom<String> for ThrowKind {
    type Error = SettingsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Sentence explaining why `winner` defeats `loser`
///
/// The loser's rank among the winner's victims is found by stepping +2
/// around the cycle from the winner.
///
/// # Panics
/// If `winner` does not defeat `loser` under the cyclic rules.
pub fn explanation(winner: ThrowKind, loser: ThrowKind) -> String {
    let Some(winning) = winner.cyclic_index() else {
        return BLACKHOLE_EXPLANATION.to_string();
    };
    let Some(losing) = loser.cyclic_index() else {
        panic!("{winner} cannot defeat {loser}");
    };

    let size = library_size();
    let mut cursor = winning;
    let mut distance = None;
    for step in 0..size {
        cursor = (cursor + 2) % size;
        if cursor == losing {
            distance = Some(step);
            break;
        }
    }

    let entry = &PLAY_LIBRARY[winning];
    match distance.and_then(|d| entry.actions.get(d)) {
        Some(action) => format!("{} {} {}", entry.name, action, PLAY_LIBRARY[losing].name),
        None => panic!("{winner} does not defeat {loser}"),
    }
}

/// Every defeat sentence, winner by winner
pub fn all_explanations() -> Vec<String> {
    let size = library_size();
    let mut explanations = Vec::new();
    for (row, entry) in PLAY_LIBRARY.iter().enumerate() {
        let mut losing = row;
        for _ in entry.actions {
            losing = (losing + 2) % size;
            explanations.push(explanation(entry.kind, PLAY_LIBRARY[losing].kind));
        }
    }
    explanations
}

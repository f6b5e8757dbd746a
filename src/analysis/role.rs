use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Top,
    Jungle,
    Middle,
    Bottom,
    Support,
}

impl Role {
    pub const ALL: [Role; 5] = [Role::Top, Role::Jungle, Role::Middle, Role::Bottom, Role::Support];

    /// Used when no match produced a usable role vote.
    pub const DEFAULT: Role = Role::Middle;

    /// Parses a Riot position tag. Blank, `UNKNOWN`, `INVALID` and any other
    /// unrecognised tag yield `None`.
    pub fn from_tag(tag: &str) -> Option<Role> {
        match tag.trim().to_ascii_uppercase().as_str() {
            "TOP" => Some(Role::Top),
            "JUNGLE" => Some(Role::Jungle),
            "MIDDLE" | "MID" => Some(Role::Middle),
            "BOTTOM" | "BOT" | "ADC" | "CARRY" => Some(Role::Bottom),
            "UTILITY" | "SUPPORT" => Some(Role::Support),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Top => "TOP",
            Role::Jungle => "JUNGLE",
            Role::Middle => "MIDDLE",
            Role::Bottom => "BOTTOM",
            Role::Support => "SUPPORT",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role → game count, kept in first-observed order so ties resolve the
/// same way for the same match sequence.
#[derive(Debug, Clone, Default)]
pub struct RoleTally {
    counts: Vec<(Role, usize)>,
}

impl Serialize for RoleTally {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.counts.iter().map(|(role, count)| (role.as_str(), count)))
    }
}

impl RoleTally {
    pub fn new() -> Self {
        RoleTally::default()
    }

    pub fn add(&mut self, role: Role) {
        match self.counts.iter_mut().find(|(r, _)| *r == role) {
            Some((_, count)) => *count += 1,
            None => self.counts.push((role, 1)),
        }
    }

    pub fn count(&self, role: Role) -> usize {
        self.counts
            .iter()
            .find(|(r, _)| *r == role)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, c)| c).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Role, usize)> + '_ {
        self.counts.iter().copied()
    }

    /// Highest tally; the earliest-observed role wins a tie.
    pub fn primary(&self) -> Option<Role> {
        let mut best: Option<(Role, usize)> = None;
        for &(role, count) in &self.counts {
            if best.map(|(_, c)| count > c).unwrap_or(true) {
                best = Some((role, count));
            }
        }
        best.map(|(role, _)| role)
    }
}

/// Fallback role guesses for matches whose position tag is blank or unknown.
///
/// Deliberately small: only a handful of canonical supports and junglers.
/// A champion missing from the table drops the match's role vote.
#[derive(Debug, Clone)]
pub struct ChampionRoleHints {
    hints: HashMap<String, Role>,
}

const STANDARD_SUPPORTS: [&str; 6] = ["Thresh", "Leona", "Lulu", "Janna", "Soraka", "Nautilus"];
const STANDARD_JUNGLERS: [&str; 6] = ["LeeSin", "Elise", "Graves", "Kindred", "Nidalee", "Kayn"];

impl ChampionRoleHints {
    pub fn standard() -> Self {
        let hints = STANDARD_SUPPORTS
            .iter()
            .map(|c| (c.to_string(), Role::Support))
            .chain(STANDARD_JUNGLERS.iter().map(|c| (c.to_string(), Role::Jungle)))
            .collect();
        ChampionRoleHints { hints }
    }

    pub fn empty() -> Self {
        ChampionRoleHints {
            hints: HashMap::new(),
        }
    }

    pub fn with_hint(mut self, champion: &str, role: Role) -> Self {
        self.hints.insert(champion.to_string(), role);
        self
    }

    pub fn lookup(&self, champion: &str) -> Option<Role> {
        self.hints.get(champion).copied()
    }

    /// Tag first, then the champion table.
    pub fn resolve(&self, tag: &str, champion: &str) -> Option<Role> {
        Role::from_tag(tag).or_else(|| self.lookup(champion))
    }
}

impl Default for ChampionRoleHints {
    fn default() -> Self {
        ChampionRoleHints::standard()
    }
}

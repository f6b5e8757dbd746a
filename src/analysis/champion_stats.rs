use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Serialize)]
pub struct ChampionStats {
    pub name: String,
    pub games: usize,
    pub wins: usize,
    pub kills: u64,
    pub deaths: u64,
    pub assists: u64,
    pub cs: u64,
    pub last_played: i64, // epoch ms of the most recent game
}

impl ChampionStats {
    pub fn new(name: String) -> Self {
        ChampionStats {
            name,
            games: 0,
            wins: 0,
            kills: 0,
            deaths: 0,
            assists: 0,
            cs: 0,
            last_played: i64::MIN,
        }
    }

    /// Percentage, 0 when unplayed.
    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            (self.wins as f64 / self.games as f64) * 100.0
        }
    }

    pub fn kda(&self) -> f64 {
        let takedowns = (self.kills + self.assists) as f64;
        if self.deaths == 0 {
            takedowns
        } else {
            takedowns / self.deaths as f64
        }
    }

    pub fn avg_cs(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.cs as f64 / self.games as f64
        }
    }

    pub fn grade(&self) -> ChampionGrade {
        ChampionGrade::for_record(self.win_rate(), self.kda(), self.games)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChampionGrade {
    S,
    A,
    B,
    C,
    /// C on a sample under three games.
    Learning,
    D,
}

impl ChampionGrade {
    pub fn for_record(win_rate: f64, kda: f64, games: usize) -> Self {
        if win_rate >= 55.0 && kda >= 3.5 && games >= 10 {
            ChampionGrade::S
        } else if win_rate >= 52.0 && kda >= 3.0 && games >= 5 {
            ChampionGrade::A
        } else if win_rate >= 48.0 && kda >= 2.5 && games >= 3 {
            ChampionGrade::B
        } else if games < 3 {
            ChampionGrade::Learning
        } else if win_rate >= 42.0 && kda >= 2.0 {
            ChampionGrade::C
        } else {
            ChampionGrade::D
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChampionGrade::S => "Dominant",
            ChampionGrade::A => "Excellent",
            ChampionGrade::B => "Solid",
            ChampionGrade::C => "Average",
            ChampionGrade::Learning => "Learning",
            ChampionGrade::D => "Needs Work",
        }
    }

    pub fn letter(&self) -> &'static str {
        match self {
            ChampionGrade::S => "S",
            ChampionGrade::A => "A",
            ChampionGrade::B => "B",
            ChampionGrade::C | ChampionGrade::Learning => "C",
            ChampionGrade::D => "D",
        }
    }
}

impl fmt::Display for ChampionGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.letter(), self.label())
    }
}

/// The best qualifying champion by win rate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestChampion {
    pub name: String,
    pub win_rate: f64,
    pub games: usize,
}

/// Per-champion tallies in first-played order.
#[derive(Debug, Clone, Default)]
pub struct ChampionPool {
    entries: Vec<ChampionStats>,
    index: HashMap<String, usize>,
}

impl Serialize for ChampionPool {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|c| (&c.name, c)))
    }
}

impl ChampionPool {
    pub fn new() -> Self {
        ChampionPool::default()
    }

    #[allow(clippy::too_many_arguments)]
    pub fn record_game(
        &mut self,
        champion_name: &str,
        won: bool,
        kills: u32,
        deaths: u32,
        assists: u32,
        cs: u64,
        played_at: i64,
    ) {
        let idx = match self.index.get(champion_name) {
            Some(&idx) => idx,
            None => {
                self.entries.push(ChampionStats::new(champion_name.to_string()));
                let idx = self.entries.len() - 1;
                self.index.insert(champion_name.to_string(), idx);
                idx
            }
        };

        let entry = &mut self.entries[idx];
        entry.games += 1;
        if won {
            entry.wins += 1;
        }
        entry.kills += kills as u64;
        entry.deaths += deaths as u64;
        entry.assists += assists as u64;
        entry.cs = entry.cs.saturating_add(cs);
        entry.last_played = entry.last_played.max(played_at);
    }

    pub fn get(&self, name: &str) -> Option<&ChampionStats> {
        self.index.get(name).map(|&idx| &self.entries[idx])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChampionStats> {
        self.entries.iter()
    }

    pub fn total_games(&self) -> usize {
        self.entries.iter().map(|c| c.games).sum()
    }

    /// Highest win rate among champions with at least `min_games` and at
    /// least one win; the first played champion wins a tie.
    pub fn best_champion(&self, min_games: usize) -> Option<BestChampion> {
        let mut best: Option<&ChampionStats> = None;
        for champ in self.entries.iter().filter(|c| c.games >= min_games && c.wins > 0) {
            if best.map(|b| champ.win_rate() > b.win_rate()).unwrap_or(true) {
                best = Some(champ);
            }
        }
        best.map(|c| BestChampion {
            name: c.name.clone(),
            win_rate: c.win_rate(),
            games: c.games,
        })
    }

    /// Most played first, then most recently played, then first played.
    pub fn ranked(&self) -> Vec<&ChampionStats> {
        let mut ranked: Vec<&ChampionStats> = self.entries.iter().collect();
        // stable sort keeps first-played order as the last tie-break
        ranked.sort_by(|a, b| {
            b.games
                .cmp(&a.games)
                .then_with(|| b.last_played.cmp(&a.last_played))
        });
        ranked
    }
}

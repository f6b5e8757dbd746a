use super::role::Role;
use serde::Serialize;
use std::fmt;
use BenchmarkTier as T;

/// Ranked tiers as reported by League-V4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SkillTier {
    Iron,
    Bronze,
    Silver,
    Gold,
    Platinum,
    Emerald,
    Diamond,
    Master,
    Grandmaster,
    Challenger,
}

impl SkillTier {
    pub fn parse(raw: &str) -> Option<SkillTier> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "IRON" => Some(SkillTier::Iron),
            "BRONZE" => Some(SkillTier::Bronze),
            "SILVER" => Some(SkillTier::Silver),
            "GOLD" => Some(SkillTier::Gold),
            "PLATINUM" => Some(SkillTier::Platinum),
            "EMERALD" => Some(SkillTier::Emerald),
            "DIAMOND" => Some(SkillTier::Diamond),
            "MASTER" => Some(SkillTier::Master),
            "GRANDMASTER" => Some(SkillTier::Grandmaster),
            "CHALLENGER" => Some(SkillTier::Challenger),
            _ => None,
        }
    }
}

/// Benchmark bucket: the three apex tiers share one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BenchmarkTier {
    Iron,
    Bronze,
    Silver,
    Gold,
    Platinum,
    Emerald,
    Diamond,
    Apex,
}

impl BenchmarkTier {
    pub const ALL: [BenchmarkTier; 8] = [
        BenchmarkTier::Iron,
        BenchmarkTier::Bronze,
        BenchmarkTier::Silver,
        BenchmarkTier::Gold,
        BenchmarkTier::Platinum,
        BenchmarkTier::Emerald,
        BenchmarkTier::Diamond,
        BenchmarkTier::Apex,
    ];

    /// Used for unranked players or unrecognised tier strings.
    pub const DEFAULT: BenchmarkTier = BenchmarkTier::Gold;

    pub fn from_tier(tier: SkillTier) -> Self {
        match tier {
            SkillTier::Iron => BenchmarkTier::Iron,
            SkillTier::Bronze => BenchmarkTier::Bronze,
            SkillTier::Silver => BenchmarkTier::Silver,
            SkillTier::Gold => BenchmarkTier::Gold,
            SkillTier::Platinum => BenchmarkTier::Platinum,
            SkillTier::Emerald => BenchmarkTier::Emerald,
            SkillTier::Diamond => BenchmarkTier::Diamond,
            SkillTier::Master | SkillTier::Grandmaster | SkillTier::Challenger => {
                BenchmarkTier::Apex
            }
        }
    }

    pub fn resolve(raw: Option<&str>) -> Self {
        raw.and_then(SkillTier::parse)
            .map(BenchmarkTier::from_tier)
            .unwrap_or(BenchmarkTier::DEFAULT)
    }

    pub fn band(&self) -> TierBand {
        match self {
            BenchmarkTier::Iron | BenchmarkTier::Bronze | BenchmarkTier::Silver => TierBand::Low,
            BenchmarkTier::Gold | BenchmarkTier::Platinum | BenchmarkTier::Emerald => TierBand::Mid,
            BenchmarkTier::Diamond | BenchmarkTier::Apex => TierBand::High,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BenchmarkTier::Iron => "IRON",
            BenchmarkTier::Bronze => "BRONZE",
            BenchmarkTier::Silver => "SILVER",
            BenchmarkTier::Gold => "GOLD",
            BenchmarkTier::Platinum => "PLATINUM",
            BenchmarkTier::Emerald => "EMERALD",
            BenchmarkTier::Diamond => "DIAMOND",
            BenchmarkTier::Apex => "MASTER+",
        }
    }
}

impl fmt::Display for BenchmarkTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse skill band that selects prompt guidance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TierBand {
    Low,
    Mid,
    High,
}

impl TierBand {
    pub const ALL: [TierBand; 3] = [TierBand::Low, TierBand::Mid, TierBand::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            TierBand::Low => "low",
            TierBand::Mid => "mid",
            TierBand::High => "high",
        }
    }
}

/// Role-level expectations that do not move with tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoleExpectations {
    pub damage_share: f64,
    pub gold_share: f64,
    pub dragons_per_game: f64,
    pub turrets_per_game: f64,
}

/// Target values for one role at one tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Benchmark {
    pub role: Role,
    pub tier: BenchmarkTier,
    pub cs_per_min: f64,
    pub vision_per_min: f64,
    pub kda: f64,
    pub expectations: RoleExpectations,
}

#[derive(Debug, Clone, Copy)]
struct RoleTierRow {
    role: Role,
    tier: BenchmarkTier,
    cs_per_min: f64,
    vision_per_min: f64,
}

const fn row(role: Role, tier: BenchmarkTier, cs_per_min: f64, vision_per_min: f64) -> RoleTierRow {
    RoleTierRow {
        role,
        tier,
        cs_per_min,
        vision_per_min,
    }
}


const STANDARD_ROWS: [RoleTierRow; 40] = [
    row(Role::Top, T::Iron, 5.0, 0.35),
    row(Role::Top, T::Bronze, 5.5, 0.40),
    row(Role::Top, T::Silver, 6.0, 0.45),
    row(Role::Top, T::Gold, 7.0, 0.50),
    row(Role::Top, T::Platinum, 7.3, 0.55),
    row(Role::Top, T::Emerald, 7.6, 0.60),
    row(Role::Top, T::Diamond, 8.0, 0.65),
    row(Role::Top, T::Apex, 8.5, 0.75),
    row(Role::Jungle, T::Iron, 4.0, 0.45),
    row(Role::Jungle, T::Bronze, 4.3, 0.50),
    row(Role::Jungle, T::Silver, 4.8, 0.55),
    row(Role::Jungle, T::Gold, 5.5, 0.65),
    row(Role::Jungle, T::Platinum, 5.8, 0.70),
    row(Role::Jungle, T::Emerald, 6.0, 0.75),
    row(Role::Jungle, T::Diamond, 6.3, 0.85),
    row(Role::Jungle, T::Apex, 6.8, 0.95),
    row(Role::Middle, T::Iron, 5.3, 0.35),
    row(Role::Middle, T::Bronze, 5.8, 0.40),
    row(Role::Middle, T::Silver, 6.5, 0.45),
    row(Role::Middle, T::Gold, 7.5, 0.55),
    row(Role::Middle, T::Platinum, 7.8, 0.60),
    row(Role::Middle, T::Emerald, 8.1, 0.65),
    row(Role::Middle, T::Diamond, 8.5, 0.70),
    row(Role::Middle, T::Apex, 9.0, 0.80),
    row(Role::Bottom, T::Iron, 5.5, 0.30),
    row(Role::Bottom, T::Bronze, 6.0, 0.35),
    row(Role::Bottom, T::Silver, 7.0, 0.40),
    row(Role::Bottom, T::Gold, 8.0, 0.50),
    row(Role::Bottom, T::Platinum, 8.3, 0.55),
    row(Role::Bottom, T::Emerald, 8.6, 0.60),
    row(Role::Bottom, T::Diamond, 9.0, 0.65),
    row(Role::Bottom, T::Apex, 9.5, 0.75),
    row(Role::Support, T::Iron, 1.0, 1.00),
    row(Role::Support, T::Bronze, 1.2, 1.20),
    row(Role::Support, T::Silver, 1.5, 1.40),
    row(Role::Support, T::Gold, 2.0, 1.70),
    row(Role::Support, T::Platinum, 2.0, 1.90),
    row(Role::Support, T::Emerald, 2.2, 2.10),
    row(Role::Support, T::Diamond, 2.3, 2.40),
    row(Role::Support, T::Apex, 2.5, 2.80),
];

const STANDARD_KDA: [(BenchmarkTier, f64); 8] = [
    (T::Iron, 2.0),
    (T::Bronze, 2.2),
    (T::Silver, 2.4),
    (T::Gold, 2.6),
    (T::Platinum, 2.8),
    (T::Emerald, 3.0),
    (T::Diamond, 3.2),
    (T::Apex, 3.5),
];

const STANDARD_EXPECTATIONS: [(Role, RoleExpectations); 5] = [
    (
        Role::Top,
        RoleExpectations {
            damage_share: 22.0,
            gold_share: 20.0,
            dragons_per_game: 0.7,
            turrets_per_game: 2.4,
        },
    ),
    (
        Role::Jungle,
        RoleExpectations {
            damage_share: 18.0,
            gold_share: 18.0,
            dragons_per_game: 1.2,
            turrets_per_game: 1.8,
        },
    ),
    (
        Role::Middle,
        RoleExpectations {
            damage_share: 28.0,
            gold_share: 22.0,
            dragons_per_game: 0.8,
            turrets_per_game: 2.2,
        },
    ),
    (
        Role::Bottom,
        RoleExpectations {
            damage_share: 30.0,
            gold_share: 24.0,
            dragons_per_game: 0.75,
            turrets_per_game: 2.3,
        },
    ),
    (
        Role::Support,
        RoleExpectations {
            damage_share: 12.0,
            gold_share: 16.0,
            dragons_per_game: 0.85,
            turrets_per_game: 1.9,
        },
    ),
];

const FALLBACK_EXPECTATIONS: RoleExpectations = RoleExpectations {
    damage_share: 20.0,
    gold_share: 20.0,
    dragons_per_game: 0.8,
    turrets_per_game: 2.0,
};

/// Immutable role × tier targets. Missing rows resolve to zero, which the
/// assessor treats as "no benchmark" rather than dividing by it.
#[derive(Debug, Clone)]
pub struct BenchmarkTable {
    rows: Vec<RoleTierRow>,
    kda: Vec<(BenchmarkTier, f64)>,
    expectations: Vec<(Role, RoleExpectations)>,
}

impl BenchmarkTable {
    pub fn standard() -> Self {
        BenchmarkTable {
            rows: STANDARD_ROWS.to_vec(),
            kda: STANDARD_KDA.to_vec(),
            expectations: STANDARD_EXPECTATIONS.to_vec(),
        }
    }

    pub fn empty() -> Self {
        BenchmarkTable {
            rows: Vec::new(),
            kda: Vec::new(),
            expectations: Vec::new(),
        }
    }

    pub fn with_targets(
        mut self,
        role: Role,
        tier: BenchmarkTier,
        cs_per_min: f64,
        vision_per_min: f64,
    ) -> Self {
        self.rows.retain(|r| !(r.role == role && r.tier == tier));
        self.rows.push(row(role, tier, cs_per_min, vision_per_min));
        self
    }

    pub fn with_kda_target(mut self, tier: BenchmarkTier, kda: f64) -> Self {
        self.kda.retain(|(t, _)| *t != tier);
        self.kda.push((tier, kda));
        self
    }

    pub fn kda_target(&self, tier: BenchmarkTier) -> f64 {
        self.kda
            .iter()
            .find(|(t, _)| *t == tier)
            .map(|(_, k)| *k)
            .unwrap_or(0.0)
    }

    pub fn expectations(&self, role: Role) -> RoleExpectations {
        self.expectations
            .iter()
            .find(|(r, _)| *r == role)
            .map(|(_, e)| *e)
            .unwrap_or(FALLBACK_EXPECTATIONS)
    }

    pub fn lookup(&self, role: Role, tier: BenchmarkTier) -> Benchmark {
        let (cs_per_min, vision_per_min) = self
            .rows
            .iter()
            .find(|r| r.role == role && r.tier == tier)
            .map(|r| (r.cs_per_min, r.vision_per_min))
            .unwrap_or((0.0, 0.0));

        Benchmark {
            role,
            tier,
            cs_per_min,
            vision_per_min,
            kda: self.kda_target(tier),
            expectations: self.expectations(role),
        }
    }
}

impl Default for BenchmarkTable {
    fn default() -> Self {
        BenchmarkTable::standard()
    }
}

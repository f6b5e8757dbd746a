use crate::analysis::benchmarks::TierBand;
use crate::analysis::role::Role;

/// (role, tier band) → coaching focus handed to the writer.
#[derive(Debug, Clone)]
pub struct GuidanceTable {
    blocks: Vec<(Role, TierBand, String)>,
}

const STANDARD_BLOCKS: [(Role, TierBand, &str); 15] = [
    (
        Role::Top,
        TierBand::Low,
        "Top lane at this level is decided by wave basics. Praise games where the player kept CS flowing \
         and did not bleed deaths to ganks; when deaths are high, point to warding the river before pushing. \
         Suggest learning one or two durable champions deeply and using Teleport to join fights on the other side.",
    ),
    (
        Role::Top,
        TierBand::Mid,
        "For a mid-ladder top laner, talk about wave states: freezing to deny, slow pushes before a recall, \
         and converting a lead into turret plates. Frame damage share and turret takedowns as the proof of \
         side-lane pressure and call out whether Teleport is being used for objectives or only for lane.",
    ),
    (
        Role::Top,
        TierBand::High,
        "At high elo, evaluate the top laner on matchup discipline and map timing. Tie CS per minute to \
         how often they were forced off waves, link turret and herald-side objectives to side-lane priority, \
         and hold them to an elite standard on deaths that happen without vision of the enemy jungler.",
    ),
    (
        Role::Jungle,
        TierBand::Low,
        "A low-tier jungler should hear about full clears and consistent camps before risky ganks. Use CS per \
         minute as a clear-speed signal, dragons per game as objective awareness, and encourage tracking the \
         enemy jungler with a simple pattern: start side, first gank timing, and where they are likely to be next.",
    ),
    (
        Role::Jungle,
        TierBand::Mid,
        "For a mid-ladder jungler, focus on tempo: pathing toward winning lanes, setting up dragons with \
         lane priority, and trading objectives instead of contesting losing fights. Kill participation and \
         vision per minute together show whether the player is present where the map is being decided.",
    ),
    (
        Role::Jungle,
        TierBand::High,
        "At high elo, the jungler is judged on counter-jungling, objective control and vision denial. Use \
         dragons and barons per game as the headline, treat control ward and wards-killed numbers as tempo \
         tools, and discuss how efficiently farm is converted into objective windows.",
    ),
    (
        Role::Middle,
        TierBand::Low,
        "For a low-tier mid laner, emphasise last-hitting under pressure and avoiding solo deaths. Recommend \
         a small champion pool, shoving before roaming, and using the KDA ratio and CS per minute as the \
         two numbers to improve first.",
    ),
    (
        Role::Middle,
        TierBand::Mid,
        "A mid-ladder mid laner should hear about priority: pushing the wave to move first to river fights, \
         roaming with a purpose, and matching damage share to the champion's job. Compare roams implied by \
         kill participation with the CS that was left behind.",
    ),
    (
        Role::Middle,
        TierBand::High,
        "At high elo, evaluate the mid laner on lane priority converted into map plays, damage share in \
         teamfights and clean trading patterns. Hold farming to an elite bar and discuss whether solo kills \
         and first bloods come from lane dominance or from risk.",
    ),
    (
        Role::Bottom,
        TierBand::Low,
        "For a low-tier bot laner, farming is everything: highlight CS per minute and estimated CS at 10 as \
         the biggest lever, then positioning in fights measured by deaths per game. Encourage staying alive \
         over chasing kills and buying control wards for the bot-side river.",
    ),
    (
        Role::Bottom,
        TierBand::Mid,
        "A mid-ladder bot laner should hear how gold share and damage share line up: the carry role should \
         turn resources into damage. Discuss dragon setups with the support, safe side-lane farming mid game \
         and when to group with the team.",
    ),
    (
        Role::Bottom,
        TierBand::High,
        "At high elo, evaluate the bot laner on near-perfect farming, damage output per gold and death \
         avoidance in late teamfights. Tie dragons per game to bot-lane priority and be exacting about \
         deaths in games that were won on gold but lost on positioning.",
    ),
    (
        Role::Support,
        TierBand::Low,
        "For a low-tier support, vision is the headline: wards placed, control wards and vision per minute. \
         Celebrate assists and kill participation, and suggest roaming to mid after a bot-lane back instead \
         of staying in an empty lane.",
    ),
    (
        Role::Support,
        TierBand::Mid,
        "A mid-ladder support should be evaluated on vision control around objectives: wards placed before \
         dragon spawns, wards killed, and whether control wards are always in the inventory. Tie kill \
         participation to roam timing and engage or peel decisions.",
    ),
    (
        Role::Support,
        TierBand::High,
        "At high elo, the support is judged on vision denial, tempo roams and shot-calling around objectives. \
         Hold vision per minute to an elite standard, discuss wards killed as map control, and connect deaths \
         to deep-warding risk that should be traded for information.",
    ),
];

impl GuidanceTable {
    pub fn standard() -> Self {
        GuidanceTable {
            blocks: STANDARD_BLOCKS
                .iter()
                .map(|(role, band, text)| (*role, *band, text.to_string()))
                .collect(),
        }
    }

    pub fn empty() -> Self {
        GuidanceTable { blocks: Vec::new() }
    }

    pub fn with_block(mut self, role: Role, band: TierBand, text: &str) -> Self {
        self.blocks.retain(|(r, b, _)| !(*r == role && *b == band));
        self.blocks.push((role, band, text.to_string()));
        self
    }

    pub fn block(&self, role: Role, band: TierBand) -> Option<&str> {
        self.blocks
            .iter()
            .find(|(r, b, _)| *r == role && *b == band)
            .map(|(_, _, text)| text.as_str())
    }
}

impl Default for GuidanceTable {
    fn default() -> Self {
        GuidanceTable::standard()
    }
}

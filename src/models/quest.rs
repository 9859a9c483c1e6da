use serde::{Deserialize, Serialize};

pub const QUEST_COUNT: usize = 5;
pub const MIN_PLAYERS: usize = 5;
pub const MAX_PLAYERS: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestPlanEntry {
    pub team_size: usize,
    pub fails_required: usize,
}

const fn quest(team_size: usize, fails_required: usize) -> QuestPlanEntry {
    QuestPlanEntry {
        team_size,
        fails_required,
    }
}

// 5..=10 players, indexed by player count - MIN_PLAYERS
const QUEST_PLANS: [[QuestPlanEntry; QUEST_COUNT]; 6] = [
    [quest(2, 1), quest(3, 1), quest(2, 1), quest(3, 1), quest(3, 1)],
    [quest(2, 1), quest(3, 1), quest(4, 1), quest(3, 1), quest(4, 1)],
    [quest(2, 1), quest(3, 1), quest(3, 1), quest(4, 2), quest(4, 1)],
    [quest(3, 1), quest(4, 1), quest(4, 1), quest(5, 2), quest(5, 1)],
    [quest(3, 1), quest(4, 1), quest(4, 1), quest(5, 2), quest(5, 1)],
    [quest(3, 1), quest(4, 1), quest(4, 1), quest(5, 2), quest(5, 1)],
];

const EVIL_COUNTS: [usize; 6] = [2, 2, 3, 3, 3, 4];

/// The five quests played by a table of `player_count` players.
pub fn quest_plan(player_count: usize) -> Option<&'static [QuestPlanEntry; QUEST_COUNT]> {
    table_index(player_count).map(|idx| &QUEST_PLANS[idx])
}

/// Number of evil role cards dealt at a table of `player_count` players.
pub fn evil_count(player_count: usize) -> Option<usize> {
    table_index(player_count).map(|idx| EVIL_COUNTS[idx])
}

fn table_index(player_count: usize) -> Option<usize> {
    (MIN_PLAYERS..=MAX_PLAYERS)
        .contains(&player_count)
        .then(|| player_count - MIN_PLAYERS)
}

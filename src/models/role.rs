use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Alignment {
    Good,
    Evil,
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alignment::Good => write!(f, "Good"),
            Alignment::Evil => write!(f, "Evil"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    LoyalServant,
    Merlin,
    Percival,
    MinionOfMordred,
    Assassin,
    Mordred,
    Oberon,
    Morgana,
}

impl Role {
    /// Catalog order, used when listing the cards in play.
    pub const ALL: [Role; 8] = [
        Role::Merlin,
        Role::Percival,
        Role::LoyalServant,
        Role::Assassin,
        Role::Mordred,
        Role::Morgana,
        Role::Oberon,
        Role::MinionOfMordred,
    ];

    pub fn alignment(&self) -> Alignment {
        if self.is_evil() {
            Alignment::Evil
        } else {
            Alignment::Good
        }
    }

    pub fn is_evil(&self) -> bool {
        matches!(
            self,
            Role::MinionOfMordred | Role::Assassin | Role::Mordred | Role::Oberon | Role::Morgana
        )
    }

    pub fn is_assassin(&self) -> bool {
        *self == Role::Assassin
    }

    pub fn is_merlin(&self) -> bool {
        *self == Role::Merlin
    }

    pub fn is_percival(&self) -> bool {
        *self == Role::Percival
    }

    pub fn unknown_to_merlin(&self) -> bool {
        *self == Role::Mordred
    }

    pub fn looks_like_merlin_to_percival(&self) -> bool {
        matches!(self, Role::Merlin | Role::Morgana)
    }

    /// Member of the network of evil players who know each other. Oberon is
    /// evil but stands outside of it.
    pub fn is_minion_of_mordred(&self) -> bool {
        self.is_evil() && *self != Role::Oberon
    }

    pub fn long_name(&self) -> &'static str {
        match self {
            Role::LoyalServant => "Loyal Servant of Arthur",
            Role::Merlin => "Merlin",
            Role::Percival => "Percival",
            Role::MinionOfMordred => "Minion of Mordred",
            Role::Assassin => "Assassin",
            Role::Mordred => "Mordred",
            Role::Oberon => "Oberon",
            Role::Morgana => "Morgana",
        }
    }

    pub fn long_name_article(&self) -> &'static str {
        match self {
            Role::LoyalServant => "a Loyal Servant of Arthur",
            Role::MinionOfMordred => "a Minion of Mordred",
            Role::Assassin => "the Assassin",
            other => other.long_name(),
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Role::LoyalServant => "good player with no knowledge about identities of other players",
            Role::Merlin => "good player with knowledge of the identities of the Minions of Mordred",
            Role::Percival => "good player with knowledge of the identity of Merlin",
            Role::MinionOfMordred => {
                "evil player with knowledge of the identities of the other Minions of Mordred"
            }
            Role::Assassin => {
                "evil player with knowledge of the identities of the other Minions of Mordred \
                 and the option to win the game by identifying Merlin"
            }
            Role::Mordred => {
                "evil player with knowledge of the identities of the other Minions of Mordred, \
                 unknown to Merlin"
            }
            Role::Oberon => {
                "evil player who does not know and is unknown to the Minions of Mordred"
            }
            Role::Morgana => {
                "evil player with knowledge of the identities of the other Minions of Mordred, \
                 to Percival appears as Merlin"
            }
        }
    }

    /// Checks that every role this one depends on was dealt.
    pub fn validate(&self, dealt: &[Role]) -> bool {
        match self {
            Role::Morgana => dealt.iter().any(Role::is_percival),
            _ => true,
        }
    }

    /// What the holder of this role learns when the cards are dealt.
    ///
    /// `seating` maps every participant to their role; iteration order is the
    /// roster order, so the text is stable for a given deal.
    pub fn initial_knowledge(&self, holder: &str, seating: &BTreeMap<String, Role>) -> String {
        match self {
            Role::Merlin => {
                let minions: Vec<&str> = seating
                    .iter()
                    .filter(|(_, role)| role.is_minion_of_mordred() && !role.unknown_to_merlin())
                    .map(|(name, _)| name.as_str())
                    .collect();
                match minions.as_slice() {
                    [] => "You see no Minion of Mordred.".to_string(),
                    [single] => format!("The Minion of Mordred is {}.", single),
                    many => format!("The Minions of Mordred are {}.", many.join(", ")),
                }
            }
            Role::Percival => {
                let merlins: Vec<&str> = seating
                    .iter()
                    .filter(|(_, role)| role.looks_like_merlin_to_percival())
                    .map(|(name, _)| name.as_str())
                    .collect();
                format!(
                    "{} {} Merlin.",
                    merlins.join(" and "),
                    if merlins.len() == 1 { "is" } else { "are" }
                )
            }
            role if role.is_minion_of_mordred() => {
                let fellows: Vec<&str> = seating
                    .iter()
                    .filter(|(name, role)| name.as_str() != holder && role.is_minion_of_mordred())
                    .map(|(name, _)| name.as_str())
                    .collect();
                match fellows.as_slice() {
                    [] => "There is no fellow Minion of Mordred.".to_string(),
                    [single] => format!("Your fellow Minion of Mordred is {}.", single),
                    many => format!("Your fellow Minions of Mordred are {}.", many.join(", ")),
                }
            }
            _ => "You have no knowledge of other identities.".to_string(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.long_name())
    }
}

use log::{debug, error, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;
use std::sync::Arc;

use super::command::{parse_game_args, GameArg, PrivateCommand, PublicCommand};
use super::config::Config;
use super::quest::{evil_count, quest_plan, QuestPlanEntry, MAX_PLAYERS, MIN_PLAYERS, QUEST_COUNT};
use super::role::{Alignment, Role};
use super::vote::{CastOutcome, QuestCard, TeamBallot, VoteTally};
use crate::services::ledger::{render_summary, ScoreLedger};
use crate::services::messenger::Messenger;

const MAX_FAILED_TEAM_VOTES: usize = 5;
const QUESTS_TO_WIN: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    Assemble,      // players join and leave
    TeamSel,       // the selector proposes a team
    TeamVote,      // everyone votes on the proposal
    QuestVote,     // the team plays success or fail
    Assassination, // good has three successes, the Assassin names Merlin
    Finished(Alignment),
}

impl GamePhase {
    pub fn name(&self) -> &'static str {
        match self {
            GamePhase::Assemble => "Assemble",
            GamePhase::TeamSel => "TeamSel",
            GamePhase::TeamVote => "TeamVote",
            GamePhase::QuestVote => "QuestVote",
            GamePhase::Assassination => "Assassination",
            GamePhase::Finished(_) => "Finished",
        }
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rejection of a command. The display text is the reply sent to the player.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("Command not available.")]
    NotAvailable,
    #[error("You are already registered.")]
    AlreadyRegistered,
    #[error("You are not registered.")]
    NotRegistered,
    #[error("Invalid game argument {0:?}. Valid game arguments are percival, mordred, oberon, morgana.")]
    InvalidGameArgument(String),
    #[error("At least five players are required to start.")]
    TooFewPlayers,
    #[error("At most ten players can play.")]
    TooManyPlayers,
    #[error("Game could not be started due to error in assigning roles. Please check your options for consistency.")]
    RoleAssignment,
    #[error("It is not your turn.")]
    NotYourTurn,
    #[error("Team must consist of {0} players.")]
    WrongTeamSize(usize),
    #[error("Team must consist of valid players.")]
    UnknownTeamMember,
    #[error("Team members must be distinct.")]
    DuplicateTeamMember,
    #[error("You are not the Assassin.")]
    NotAssassin,
    #[error("Invalid player.")]
    InvalidPlayer,
    #[error("Not eligible for vote.")]
    NotEligible,
    #[error("Double vote ignored.")]
    DoubleVote,
    #[error("You are not allowed to vote fail.")]
    FailNotAllowed,
    #[error("You have no role in the current game.")]
    NoRole,
}

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub command_prefix: String,
    pub show_player_roles: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            command_prefix: "!".to_string(),
            show_player_roles: false,
        }
    }
}

impl From<&Config> for SessionOptions {
    fn from(config: &Config) -> Self {
        Self {
            command_prefix: config.command_prefix.clone(),
            show_player_roles: config.show_player_roles,
        }
    }
}

/// Public view of a session. Never includes roles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionSnapshot {
    pub phase: String,
    /// Winner of the most recent finished game in this channel.
    pub last_winner: Option<Alignment>,
    pub players: Vec<String>,
    pub team_selector: Option<String>,
    pub current_team: Vec<String>,
    pub quest_results: Vec<bool>,
    pub failed_team_votes: usize,
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            phase: GamePhase::Assemble.name().to_string(),
            last_winner: None,
            players: Vec::new(),
            team_selector: None,
            current_team: Vec::new(),
            quest_results: Vec::new(),
            failed_team_votes: 0,
        }
    }
}

/// Deals one role per player.
///
/// The deck is the mandatory Merlin and Assassin, the requested optional
/// roles, and generic fillers up to the table's good/evil split. It is
/// shuffled and dealt in roster order. Fails when the optional roles do not
/// fit their side or a dealt role misses a role it depends on.
pub fn deal_roles<R: Rng + ?Sized>(
    players: &[String],
    args: &BTreeSet<GameArg>,
    rng: &mut R,
) -> Result<BTreeMap<String, Role>, GameError> {
    let evil_slots = evil_count(players.len()).ok_or(GameError::RoleAssignment)?;
    let good_slots = players.len() - evil_slots;

    let mut evil = vec![Role::Assassin];
    let mut good = vec![Role::Merlin];
    for arg in args {
        match arg {
            GameArg::Percival => good.push(Role::Percival),
            GameArg::Mordred => evil.push(Role::Mordred),
            GameArg::Oberon => evil.push(Role::Oberon),
            GameArg::Morgana => evil.push(Role::Morgana),
        }
    }
    if evil.len() > evil_slots || good.len() > good_slots {
        return Err(GameError::RoleAssignment);
    }
    evil.resize(evil_slots, Role::MinionOfMordred);
    good.resize(good_slots, Role::LoyalServant);

    let mut deck = good;
    deck.extend(evil);
    deck.shuffle(rng);

    if !deck.iter().all(|role| role.validate(&deck)) {
        return Err(GameError::RoleAssignment);
    }
    Ok(players.iter().cloned().zip(deck).collect())
}

pub struct GameSession {
    phase: GamePhase,
    // kept sorted so seating and selector rotation do not depend on join order
    players: Vec<String>,
    roles: BTreeMap<String, Role>,
    plan: Option<&'static [QuestPlanEntry; QUEST_COUNT]>,
    team_selector: Option<usize>,
    team: Vec<String>,
    quest_results: Vec<bool>,
    failed_team_votes: usize,
    team_votes: VoteTally<TeamBallot>,
    quest_votes: VoteTally<QuestCard>,
    game_args: BTreeSet<GameArg>,
    options: SessionOptions,
    messenger: Arc<dyn Messenger>,
    ledger: Arc<dyn ScoreLedger>,
    rng: StdRng,
}

impl GameSession {
    pub fn new(
        messenger: Arc<dyn Messenger>,
        ledger: Arc<dyn ScoreLedger>,
        options: SessionOptions,
    ) -> Self {
        Self::with_rng(messenger, ledger, options, StdRng::from_entropy())
    }

    pub fn with_rng(
        messenger: Arc<dyn Messenger>,
        ledger: Arc<dyn ScoreLedger>,
        options: SessionOptions,
        rng: StdRng,
    ) -> Self {
        GameSession {
            phase: GamePhase::Assemble,
            players: Vec::new(),
            roles: BTreeMap::new(),
            plan: None,
            team_selector: None,
            team: Vec::new(),
            quest_results: Vec::new(),
            failed_team_votes: 0,
            team_votes: VoteTally::default(),
            quest_votes: VoteTally::default(),
            game_args: BTreeSet::new(),
            options,
            messenger,
            ledger,
            rng,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn winner(&self) -> Option<Alignment> {
        match self.phase {
            GamePhase::Finished(winner) => Some(winner),
            _ => None,
        }
    }

    pub fn players(&self) -> &[String] {
        &self.players
    }

    pub fn role_of(&self, player: &str) -> Option<Role> {
        self.roles.get(player).copied()
    }

    pub fn players_with(&self, role: Role) -> Vec<&str> {
        self.roles
            .iter()
            .filter(|(_, r)| **r == role)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn team_selector(&self) -> Option<&str> {
        self.team_selector
            .and_then(|idx| self.players.get(idx))
            .map(String::as_str)
    }

    pub fn current_team(&self) -> &[String] {
        &self.team
    }

    pub fn quest_results(&self) -> &[bool] {
        &self.quest_results
    }

    pub fn failed_team_votes(&self) -> usize {
        self.failed_team_votes
    }

    pub fn game_args(&self) -> &BTreeSet<GameArg> {
        &self.game_args
    }

    /// Plan entry of the quest currently being played.
    pub fn current_quest(&self) -> Option<QuestPlanEntry> {
        self.plan
            .and_then(|plan| plan.get(self.quest_results.len()))
            .copied()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase.name().to_string(),
            last_winner: self.winner(),
            players: self.players.clone(),
            team_selector: self.team_selector().map(str::to_string),
            current_team: self.team.clone(),
            quest_results: self.quest_results.clone(),
            failed_team_votes: self.failed_team_votes,
        }
    }

    /// Handles a message from the shared channel. Rejections are answered in
    /// the channel, addressed to the sender.
    pub fn handle_pubmsg(&mut self, nick: &str, msg: &str) {
        let Some(command) = PublicCommand::parse(&self.options.command_prefix, msg) else {
            return;
        };
        debug!("Public command from {}: {:?}", nick, command);
        let result = match command {
            PublicCommand::Info => {
                self.info();
                Ok(())
            }
            PublicCommand::Highscore => {
                self.highscore();
                Ok(())
            }
            PublicCommand::Join => self.join(nick),
            PublicCommand::Leave => self.leave(nick),
            PublicCommand::Start(args) => self.start(&args),
            PublicCommand::Team(team) => self.propose_team(nick, team),
            PublicCommand::Kill(target) => self.kill(nick, &target),
        };
        if let Err(e) = result {
            self.messenger.broadcast(&format!("{}: {}", nick, e));
        }
    }

    /// Handles a private message. Rejections are answered privately.
    pub fn handle_privmsg(&mut self, nick: &str, msg: &str) {
        let Some(command) = PrivateCommand::parse(msg) else {
            self.messenger.direct(nick, PrivateCommand::UNSUPPORTED_REPLY);
            return;
        };
        let result = match command {
            PrivateCommand::Accept => self.team_vote(nick, TeamBallot::Accept),
            PrivateCommand::Reject => self.team_vote(nick, TeamBallot::Reject),
            PrivateCommand::Success => self.quest_vote(nick, QuestCard::Success),
            PrivateCommand::Fail => self.quest_vote(nick, QuestCard::Fail),
            PrivateCommand::Identify => self.identify(nick),
        };
        if let Err(e) = result {
            self.messenger.direct(nick, &e.to_string());
        }
    }

    pub fn join(&mut self, nick: &str) -> Result<(), GameError> {
        if self.phase != GamePhase::Assemble {
            return Err(GameError::NotAvailable);
        }
        if self.players.iter().any(|p| p == nick) {
            return Err(GameError::AlreadyRegistered);
        }
        self.players.push(nick.to_string());
        self.players.sort();
        self.messenger
            .broadcast(&format!("Players registered: {}", self.players_str()));
        Ok(())
    }

    pub fn leave(&mut self, nick: &str) -> Result<(), GameError> {
        if self.phase != GamePhase::Assemble {
            return Err(GameError::NotAvailable);
        }
        let idx = self
            .players
            .iter()
            .position(|p| p == nick)
            .ok_or(GameError::NotRegistered)?;
        self.players.remove(idx);
        self.messenger
            .broadcast(&format!("Players registered: {}", self.players_str()));
        Ok(())
    }

    pub fn start(&mut self, args: &str) -> Result<(), GameError> {
        if self.phase != GamePhase::Assemble {
            return Err(GameError::NotAvailable);
        }
        let game_args = parse_game_args(args).map_err(GameError::InvalidGameArgument)?;
        if self.players.len() < MIN_PLAYERS {
            return Err(GameError::TooFewPlayers);
        }
        if self.players.len() > MAX_PLAYERS {
            return Err(GameError::TooManyPlayers);
        }
        let plan = quest_plan(self.players.len()).ok_or(GameError::RoleAssignment)?;
        let roles = deal_roles(&self.players, &game_args, &mut self.rng)?;

        self.game_args = game_args;
        self.roles = roles;
        self.plan = Some(plan);
        info!(
            "Game started with {} players, optional roles {:?}",
            self.players.len(),
            self.game_args
        );
        if self.options.show_player_roles {
            debug!("Dealt roles: {:?}", self.roles);
        }

        for player in &self.players {
            if let Some(text) = self.role_message(player) {
                self.messenger.direct(player, &text);
            }
        }
        self.messenger.broadcast(&format!(
            "The game has started! Players are {}. {}",
            self.players_str(),
            self.roles_str()
        ));

        self.enter_team_sel(false);
        Ok(())
    }

    pub fn propose_team(&mut self, nick: &str, team: Vec<String>) -> Result<(), GameError> {
        if self.phase != GamePhase::TeamSel {
            return Err(GameError::NotAvailable);
        }
        let quest = self.current_quest().ok_or(GameError::NotAvailable)?;
        if self.team_selector() != Some(nick) {
            return Err(GameError::NotYourTurn);
        }
        if team.len() != quest.team_size {
            return Err(GameError::WrongTeamSize(quest.team_size));
        }
        if !team.iter().all(|member| self.players.contains(member)) {
            return Err(GameError::UnknownTeamMember);
        }
        if team.iter().collect::<HashSet<_>>().len() != team.len() {
            return Err(GameError::DuplicateTeamMember);
        }

        self.team = team;
        self.team_votes = VoteTally::new(self.players.clone());
        self.phase = GamePhase::TeamVote;
        debug!("{} proposed team {:?}", nick, self.team);

        self.messenger.broadcast(&format!(
            "{} Please vote for or against this team by privately sending \"accept\" or \"reject\".",
            self.team_str()
        ));
        Ok(())
    }

    pub fn team_vote(&mut self, nick: &str, ballot: TeamBallot) -> Result<(), GameError> {
        if self.phase != GamePhase::TeamVote {
            return Err(GameError::NotAvailable);
        }
        match self.team_votes.cast(nick, ballot) {
            CastOutcome::Accepted => {}
            CastOutcome::Duplicate => return Err(GameError::DoubleVote),
            CastOutcome::Ineligible => return Err(GameError::NotEligible),
        }
        self.messenger.direct(nick, "Vote cast.");

        if !self.team_votes.is_complete() {
            self.messenger.broadcast(&format!(
                "{} has voted. Missing votes from {}.",
                nick,
                self.team_votes.missing().join(", ")
            ));
            return Ok(());
        }

        let accepts = self.team_votes.count(TeamBallot::Accept);
        let rejects = self.team_votes.count(TeamBallot::Reject);
        info!("Team vote complete: {} accept, {} reject", accepts, rejects);
        if accepts > rejects {
            self.enter_quest_vote();
        } else {
            self.messenger.broadcast(&format!(
                "The proposed team {} has been rejected. {}",
                self.team.join(", "),
                self.team_vote_result_str()
            ));
            self.enter_team_sel(true);
        }
        Ok(())
    }

    pub fn quest_vote(&mut self, nick: &str, card: QuestCard) -> Result<(), GameError> {
        if self.phase != GamePhase::QuestVote {
            return Err(GameError::NotAvailable);
        }
        // eligibility and duplicate errors take precedence over the fail check
        let evil = self.role_of(nick).map(|r| r.is_evil()).unwrap_or(false);
        let would_count = self.quest_votes.check(nick) == CastOutcome::Accepted;
        if card == QuestCard::Fail && !evil && would_count {
            return Err(GameError::FailNotAllowed);
        }
        match self.quest_votes.cast(nick, card) {
            CastOutcome::Accepted => {}
            CastOutcome::Duplicate => return Err(GameError::DoubleVote),
            CastOutcome::Ineligible => return Err(GameError::NotEligible),
        }
        self.messenger.direct(nick, "Vote cast.");

        if !self.quest_votes.is_complete() {
            self.messenger.broadcast(&format!(
                "{} has voted. Missing votes from {}.",
                nick,
                self.quest_votes.missing().join(", ")
            ));
            return Ok(());
        }

        let quest = self.current_quest().ok_or(GameError::NotAvailable)?;
        let fails = self.quest_votes.count(QuestCard::Fail);
        let success = fails < quest.fails_required;
        self.quest_results.push(success);
        info!(
            "Quest {} {} with {} fail votes",
            self.quest_results.len(),
            if success { "succeeded" } else { "failed" },
            fails
        );
        self.messenger.broadcast(&format!(
            "Quest {}. Number of success votes was {}, number of fail votes was {}.",
            if success { "succeeded" } else { "failed" },
            self.quest_votes.count(QuestCard::Success),
            fails
        ));
        self.failed_team_votes = 0;
        self.enter_next_quest_or_finish();
        Ok(())
    }

    pub fn kill(&mut self, nick: &str, target: &str) -> Result<(), GameError> {
        if self.phase != GamePhase::Assassination {
            return Err(GameError::NotAvailable);
        }
        if self.assassin() != Some(nick) {
            return Err(GameError::NotAssassin);
        }
        if !self.players.iter().any(|p| p == target) {
            return Err(GameError::InvalidPlayer);
        }

        if self.merlin() == Some(target) {
            self.messenger.broadcast("The Assassin has killed Merlin!");
            self.end_game(Alignment::Evil);
        } else {
            self.messenger.broadcast("The Assassin was unsuccessful.");
            self.end_game(Alignment::Good);
        }
        Ok(())
    }

    pub fn identify(&mut self, nick: &str) -> Result<(), GameError> {
        let text = self.role_message(nick).ok_or(GameError::NoRole)?;
        self.messenger.direct(nick, &text);
        Ok(())
    }

    pub fn info(&self) {
        let text = match self.phase {
            GamePhase::Assemble => format!(
                "Game is not running. Players registered: {}",
                self.players_str()
            ),
            GamePhase::TeamSel => self.teamsel_str(),
            GamePhase::TeamVote => format!(
                "{} Missing votes from {}.",
                self.team_str(),
                self.team_votes.missing().join(", ")
            ),
            GamePhase::QuestVote => format!(
                "Team {} is on quest {}/{}. Missing votes from {}.",
                self.team.join(", "),
                self.quest_results.len() + 1,
                QUEST_COUNT,
                self.quest_votes.missing().join(", ")
            ),
            GamePhase::Assassination => {
                "Good has won three quests. The Assassin may now try to identify Merlin."
                    .to_string()
            }
            GamePhase::Finished(winner) => format!("The game has ended. {} won.", winner),
        };
        self.messenger.broadcast(&format!("Info: {}", text));
    }

    pub fn highscore(&self) {
        self.messenger.broadcast(&format!(
            "Highscore: {}",
            render_summary(&self.ledger.summary())
        ));
    }

    fn enter_team_sel(&mut self, after_failed_vote: bool) {
        if after_failed_vote {
            self.failed_team_votes += 1;
            if self.failed_team_votes >= MAX_FAILED_TEAM_VOTES {
                self.messenger.broadcast("Five failed votes: Evil wins.");
                self.end_game(Alignment::Evil);
                return;
            } else if self.failed_team_votes == MAX_FAILED_TEAM_VOTES - 1 {
                self.messenger.broadcast(&format!(
                    "Failed votes in this round: {}. When five failed votes are reached, Evil wins!",
                    self.failed_team_votes
                ));
            } else {
                self.messenger.broadcast(&format!(
                    "Failed votes in this round: {}",
                    self.failed_team_votes
                ));
            }
        } else {
            self.failed_team_votes = 0;
        }

        let seats = self.players.len();
        self.team_selector = Some(match self.team_selector {
            None => self.rng.gen_range(0..seats),
            Some(idx) => (idx + 1) % seats,
        });
        self.phase = GamePhase::TeamSel;
        debug!("Entering TeamSel, selector {:?}", self.team_selector());

        self.messenger.broadcast(&self.quest_overview_str());
        self.messenger.broadcast(&format!(
            "{} (Type \"{}team Player1 Player2 ...\")",
            self.teamsel_str(),
            self.options.command_prefix
        ));
    }

    fn enter_quest_vote(&mut self) {
        self.messenger.broadcast(&format!(
            "Team {}: you have been accepted for the quest. {} Please play success or fail for the quest by privately sending \"success\" or \"fail\".{}",
            self.team.join(", "),
            self.team_vote_result_str(),
            self.special_win_condition_str()
        ));
        self.quest_votes = VoteTally::new(self.team.clone());
        self.failed_team_votes = 0;
        self.phase = GamePhase::QuestVote;
    }

    fn enter_next_quest_or_finish(&mut self) {
        let successes = self.quest_results.iter().filter(|r| **r).count();
        let failures = self.quest_results.len() - successes;

        if failures >= QUESTS_TO_WIN {
            self.end_game(Alignment::Evil);
        } else if successes >= QUESTS_TO_WIN {
            self.enter_assassination_or_end_game();
        } else {
            self.enter_team_sel(false);
        }
    }

    fn enter_assassination_or_end_game(&mut self) {
        if self.assassin().is_some() {
            self.phase = GamePhase::Assassination;
            // the Assassin's name must stay secret here
            self.messenger.broadcast(&format!(
                "Good has almost won, but the Assassin can still turn the game around by identifying and assassinating Merlin by typing \"{}kill Player1\".",
                self.options.command_prefix
            ));
        } else {
            self.end_game(Alignment::Good);
        }
    }

    fn end_game(&mut self, winner: Alignment) {
        self.phase = GamePhase::Finished(winner);
        info!("Game finished, {} wins", winner);

        self.messenger.broadcast(&self.quest_overview_str());
        self.messenger.broadcast(&self.winner_str(winner));

        let (winners, losers): (Vec<String>, Vec<String>) = self
            .players
            .iter()
            .cloned()
            .partition(|p| self.role_of(p).map(|r| r.alignment()) == Some(winner));
        if let Err(e) = self.ledger.record(&winners, &losers) {
            error!("Failed to update highscore: {}", e);
        }
        self.highscore();
    }

    fn assassin(&self) -> Option<&str> {
        self.players_with(Role::Assassin).into_iter().next()
    }

    fn merlin(&self) -> Option<&str> {
        self.players_with(Role::Merlin).into_iter().next()
    }

    fn role_message(&self, player: &str) -> Option<String> {
        let role = self.role_of(player)?;
        Some(format!(
            "You are {} ({}). {}",
            role.long_name_article(),
            role.description(),
            role.initial_knowledge(player, &self.roles)
        ))
    }

    fn players_str(&self) -> String {
        if self.players.is_empty() {
            "none".to_string()
        } else {
            self.players.join(", ")
        }
    }

    fn roles_str(&self) -> String {
        let cards = |evil: bool| {
            Role::ALL
                .iter()
                .filter(|role| role.is_evil() == evil)
                .filter_map(|role| {
                    let count = self.roles.values().filter(|r| *r == role).count();
                    match count {
                        0 => None,
                        1 => Some(role.long_name().to_string()),
                        n => Some(format!("{}x {}", n, role.long_name())),
                    }
                })
                .collect::<Vec<_>>()
                .join(", ")
        };
        format!(
            "Good role cards in play: {}. Evil role cards in play: {}.",
            cards(false),
            cards(true)
        )
    }

    fn teamsel_str(&self) -> String {
        let team_size = self.current_quest().map(|q| q.team_size).unwrap_or(0);
        format!(
            "For quest {}/{}, {} now selects a team of {} players.{}",
            self.quest_results.len() + 1,
            QUEST_COUNT,
            self.team_selector().unwrap_or("nobody"),
            team_size,
            self.special_win_condition_str()
        )
    }

    fn team_str(&self) -> String {
        format!(
            "{} has chosen the following team: {}.",
            self.team_selector().unwrap_or("nobody"),
            self.team.join(", ")
        )
    }

    fn team_vote_result_str(&self) -> String {
        let names = |ballot| {
            let voters = self.team_votes.voters_for(ballot);
            if voters.is_empty() {
                "Nobody".to_string()
            } else {
                voters.join(", ")
            }
        };
        format!(
            "{} voted to accept the team. {} voted to reject the team.",
            names(TeamBallot::Accept),
            names(TeamBallot::Reject)
        )
    }

    fn special_win_condition_str(&self) -> &'static str {
        match self.current_quest() {
            Some(quest) if quest.fails_required == 2 => {
                " Two fail votes are required to fail this quest."
            }
            _ => "",
        }
    }

    fn quest_overview_str(&self) -> String {
        let Some(plan) = self.plan else {
            return String::new();
        };
        plan.iter()
            .enumerate()
            .map(|(idx, quest)| {
                let result = match self.quest_results.get(idx) {
                    Some(true) => "succeeded",
                    Some(false) => "failed",
                    None => "undecided",
                };
                format!(
                    "Quest {} (team of {}{}): {}",
                    idx + 1,
                    quest.team_size,
                    if quest.fails_required == 2 {
                        ", two fail votes required to fail"
                    } else {
                        ""
                    },
                    result
                )
            })
            .collect::<Vec<_>>()
            .join(" | ")
    }

    fn winner_str(&self, winner: Alignment) -> String {
        let side = |alignment: Alignment| {
            self.roles
                .iter()
                .filter(|(_, role)| role.alignment() == alignment)
                .map(|(player, role)| format!("{} as {}", player, role.long_name()))
                .collect::<Vec<_>>()
                .join(", ")
        };
        format!(
            "{} wins! Evil players were: {}. Good players were: {}.",
            winner,
            side(Alignment::Evil),
            side(Alignment::Good)
        )
    }
}

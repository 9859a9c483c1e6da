use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use avalon_server::{
    models::{
        command::GameArg,
        game::{deal_roles, GameError, GamePhase, GameSession, SessionOptions},
        quest::evil_count,
        role::{Alignment, Role},
        vote::{QuestCard, TeamBallot},
    },
    services::ledger::{Highscore, LedgerError, ScoreEntry, ScoreLedger},
    utils::test_setup::{setup_test_env, RecordingMessenger},
};
use rand::{rngs::StdRng, SeedableRng};

/// Ledger that remembers every `record` call. A failing spy rejects every
/// write.
struct SpyLedger {
    calls: Mutex<Vec<(Vec<String>, Vec<String>)>>,
    inner: Highscore,
    failing: bool,
}

impl SpyLedger {
    fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            inner: Highscore::in_memory(),
            failing: false,
        }
    }

    fn failing() -> Self {
        Self {
            failing: true,
            ..Self::new()
        }
    }

    fn calls(&self) -> Vec<(Vec<String>, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl ScoreLedger for SpyLedger {
    fn record(&self, winners: &[String], losers: &[String]) -> Result<(), LedgerError> {
        self.calls
            .lock()
            .unwrap()
            .push((winners.to_vec(), losers.to_vec()));
        if self.failing {
            return Err(LedgerError::Poisoned);
        }
        self.inner.record(winners, losers)
    }

    fn summary(&self) -> Vec<ScoreEntry> {
        self.inner.summary()
    }
}

struct GameTester {
    messenger: Arc<RecordingMessenger>,
    ledger: Arc<SpyLedger>,
    session: GameSession,
}

impl GameTester {
    fn new(seed: u64) -> Self {
        Self::with_ledger(seed, SpyLedger::new())
    }

    fn with_ledger(seed: u64, ledger: SpyLedger) -> Self {
        setup_test_env();
        let messenger = Arc::new(RecordingMessenger::new());
        let ledger = Arc::new(ledger);
        let session = GameSession::with_rng(
            messenger.clone(),
            ledger.clone(),
            SessionOptions::default(),
            StdRng::seed_from_u64(seed),
        );
        Self {
            messenger,
            ledger,
            session,
        }
    }

    fn with_players(count: usize, seed: u64) -> Self {
        let mut tester = Self::new(seed);
        for i in 0..count {
            tester.session.join(&format!("Player{}", i)).unwrap();
        }
        tester.messenger.drain();
        tester
    }

    fn started(count: usize, seed: u64, args: &str) -> Self {
        let mut tester = Self::with_players(count, seed);
        tester.session.start(args).unwrap();
        tester
    }

    fn players(&self) -> Vec<String> {
        self.session.players().to_vec()
    }

    fn side(&self, evil: bool) -> Vec<String> {
        self.players()
            .into_iter()
            .filter(|p| self.session.role_of(p).unwrap().is_evil() == evil)
            .collect()
    }

    fn holder(&self, role: Role) -> String {
        self.session.players_with(role)[0].to_string()
    }

    fn selector(&self) -> String {
        self.session.team_selector().unwrap().to_string()
    }

    fn team_size(&self) -> usize {
        self.session.current_quest().unwrap().team_size
    }

    /// A team for the current quest holding `evil` evil players.
    fn team_with_evil(&self, evil: usize) -> Vec<String> {
        let size = self.team_size();
        let mut team: Vec<String> = self.side(true).into_iter().take(evil).collect();
        assert_eq!(team.len(), evil, "not enough evil players");
        team.extend(self.side(false).into_iter().take(size - evil));
        assert_eq!(team.len(), size, "not enough good players");
        team
    }

    fn propose(&mut self, team: Vec<String>) -> Result<(), GameError> {
        let selector = self.selector();
        self.session.propose_team(&selector, team)
    }

    fn vote_all(&mut self, ballot: TeamBallot) {
        for player in self.players() {
            self.session.team_vote(&player, ballot).unwrap();
        }
    }

    fn reject_round(&mut self) {
        let team = self.team_with_evil(0);
        self.propose(team).unwrap();
        self.vote_all(TeamBallot::Reject);
    }

    /// Plays the current quest with an accepted team holding `evil` evil
    /// players, `fails` of whom play fail.
    fn play_quest(&mut self, evil: usize, fails: usize) {
        let team = self.team_with_evil(evil);
        self.propose(team.clone()).unwrap();
        self.vote_all(TeamBallot::Accept);
        assert_eq!(self.session.phase(), GamePhase::QuestVote);

        let mut fails_left = fails;
        for member in team {
            let evil = self.session.role_of(&member).unwrap().is_evil();
            let card = if evil && fails_left > 0 {
                fails_left -= 1;
                QuestCard::Fail
            } else {
                QuestCard::Success
            };
            self.session.quest_vote(&member, card).unwrap();
        }
    }
}

fn role_counts(session: &GameSession) -> Vec<(Role, usize)> {
    Role::ALL
        .iter()
        .map(|role| (*role, session.players_with(*role).len()))
        .filter(|(_, n)| *n > 0)
        .collect()
}

#[test]
fn test_join_keeps_roster_sorted() {
    let mut tester = GameTester::new(1);
    tester.session.handle_pubmsg("carol", "!join");
    tester.session.handle_pubmsg("alice", "!JOIN");
    tester.session.handle_pubmsg("bob", "!join");

    assert_eq!(tester.players(), vec!["alice", "bob", "carol"]);
    assert_eq!(
        tester.messenger.broadcasts().last().unwrap(),
        "Players registered: alice, bob, carol"
    );

    tester.session.handle_pubmsg("bob", "!join");
    assert_eq!(
        tester.messenger.broadcasts().last().unwrap(),
        "bob: You are already registered."
    );
    assert_eq!(tester.players().len(), 3);
}

#[test]
fn test_leave() {
    let mut tester = GameTester::new(1);
    tester.session.join("alice").unwrap();
    assert_eq!(tester.session.leave("bob"), Err(GameError::NotRegistered));
    tester.session.leave("alice").unwrap();
    assert_eq!(
        tester.messenger.broadcasts().last().unwrap(),
        "Players registered: none"
    );
}

#[test]
fn test_start_requires_five_players() {
    let mut tester = GameTester::with_players(4, 1);
    tester.session.handle_pubmsg("Player0", "!start");
    assert_eq!(
        tester.messenger.broadcasts(),
        vec!["Player0: At least five players are required to start."]
    );
    assert_eq!(tester.session.phase(), GamePhase::Assemble);
}

#[test]
fn test_start_rejects_more_than_ten_players() {
    let mut tester = GameTester::new(1);
    for name in ["a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k"] {
        tester.session.join(name).unwrap();
    }
    assert_eq!(tester.session.start(""), Err(GameError::TooManyPlayers));
}

#[test]
fn test_start_rejects_unknown_argument_without_state_change() {
    let mut tester = GameTester::with_players(7, 1);
    assert_eq!(
        tester.session.start("percival lancelot"),
        Err(GameError::InvalidGameArgument("lancelot".to_string()))
    );
    assert_eq!(tester.session.phase(), GamePhase::Assemble);
    assert!(tester.session.game_args().is_empty());
    assert!(tester.session.role_of("Player0").is_none());
}

#[test]
fn test_five_player_game_start() {
    let mut tester = GameTester::with_players(5, 7);
    tester.session.handle_pubmsg("Player0", "!start");

    assert_eq!(tester.session.phase(), GamePhase::TeamSel);
    assert_eq!(tester.side(true).len(), 2);
    assert_eq!(
        role_counts(&tester.session),
        vec![
            (Role::Merlin, 1),
            (Role::LoyalServant, 2),
            (Role::Assassin, 1),
            (Role::MinionOfMordred, 1),
        ]
    );

    let quest = tester.session.current_quest().unwrap();
    assert_eq!((quest.team_size, quest.fails_required), (2, 1));

    for player in tester.players() {
        let directs = tester.messenger.directs_to(&player);
        assert_eq!(directs.len(), 1, "{} gets exactly one role message", player);
        assert!(directs[0].starts_with("You are "));
    }
    let broadcasts = tester.messenger.broadcasts();
    assert!(broadcasts[0].starts_with("The game has started! Players are Player0, Player1"));
    assert!(broadcasts[0].contains(
        "Good role cards in play: Merlin, 2x Loyal Servant of Arthur. Evil role cards in play: Assassin, Minion of Mordred."
    ));
    assert!(broadcasts[1].starts_with("Quest 1 (team of 2): undecided | "));
    assert!(broadcasts[2].starts_with(&format!(
        "For quest 1/5, {} now selects a team of 2 players.",
        tester.selector()
    )));
}

#[test]
fn test_merlin_learns_visible_minions() {
    let tester = GameTester::started(7, 3, "mordred");
    let text = tester
        .messenger
        .directs_to(&tester.holder(Role::Merlin))
        .pop()
        .unwrap();

    let assassin = tester.holder(Role::Assassin);
    let mordred = tester.holder(Role::Mordred);
    let minion = tester.holder(Role::MinionOfMordred);
    assert!(text.contains(&assassin));
    assert!(text.contains(&minion));
    assert!(!text.contains(&mordred), "Mordred stays hidden from Merlin");
}

#[test]
fn test_deal_roles_respects_table_split() {
    let arg_sets: Vec<BTreeSet<GameArg>> = vec![
        BTreeSet::new(),
        [GameArg::Percival].into_iter().collect(),
        [GameArg::Percival, GameArg::Morgana].into_iter().collect(),
        [GameArg::Mordred].into_iter().collect(),
        [GameArg::Oberon].into_iter().collect(),
    ];
    let mut rng = StdRng::seed_from_u64(42);
    for count in 5..=10 {
        let players: Vec<String> = (0..count).map(|i| format!("p{:02}", i)).collect();
        for args in &arg_sets {
            for _ in 0..20 {
                let roles = deal_roles(&players, args, &mut rng).unwrap();
                assert_eq!(roles.len(), count);
                let evil = roles.values().filter(|r| r.is_evil()).count();
                assert_eq!(evil, evil_count(count).unwrap(), "{} players", count);
                assert_eq!(roles.values().filter(|r| r.is_merlin()).count(), 1);
                assert_eq!(roles.values().filter(|r| r.is_assassin()).count(), 1);

                let expected_optional = |role: Role, arg: GameArg| {
                    let n = roles.values().filter(|r| **r == role).count();
                    assert_eq!(n, usize::from(args.contains(&arg)));
                };
                expected_optional(Role::Percival, GameArg::Percival);
                expected_optional(Role::Morgana, GameArg::Morgana);
                expected_optional(Role::Mordred, GameArg::Mordred);
                expected_optional(Role::Oberon, GameArg::Oberon);
            }
        }
    }
}

#[test]
fn test_morgana_without_percival_never_deals() {
    let players: Vec<String> = (0..7).map(|i| format!("p{}", i)).collect();
    let morgana: BTreeSet<GameArg> = [GameArg::Morgana].into_iter().collect();
    let both: BTreeSet<GameArg> = [GameArg::Morgana, GameArg::Percival].into_iter().collect();
    let mut rng = StdRng::seed_from_u64(9);
    for _ in 0..50 {
        assert_eq!(
            deal_roles(&players, &morgana, &mut rng),
            Err(GameError::RoleAssignment)
        );
        assert!(deal_roles(&players, &both, &mut rng).is_ok());
    }
}

#[test]
fn test_too_many_optional_roles_is_a_generic_failure() {
    let mut tester = GameTester::with_players(5, 1);
    tester.session.handle_pubmsg("Player3", "!start mordred oberon");
    assert_eq!(
        tester.messenger.broadcasts(),
        vec!["Player3: Game could not be started due to error in assigning roles. Please check your options for consistency."]
    );
    assert_eq!(tester.session.phase(), GamePhase::Assemble);
    assert!(tester.messenger.directs_to("Player0").is_empty());
}

#[test]
fn test_full_optional_cast_at_ten_players() {
    let tester = GameTester::started(10, 5, "percival mordred oberon morgana");
    assert_eq!(
        role_counts(&tester.session),
        vec![
            (Role::Merlin, 1),
            (Role::Percival, 1),
            (Role::LoyalServant, 4),
            (Role::Assassin, 1),
            (Role::Mordred, 1),
            (Role::Morgana, 1),
            (Role::Oberon, 1),
        ]
    );
    let percival = tester.messenger.directs_to(&tester.holder(Role::Percival));
    let merlin = tester.holder(Role::Merlin);
    let morgana = tester.holder(Role::Morgana);
    assert!(percival[0].contains(&merlin) && percival[0].contains(&morgana));
    assert!(percival[0].ends_with("are Merlin."));
}

#[test]
fn test_invalid_team_proposals_change_nothing() {
    let mut tester = GameTester::started(5, 11, "");
    let selector = tester.selector();
    let other = tester
        .players()
        .into_iter()
        .find(|p| *p != selector)
        .unwrap();
    let pair = vec![tester.players()[0].clone(), tester.players()[1].clone()];

    assert_eq!(
        tester.session.propose_team(&other, pair.clone()),
        Err(GameError::NotYourTurn)
    );
    assert_eq!(
        tester.propose(vec![pair[0].clone()]),
        Err(GameError::WrongTeamSize(2))
    );
    assert_eq!(
        tester.propose(vec![pair[0].clone(), "Mallory".to_string()]),
        Err(GameError::UnknownTeamMember)
    );
    assert_eq!(
        tester.propose(vec![pair[0].clone(), pair[0].clone()]),
        Err(GameError::DuplicateTeamMember)
    );
    assert_eq!(tester.session.phase(), GamePhase::TeamSel);
    assert_eq!(tester.selector(), selector);
    assert!(tester.session.current_team().is_empty());

    tester.propose(pair.clone()).unwrap();
    assert_eq!(tester.session.phase(), GamePhase::TeamVote);
    assert_eq!(tester.session.current_team(), pair.as_slice());
    assert_eq!(tester.propose(pair), Err(GameError::NotAvailable));
}

#[test]
fn test_tied_team_vote_goes_back_to_selection() {
    let mut tester = GameTester::started(6, 2, "");
    let selector = tester.selector();
    let team = tester.team_with_evil(0);
    tester.propose(team).unwrap();

    let players = tester.players();
    for (i, player) in players.iter().enumerate() {
        let ballot = if i % 2 == 0 {
            TeamBallot::Accept
        } else {
            TeamBallot::Reject
        };
        tester.session.team_vote(player, ballot).unwrap();
    }

    assert_eq!(tester.session.phase(), GamePhase::TeamSel);
    assert_eq!(tester.session.failed_team_votes(), 1);
    let idx = players.iter().position(|p| *p == selector).unwrap();
    assert_eq!(tester.selector(), players[(idx + 1) % players.len()]);
}

#[test]
fn test_strict_majority_accepts_team() {
    let mut tester = GameTester::started(5, 2, "");
    let team = tester.team_with_evil(0);
    tester.propose(team).unwrap();
    let players = tester.players();
    for (i, player) in players.iter().enumerate() {
        let ballot = if i < 3 {
            TeamBallot::Accept
        } else {
            TeamBallot::Reject
        };
        tester.session.team_vote(player, ballot).unwrap();
    }
    assert_eq!(tester.session.phase(), GamePhase::QuestVote);
    assert_eq!(tester.session.failed_team_votes(), 0);
}

#[test]
fn test_duplicate_vote_is_ignored() {
    let mut tester = GameTester::started(5, 4, "");
    let team = tester.team_with_evil(0);
    tester.propose(team).unwrap();
    let players = tester.players();

    for player in &players[..4] {
        tester.session.team_vote(player, TeamBallot::Accept).unwrap();
    }
    tester.messenger.drain();
    tester.session.handle_privmsg(&players[0], "reject");
    tester.session.handle_privmsg(&players[0], "r");

    assert_eq!(tester.session.phase(), GamePhase::TeamVote);
    assert_eq!(
        tester.messenger.directs_to(&players[0]),
        vec!["Double vote ignored.", "Double vote ignored."]
    );
    assert!(tester.messenger.broadcasts().is_empty());

    tester.session.handle_privmsg(&players[4], "accept");
    assert_eq!(tester.session.phase(), GamePhase::QuestVote);
}

#[test]
fn test_non_player_cannot_vote() {
    let mut tester = GameTester::started(5, 4, "");
    let team = tester.team_with_evil(0);
    tester.propose(team).unwrap();
    assert_eq!(
        tester.session.team_vote("Mallory", TeamBallot::Accept),
        Err(GameError::NotEligible)
    );
}

#[test]
fn test_failed_vote_counter_resets_when_team_accepted() {
    let mut tester = GameTester::started(5, 8, "");
    for _ in 0..4 {
        tester.reject_round();
    }
    assert_eq!(tester.session.failed_team_votes(), 4);
    assert!(tester
        .messenger
        .broadcasts()
        .iter()
        .any(|m| m.starts_with("Failed votes in this round: 4. When five failed votes")));

    let team = tester.team_with_evil(0);
    tester.propose(team).unwrap();
    tester.vote_all(TeamBallot::Accept);
    assert_eq!(tester.session.failed_team_votes(), 0);
}

#[test]
fn test_five_failed_team_votes_end_game_for_evil() {
    let mut tester = GameTester::started(5, 13, "");
    tester.play_quest(0, 0);
    tester.play_quest(0, 0);
    assert_eq!(tester.session.quest_results(), &[true, true]);

    for _ in 0..5 {
        tester.reject_round();
    }
    assert_eq!(tester.session.phase(), GamePhase::Finished(Alignment::Evil));
    assert!(tester
        .messenger
        .broadcasts()
        .contains(&"Five failed votes: Evil wins.".to_string()));

    let calls = tester.ledger.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, tester.side(true));
    assert_eq!(calls[0].1, tester.side(false));
}

#[test]
fn test_failed_highscore_write_still_finishes_game() {
    let mut tester = GameTester::with_ledger(13, SpyLedger::failing());
    for i in 0..5 {
        tester.session.join(&format!("Player{}", i)).unwrap();
    }
    tester.session.start("").unwrap();

    for _ in 0..5 {
        tester.reject_round();
    }
    assert_eq!(tester.session.phase(), GamePhase::Finished(Alignment::Evil));
    assert_eq!(tester.ledger.calls().len(), 1);
    assert_eq!(
        tester.messenger.broadcasts().last().unwrap(),
        "Highscore: none"
    );
    assert!(!tester
        .messenger
        .broadcasts()
        .iter()
        .any(|m| m.contains("poisoned")));
}

#[test]
fn test_quest_vote_errors_take_precedence_over_fail_check() {
    let mut tester = GameTester::started(5, 21, "");
    let team = tester.team_with_evil(0);
    tester.propose(team.clone()).unwrap();
    tester.vote_all(TeamBallot::Accept);

    let good_outsider = tester
        .side(false)
        .into_iter()
        .find(|p| !team.contains(p))
        .unwrap();
    assert_eq!(
        tester.session.quest_vote(&good_outsider, QuestCard::Fail),
        Err(GameError::NotEligible)
    );

    tester.session.quest_vote(&team[0], QuestCard::Success).unwrap();
    assert_eq!(
        tester.session.quest_vote(&team[0], QuestCard::Fail),
        Err(GameError::DoubleVote)
    );
    assert!(tester.session.quest_results().is_empty());
}

#[test]
fn test_good_players_may_not_fail_quests() {
    let mut tester = GameTester::started(5, 21, "");
    let team = tester.team_with_evil(0);
    tester.propose(team.clone()).unwrap();
    tester.vote_all(TeamBallot::Accept);

    tester.session.handle_privmsg(&team[0], "fail");
    assert_eq!(
        tester.messenger.directs_to(&team[0]).last().unwrap(),
        "You are not allowed to vote fail."
    );
    let outsider = tester
        .players()
        .into_iter()
        .find(|p| !team.contains(p))
        .unwrap();
    assert_eq!(
        tester.session.quest_vote(&outsider, QuestCard::Success),
        Err(GameError::NotEligible)
    );

    tester.session.quest_vote(&team[0], QuestCard::Success).unwrap();
    assert_eq!(
        tester.session.quest_vote(&team[0], QuestCard::Success),
        Err(GameError::DoubleVote)
    );
    assert_eq!(tester.session.phase(), GamePhase::QuestVote);
    assert!(tester.session.quest_results().is_empty());
}

#[test]
fn test_single_fail_fails_ordinary_quest() {
    let mut tester = GameTester::started(5, 21, "");
    tester.play_quest(1, 1);
    assert_eq!(tester.session.quest_results(), &[false]);
    assert!(tester.messenger.broadcasts().contains(
        &"Quest failed. Number of success votes was 1, number of fail votes was 1.".to_string()
    ));
    assert_eq!(tester.session.phase(), GamePhase::TeamSel);
}

/// Brings a seven player game to its fourth quest, which needs two fails.
fn seven_players_at_fourth_quest(seed: u64) -> GameTester {
    let mut tester = GameTester::started(7, seed, "");
    tester.play_quest(0, 0);
    tester.play_quest(1, 1);
    tester.play_quest(0, 0);
    assert_eq!(tester.session.quest_results(), &[true, false, true]);
    let quest = tester.session.current_quest().unwrap();
    assert_eq!((quest.team_size, quest.fails_required), (4, 2));
    tester
}

#[test]
fn test_fourth_quest_of_seven_survives_one_fail() {
    let mut tester = seven_players_at_fourth_quest(17);
    tester.play_quest(2, 1);
    assert_eq!(tester.session.quest_results(), &[true, false, true, true]);
    assert_eq!(tester.session.phase(), GamePhase::Assassination);
}

#[test]
fn test_fourth_quest_of_seven_fails_with_two() {
    let mut tester = seven_players_at_fourth_quest(17);
    tester.play_quest(2, 2);
    assert_eq!(tester.session.quest_results(), &[true, false, true, false]);
    assert_eq!(tester.session.phase(), GamePhase::TeamSel);
}

#[test]
fn test_three_failed_quests_end_game_for_evil() {
    let mut tester = GameTester::started(5, 30, "");
    for _ in 0..3 {
        tester.play_quest(1, 1);
    }
    assert_eq!(tester.session.phase(), GamePhase::Finished(Alignment::Evil));
    assert_eq!(tester.ledger.calls().len(), 1);
}

#[test]
fn test_assassin_kills_merlin() {
    let mut tester = GameTester::started(5, 31, "");
    for _ in 0..3 {
        tester.play_quest(0, 0);
    }
    assert_eq!(tester.session.phase(), GamePhase::Assassination);

    let assassin = tester.holder(Role::Assassin);
    let merlin = tester.holder(Role::Merlin);
    let bystander = tester
        .side(false)
        .into_iter()
        .find(|p| *p != merlin)
        .unwrap();

    assert_eq!(
        tester.session.kill(&bystander, &merlin),
        Err(GameError::NotAssassin)
    );
    assert_eq!(
        tester.session.kill(&assassin, "Mallory"),
        Err(GameError::InvalidPlayer)
    );
    assert_eq!(tester.session.phase(), GamePhase::Assassination);

    tester
        .session
        .handle_pubmsg(&assassin, &format!("!kill {}", merlin));
    assert_eq!(tester.session.phase(), GamePhase::Finished(Alignment::Evil));
    let broadcasts = tester.messenger.broadcasts();
    assert!(broadcasts.contains(&"The Assassin has killed Merlin!".to_string()));
    assert!(broadcasts.iter().any(|b| b.starts_with("Evil wins! Evil players were: ")));
}

#[test]
fn test_missed_assassination_records_good_win() {
    let mut tester = GameTester::started(5, 32, "");
    for _ in 0..3 {
        tester.play_quest(0, 0);
    }
    let assassin = tester.holder(Role::Assassin);
    let servant = tester.holder(Role::LoyalServant);
    tester.session.kill(&assassin, &servant).unwrap();

    assert_eq!(tester.session.phase(), GamePhase::Finished(Alignment::Good));
    assert_eq!(tester.session.winner(), Some(Alignment::Good));
    let calls = tester.ledger.calls();
    assert_eq!(calls, vec![(tester.side(false), tester.side(true))]);
    let last = tester.messenger.broadcasts().pop().unwrap();
    assert!(last.starts_with("Highscore: "));
    assert!(last.contains(&format!("{} (won: 1, lost: 0)", servant)));
    assert!(last.contains(&format!("{} (won: 0, lost: 1)", assassin)));
}

#[test]
fn test_identify_repeats_role_message() {
    let mut tester = GameTester::with_players(5, 40);
    tester.session.handle_privmsg("Player0", "identify");
    assert_eq!(
        tester.messenger.directs_to("Player0"),
        vec!["You have no role in the current game."]
    );

    tester.session.start("").unwrap();
    let first = tester.messenger.directs_to("Player0").pop().unwrap();
    tester.messenger.drain();
    tester.session.handle_privmsg("Player0", "identify");
    assert_eq!(tester.messenger.directs_to("Player0"), vec![first]);
}

#[test]
fn test_unsupported_private_command() {
    let mut tester = GameTester::new(1);
    tester.session.handle_privmsg("alice", "hello");
    assert_eq!(
        tester.messenger.directs_to("alice"),
        vec!["Unsupported command. Supported commands via private message are accept, reject, success, fail, identify."]
    );
}

#[test]
fn test_votes_outside_voting_phase() {
    let mut tester = GameTester::with_players(5, 1);
    assert_eq!(
        tester.session.team_vote("Player0", TeamBallot::Accept),
        Err(GameError::NotAvailable)
    );
    assert_eq!(
        tester.session.quest_vote("Player0", QuestCard::Success),
        Err(GameError::NotAvailable)
    );
    assert_eq!(tester.session.kill("Player0", "Player1"), Err(GameError::NotAvailable));
}

#[test]
fn test_info_and_unknown_commands() {
    let mut tester = GameTester::with_players(2, 1);
    tester.session.handle_pubmsg("Player0", "!info");
    tester.session.handle_pubmsg("Player0", "!dance");
    tester.session.handle_pubmsg("Player0", "just chatting");
    assert_eq!(
        tester.messenger.broadcasts(),
        vec!["Info: Game is not running. Players registered: Player0, Player1"]
    );
}

#[test]
fn test_info_reports_each_running_phase() {
    let mut tester = GameTester::started(5, 1, "");
    let selector = tester.selector();

    tester.messenger.drain();
    tester.session.handle_pubmsg("Player0", "!info");
    assert_eq!(
        tester.messenger.broadcasts(),
        vec![format!(
            "Info: For quest 1/5, {} now selects a team of 2 players.",
            selector
        )]
    );

    let team = tester.team_with_evil(0);
    tester.propose(team.clone()).unwrap();
    tester.messenger.drain();
    tester.session.handle_pubmsg("Player0", "!info");
    assert_eq!(
        tester.messenger.broadcasts(),
        vec![format!(
            "Info: {} has chosen the following team: {}. Missing votes from Player0, Player1, Player2, Player3, Player4.",
            selector,
            team.join(", ")
        )]
    );

    tester.session.team_vote("Player0", TeamBallot::Accept).unwrap();
    tester.messenger.drain();
    tester.session.info();
    assert!(tester.messenger.broadcasts()[0]
        .ends_with("Missing votes from Player1, Player2, Player3, Player4."));

    for player in ["Player1", "Player2", "Player3", "Player4"] {
        tester.session.team_vote(player, TeamBallot::Accept).unwrap();
    }
    assert_eq!(tester.session.phase(), GamePhase::QuestVote);
    tester.messenger.drain();
    tester.session.info();
    assert_eq!(
        tester.messenger.broadcasts(),
        vec![format!(
            "Info: Team {} is on quest 1/5. Missing votes from {}.",
            team.join(", "),
            team.join(", ")
        )]
    );
}

#[test]
fn test_info_during_assassination() {
    let mut tester = GameTester::started(5, 1, "");
    for _ in 0..3 {
        tester.play_quest(0, 0);
    }
    assert_eq!(tester.session.phase(), GamePhase::Assassination);

    tester.messenger.drain();
    tester.session.handle_pubmsg("Player0", "!info");
    assert_eq!(
        tester.messenger.broadcasts(),
        vec!["Info: Good has won three quests. The Assassin may now try to identify Merlin."]
    );
}

#[test]
fn test_join_rejected_once_started() {
    let mut tester = GameTester::started(5, 1, "");
    assert_eq!(tester.session.join("late"), Err(GameError::NotAvailable));
    assert_eq!(tester.session.leave("Player0"), Err(GameError::NotAvailable));
    assert_eq!(tester.session.start(""), Err(GameError::NotAvailable));
}

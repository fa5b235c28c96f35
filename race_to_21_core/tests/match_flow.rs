//! Whole matches played through a scripted table.
//!
//! Most rounds deal the same points to every player and have everyone
//! stay, so the round goes to the earliest player on the roster no matter
//! how the turn order was shuffled.

use race_to_21_core::*;

fn cards(ids: &[&str]) -> Vec<Card> {
    ids.iter().map(|id| id.parse().unwrap()).collect()
}

fn fives(players: usize) -> Vec<Card> {
    cards(&["5S", "5H", "5D", "5C"][..players])
}

fn settings(starting_cash: u32) -> GameSettings {
    GameSettings { starting_cash, ..GameSettings::default() }
}

fn play(table: ScriptedTable, rounds: Vec<Vec<Card>>, settings: GameSettings) -> GameEngine<ScriptedTable, StackedDeck> {
    let mut engine = GameEngine::new(table, StackedDeck::new(rounds), settings, GameRng::new(21)).unwrap();
    engine.run().unwrap();
    engine
}

fn count(requests: &[String], name: &str) -> usize {
    requests.iter().filter(|n| *n == name).count()
}

fn cash_of(engine: &GameEngine<ScriptedTable, StackedDeck>, name: &str) -> u32 {
    engine.state().find_player(name).unwrap().cash
}

#[test]
fn test_first_to_win_target_takes_the_match() {
    let table = ScriptedTable::new()
        .player_count(2)
        .win_target(3)
        .names(["Ann", "Bob"])
        .bets([10; 6])
        .wants_card([false; 6])
        .continues([true; 4]);
    let engine = play(table, vec![fives(2), fives(2), fives(2)], GameSettings::default());

    let end = engine.table().match_end.clone().unwrap();
    assert_eq!(end.reason, MatchEndReason::WinTarget);
    assert_eq!(end.distinguished.as_deref(), Some("Ann"));
    assert_eq!(end.standings, vec!["Ann", "Bob"]);

    assert_eq!(engine.table().round_winners, vec![("Ann".to_string(), 40); 3]);
    assert_eq!(cash_of(&engine, "Ann"), 190);
    assert_eq!(cash_of(&engine, "Bob"), 70);
    assert_eq!(engine.players()[0].wins, 3);
    assert!(engine.is_over());
}

#[test]
fn test_match_ends_when_too_few_want_to_continue() {
    let table = ScriptedTable::new()
        .player_count(2)
        .win_target(3)
        .names(["Ann", "Bob"])
        .bets([10, 5])
        .wants_card([false, false])
        .continues([true, false]);
    let engine = play(table, vec![fives(2)], GameSettings::default());

    let end = engine.table().match_end.clone().unwrap();
    assert_eq!(end.reason, MatchEndReason::InsufficientPlayers);
    assert_eq!(end.distinguished, None);
    assert_eq!(end.standings, vec!["Ann", "Bob"]);
    assert_eq!(cash_of(&engine, "Ann"), 120);
    assert_eq!(cash_of(&engine, "Bob"), 95);
    assert_eq!(engine.players()[1].status, PlayerStatus::Quit);
}

#[test]
fn test_quitting_is_permanent() {
    let table = ScriptedTable::new()
        .player_count(3)
        .win_target(3)
        .names(["Ann", "Bob", "Cid"])
        .bets([10; 5])
        .wants_card([false; 5])
        .continues([true, false, true, true, false]);
    let engine = play(table, vec![fives(3), fives(2)], GameSettings::default());

    let table = engine.table();
    assert_eq!(count(&table.bet_requests, "Bob"), 1);
    assert_eq!(count(&table.card_requests, "Bob"), 1);
    assert_eq!(count(&table.continue_requests, "Bob"), 1);
    assert_eq!(count(&table.bet_requests, "Cid"), 2);

    // Bob is only introduced in the first round.
    let bob_intros: Vec<_> = table.introductions.iter().filter(|(name, _)| name == "Bob").collect();
    assert_eq!(bob_intros, vec![&("Bob".to_string(), 2)]);

    let end = table.match_end.clone().unwrap();
    assert_eq!(end.reason, MatchEndReason::InsufficientPlayers);
    // Quit players still appear in the final standings.
    assert_eq!(end.standings, vec!["Ann", "Bob", "Cid"]);
    assert_eq!(cash_of(&engine, "Ann"), 180);
    assert_eq!(cash_of(&engine, "Bob"), 90);
    assert_eq!(cash_of(&engine, "Cid"), 80);
}

#[test]
fn test_last_player_with_cash_wins() {
    let table = ScriptedTable::new()
        .player_count(2)
        .win_target(3)
        .names(["Ann", "Bob"])
        .bets([60, 10, 50])
        .wants_card([false, false]);
    let engine = play(table, vec![fives(2)], settings(50));

    let table = engine.table();
    assert!(table.messages.contains(&"Your cash: 50 is not enough.".to_string()));
    assert_eq!(table.bet_requests, vec!["Ann", "Ann", "Bob"]);

    let end = table.match_end.clone().unwrap();
    assert_eq!(end.reason, MatchEndReason::InsufficientCash);
    assert_eq!(end.distinguished.as_deref(), Some("Ann"));
    assert_eq!(cash_of(&engine, "Ann"), 160);
    assert_eq!(cash_of(&engine, "Bob"), 0);
    // Nobody is asked to continue once the match is decided.
    assert!(table.continue_requests.is_empty());
}

#[test]
fn test_broke_player_is_retired_without_being_asked() {
    let table = ScriptedTable::new()
        .player_count(3)
        .win_target(3)
        .names(["Ann", "Bob", "Cid"])
        .bets([10, 10, 50, 10, 10])
        .wants_card([false; 5])
        .continues([true, true, false, false]);
    let engine = play(table, vec![fives(3), fives(2)], settings(50));

    let table = engine.table();
    assert!(table.messages.contains(&"Cid, you don't have enough cash for the next game.".to_string()));
    assert_eq!(count(&table.continue_requests, "Cid"), 0);
    assert_eq!(count(&table.bet_requests, "Cid"), 1);
    assert_eq!(engine.state().find_player("Cid").unwrap().status, PlayerStatus::Quit);

    assert_eq!(table.round_winners, vec![("Ann".to_string(), 140), ("Ann".to_string(), 40)]);
    let end = table.match_end.clone().unwrap();
    assert_eq!(end.reason, MatchEndReason::InsufficientPlayers);
    assert_eq!(end.standings, vec!["Ann", "Bob", "Cid"]);
}

#[test]
fn test_stepping_a_finished_match_fails() {
    let table = ScriptedTable::new()
        .player_count(2)
        .win_target(3)
        .names(["Ann", "Bob"])
        .bets([10, 10])
        .wants_card([false, false])
        .continues([false, false]);
    let mut engine = play(table, vec![fives(2)], GameSettings::default());

    assert_eq!(engine.phase(), GamePhase::Terminal);
    let err = engine.step().unwrap_err();
    assert!(matches!(err, GameError::MatchOver));
    assert!(err.is_internal());
}

#[test]
fn test_running_out_of_answers_stops_the_match() {
    let table = ScriptedTable::new().player_count(2).win_target(3).names(["Ann", "Bob"]).bets([10]);
    let mut engine = GameEngine::new(table, StackedDeck::new(vec![fives(2)]), GameSettings::default(), GameRng::new(1)).unwrap();

    let err = engine.run().unwrap_err();
    assert!(matches!(err, GameError::Table(TableError::InputClosed)));
    assert!(!err.is_internal());
    assert_eq!(engine.phase(), GamePhase::CollectBets);
}

#[test]
fn test_same_seed_replays_the_same_match() {
    let replay = || {
        let table = ScriptedTable::new()
            .player_count(2)
            .win_target(3)
            .names(["Ann", "Bob"])
            .bets([10; 10])
            .wants_card([false; 10])
            .continues([true; 8]);
        let mut engine = GameEngine::new(table, StandardDeck::new(), GameSettings::default(), GameRng::new(99)).unwrap();
        engine.run().unwrap();
        let table = engine.into_table();
        (table.round_winners, table.match_end)
    };

    let (winners, end) = replay();
    assert_eq!(replay(), (winners.clone(), end.clone()));
    assert!(winners.len() >= 3);
    assert_eq!(end.unwrap().reason, MatchEndReason::WinTarget);
}

//! Round engine, match engine, and session integration tests.

use std::io;

use rankjack::{
    ActionError, Card, DealError, Deck, Match, MatchError, MemoryStore, Mode, Outcome, Profile,
    ProfileStore, RoundPhase, SeatKind, SeatStatus, Session, StoreError, Suit, TurnError,
};

const fn card(suit: Suit, rank: u8) -> Card {
    Card::new(suit, rank)
}

fn stacked_deck(draws: &[Card]) -> Deck {
    let mut cards = draws.to_vec();
    cards.reverse();
    Deck::from_cards(cards)
}

/// Deals a head-to-head round from a stacked deck.
///
/// Cards go out in two passes over human, AI, house, so the draw order is
/// `[h1, a1, H1, h2, a2, H2, ...hit cards]`.
fn deal_head_to_head(draws: &[Card]) -> Match {
    let mut game = Match::new(Mode::HeadToHead, 1);
    game.deck = stacked_deck(draws);
    game.deal().expect("stacked deal");
    game
}

fn run_ai_and_house(game: &mut Match) {
    while game.phase == RoundPhase::AiTurns {
        game.play_ai_seat().expect("ai seat resolves");
    }
    if game.phase == RoundPhase::HouseTurn {
        game.play_house().expect("house resolves");
    }
}

fn outcome_of(game: &Match, id: u8) -> Outcome {
    game.round_history
        .last()
        .and_then(|round| round.iter().find(|o| o.participant_id == id))
        .map(|o| o.outcome)
        .expect("outcome recorded")
}

#[test]
fn seats_follow_the_mode_layout() {
    let h2h = Match::new(Mode::HeadToHead, 3);
    assert_eq!(h2h.participants.len(), 3);
    assert!(h2h.human().is_human());
    assert_eq!(h2h.participants[1].kind, SeatKind::Ai);
    assert!(h2h.participants[2].is_house());
    assert_eq!(h2h.max_rounds, 5);

    let team = Match::new(Mode::Team, 3);
    assert_eq!(team.participants.len(), 5);
    assert_eq!(team.human().team, Some(1));
    assert_eq!(team.participants[1].team, Some(1));
    assert_eq!(team.participants[2].team, Some(2));
    assert_eq!(team.participants[3].team, Some(2));
    assert!(team.participants[4].is_house());

    let ffa = Match::new(Mode::FreeForAll, 3);
    assert_eq!(ffa.participants.len(), 5);
    assert!(ffa.house().is_none());
    assert_eq!(ffa.max_rounds, 10);
}

#[test]
fn head_to_head_round_beats_the_house() {
    let mut game = deal_head_to_head(&[
        card(Suit::Hearts, 10),  // human
        card(Suit::Hearts, 9),   // ai
        card(Suit::Diamonds, 10), // house up
        card(Suit::Spades, 10),  // human
        card(Suit::Hearts, 8),   // ai -> 17, stands
        card(Suit::Diamonds, 9), // house hole -> 19, stands
    ]);

    assert_eq!(game.phase, RoundPhase::HumanTurn);
    game.stand().expect("human stands");
    assert_eq!(game.phase, RoundPhase::AiTurns);

    run_ai_and_house(&mut game);

    assert_eq!(game.phase, RoundPhase::Resolved);
    assert_eq!(outcome_of(&game, 0), Outcome::Win);
    assert_eq!(outcome_of(&game, 1), Outcome::Lose);
    assert_eq!(game.human().rounds_won, 1);
    assert_eq!(game.participants[1].status, SeatStatus::Stood);
}

#[test]
fn busted_human_loses_regardless_of_the_house() {
    let mut game = deal_head_to_head(&[
        card(Suit::Hearts, 10),  // human
        card(Suit::Spades, 10),  // ai
        card(Suit::Diamonds, 9), // house up
        card(Suit::Hearts, 6),   // human -> 16
        card(Suit::Spades, 9),   // ai -> 19, stands
        card(Suit::Clubs, 9),    // house hole -> 18, stands
        card(Suit::Clubs, 13),   // human hit -> 26, bust
    ]);

    let hit = game.hit().expect("deck has a card");
    assert_eq!(hit.rank, 13);
    assert_eq!(game.human().status, SeatStatus::Busted);
    assert_eq!(game.phase, RoundPhase::AiTurns);

    run_ai_and_house(&mut game);

    assert_eq!(outcome_of(&game, 0), Outcome::Bust);
    assert_eq!(outcome_of(&game, 1), Outcome::Win);
    assert_eq!(game.human().rounds_won, 0);
}

#[test]
fn double_down_draws_one_card_and_stands() {
    let mut game = deal_head_to_head(&[
        card(Suit::Hearts, 5),   // human
        card(Suit::Spades, 10),  // ai
        card(Suit::Diamonds, 9), // house up
        card(Suit::Hearts, 4),   // human -> 9
        card(Suit::Spades, 8),   // ai -> 18
        card(Suit::Clubs, 9),    // house hole -> 18
        card(Suit::Clubs, 10),   // double draw -> 19
    ]);

    let drawn = game.double_down().expect("double is legal on two cards");
    assert_eq!(drawn.rank, 10);
    assert_eq!(game.human().hand.len(), 3);
    assert_eq!(game.human().status, SeatStatus::Stood);
    assert_eq!(game.phase, RoundPhase::AiTurns);

    run_ai_and_house(&mut game);
    assert_eq!(outcome_of(&game, 0), Outcome::Win);
}

#[test]
fn double_down_is_rejected_after_a_hit() {
    let mut game = deal_head_to_head(&[
        card(Suit::Hearts, 5),   // human
        card(Suit::Spades, 10),  // ai
        card(Suit::Diamonds, 9), // house up
        card(Suit::Hearts, 4),   // human
        card(Suit::Spades, 8),   // ai
        card(Suit::Clubs, 9),    // house hole
        card(Suit::Clubs, 2),    // human hit -> 11
    ]);

    game.hit().expect("deck has a card");
    assert_eq!(
        game.double_down().unwrap_err(),
        ActionError::CannotDouble
    );

    // Rejected as a no-op: still the human's turn, hand unchanged.
    assert_eq!(game.phase, RoundPhase::HumanTurn);
    assert_eq!(game.human().hand.len(), 3);
}

#[test]
fn actions_outside_the_human_turn_are_rejected() {
    let mut game = deal_head_to_head(&[
        card(Suit::Hearts, 10),
        card(Suit::Spades, 10),
        card(Suit::Diamonds, 9),
        card(Suit::Hearts, 9),
        card(Suit::Spades, 8),
        card(Suit::Clubs, 9),
    ]);

    assert_eq!(game.deal().unwrap_err(), DealError::InvalidState);
    assert_eq!(game.play_house().unwrap_err(), TurnError::InvalidState);
    assert_eq!(game.advance_round().unwrap_err(), MatchError::RoundInProgress);

    game.stand().expect("human stands");
    let hand_before = game.human().hand.clone();

    assert_eq!(game.hit().unwrap_err(), ActionError::InvalidState);
    assert_eq!(game.stand().unwrap_err(), ActionError::InvalidState);
    assert_eq!(game.double_down().unwrap_err(), ActionError::InvalidState);
    assert_eq!(game.human().hand, hand_before);
}

#[test]
fn human_natural_short_circuits_the_deal() {
    let game = deal_head_to_head(&[
        card(Suit::Hearts, 1),   // human ace
        card(Suit::Hearts, 9),   // ai
        card(Suit::Diamonds, 10), // house up
        card(Suit::Spades, 13),  // human king -> natural
        card(Suit::Spades, 9),   // ai -> 18
        card(Suit::Diamonds, 9), // house hole -> 19
    ]);

    assert_eq!(game.phase, RoundPhase::Resolved);
    assert_eq!(outcome_of(&game, 0), Outcome::Win);
    assert_eq!(outcome_of(&game, 1), Outcome::Lose);
    assert_eq!(game.human().rounds_won, 1);
}

#[test]
fn house_natural_short_circuits_the_deal() {
    let game = deal_head_to_head(&[
        card(Suit::Hearts, 10),  // human
        card(Suit::Hearts, 8),   // ai
        card(Suit::Diamonds, 1), // house ace
        card(Suit::Spades, 9),   // human -> 19
        card(Suit::Clubs, 9),    // ai -> 17
        card(Suit::Diamonds, 13), // house king -> natural
    ]);

    assert_eq!(game.phase, RoundPhase::Resolved);
    assert_eq!(outcome_of(&game, 0), Outcome::Lose);
    assert_eq!(outcome_of(&game, 1), Outcome::Lose);
}

#[test]
fn matching_naturals_push() {
    let game = deal_head_to_head(&[
        card(Suit::Hearts, 1),    // human ace
        card(Suit::Hearts, 9),    // ai
        card(Suit::Diamonds, 1),  // house ace
        card(Suit::Spades, 13),   // human -> natural
        card(Suit::Spades, 9),    // ai -> 18
        card(Suit::Diamonds, 12), // house -> natural
    ]);

    assert_eq!(game.phase, RoundPhase::Resolved);
    assert_eq!(outcome_of(&game, 0), Outcome::Push);
    assert_eq!(game.human().rounds_won, 0);
}

#[test]
fn a_natural_beats_a_drawn_out_twenty_one() {
    let mut game = deal_head_to_head(&[
        card(Suit::Hearts, 10),  // human
        card(Suit::Spades, 1),   // ai ace
        card(Suit::Diamonds, 10), // house up
        card(Suit::Hearts, 9),   // human -> 19
        card(Suit::Spades, 13),  // ai -> natural 21
        card(Suit::Diamonds, 6), // house hole -> 16
        card(Suit::Clubs, 5),    // house draw -> 21
    ]);

    game.stand().expect("human stands");
    run_ai_and_house(&mut game);

    // The AI's two-card 21 outranks the house's three-card 21.
    assert_eq!(outcome_of(&game, 1), Outcome::Win);
    assert_eq!(outcome_of(&game, 0), Outcome::Lose);
    assert_eq!(game.participants[1].rounds_won, 1);
}

#[test]
fn free_for_all_best_score_wins() {
    let mut game = Match::new(Mode::FreeForAll, 9);
    game.deck = stacked_deck(&[
        card(Suit::Hearts, 10),   // human
        card(Suit::Spades, 10),   // ai 1
        card(Suit::Diamonds, 10), // ai 2
        card(Suit::Clubs, 10),    // ai 3
        card(Suit::Hearts, 9),    // ai 4
        card(Suit::Hearts, 12),   // human -> 20
        card(Suit::Spades, 9),    // ai 1 -> 19
        card(Suit::Diamonds, 8),  // ai 2 -> 18
        card(Suit::Clubs, 6),     // ai 3 -> 16, must hit
        card(Suit::Hearts, 8),    // ai 4 -> 17
        card(Suit::Diamonds, 13), // ai 3 hit -> 26, bust
    ]);
    game.deal().expect("stacked deal");

    game.stand().expect("human stands");
    run_ai_and_house(&mut game);

    assert_eq!(game.phase, RoundPhase::Resolved);
    assert_eq!(outcome_of(&game, 0), Outcome::Win);
    assert_eq!(outcome_of(&game, 1), Outcome::Lose);
    assert_eq!(outcome_of(&game, 2), Outcome::Lose);
    assert_eq!(outcome_of(&game, 3), Outcome::Bust);
    assert_eq!(outcome_of(&game, 4), Outcome::Lose);
    assert_eq!(game.human().rounds_won, 1);
}

#[test]
fn free_for_all_tied_best_scores_all_win() {
    let mut game = Match::new(Mode::FreeForAll, 9);
    game.deck = stacked_deck(&[
        card(Suit::Hearts, 10),   // human
        card(Suit::Spades, 11),   // ai 1
        card(Suit::Diamonds, 9),  // ai 2
        card(Suit::Clubs, 9),     // ai 3
        card(Suit::Hearts, 9),    // ai 4
        card(Suit::Hearts, 13),   // human -> 20
        card(Suit::Spades, 12),   // ai 1 -> 20
        card(Suit::Diamonds, 8),  // ai 2 -> 17
        card(Suit::Clubs, 8),     // ai 3 -> 17
        card(Suit::Hearts, 8),    // ai 4 -> 17
    ]);
    game.deal().expect("stacked deal");

    game.stand().expect("human stands");
    run_ai_and_house(&mut game);

    assert_eq!(outcome_of(&game, 0), Outcome::Win);
    assert_eq!(outcome_of(&game, 1), Outcome::Win);
    assert_eq!(outcome_of(&game, 2), Outcome::Lose);
    assert_eq!(game.human().rounds_won, 1);
    assert_eq!(game.participants[1].rounds_won, 1);
}

#[test]
fn free_for_all_full_table_bust_pushes_everyone() {
    let mut game = Match::new(Mode::FreeForAll, 9);
    game.deck = stacked_deck(&[
        card(Suit::Hearts, 10),   // human
        card(Suit::Spades, 10),   // ai 1
        card(Suit::Diamonds, 10), // ai 2
        card(Suit::Clubs, 10),    // ai 3
        card(Suit::Hearts, 11),   // ai 4
        card(Suit::Hearts, 6),    // human -> 16
        card(Suit::Spades, 6),    // ai 1 -> 16
        card(Suit::Diamonds, 6),  // ai 2 -> 16
        card(Suit::Clubs, 6),     // ai 3 -> 16
        card(Suit::Spades, 5),    // ai 4 -> 15
        card(Suit::Hearts, 13),   // human hit -> bust
        card(Suit::Spades, 13),   // ai 1 hit -> bust
        card(Suit::Diamonds, 13), // ai 2 hit -> bust
        card(Suit::Clubs, 13),    // ai 3 hit -> bust
        card(Suit::Diamonds, 11), // ai 4 hit -> bust
    ]);
    game.deal().expect("stacked deal");

    game.hit().expect("deck has a card");
    assert_eq!(game.human().status, SeatStatus::Busted);
    run_ai_and_house(&mut game);

    for id in 0..5 {
        assert_eq!(outcome_of(&game, id), Outcome::Push);
    }
    assert!(game.participants.iter().all(|p| p.rounds_won == 0));
}

#[test]
fn deck_exhaustion_abandons_the_round_for_a_redeal() {
    let mut game = deal_head_to_head(&[
        card(Suit::Hearts, 10),
        card(Suit::Spades, 10),
        card(Suit::Diamonds, 9),
        card(Suit::Hearts, 6),
        card(Suit::Spades, 9),
        card(Suit::Clubs, 9),
    ]);

    // The stacked deck is spent; the hit fails and the round is abandoned.
    assert_eq!(game.hit().unwrap_err(), ActionError::DeckExhausted);
    assert_eq!(game.phase, RoundPhase::Dealing);
    assert!(game.round_history.is_empty());
    assert_eq!(game.round, 1);
    assert!(game.participants.iter().all(|p| p.hand.is_empty()));

    // The same round can be redealt.
    game.deck = stacked_deck(&[
        card(Suit::Hearts, 10),
        card(Suit::Spades, 10),
        card(Suit::Diamonds, 9),
        card(Suit::Hearts, 9),
        card(Suit::Spades, 8),
        card(Suit::Clubs, 9),
    ]);
    game.deal().expect("redeal succeeds");
    assert_eq!(game.phase, RoundPhase::HumanTurn);
}

#[test]
fn deck_exhaustion_during_ai_turns_abandons_the_round() {
    let mut game = deal_head_to_head(&[
        card(Suit::Hearts, 10),
        card(Suit::Spades, 9),
        card(Suit::Diamonds, 9),
        card(Suit::Hearts, 9),
        card(Suit::Spades, 7), // ai -> 16, must hit an empty deck
        card(Suit::Clubs, 9),
    ]);

    game.stand().expect("human stands");
    assert_eq!(game.play_ai_seat().unwrap_err(), TurnError::DeckExhausted);
    assert_eq!(game.phase, RoundPhase::Dealing);
    assert!(game.round_history.is_empty());
}

#[test]
fn head_to_head_match_ranks_by_rounds_won() {
    let win_round = [
        card(Suit::Hearts, 10),  // human
        card(Suit::Hearts, 9),   // ai
        card(Suit::Diamonds, 10), // house up
        card(Suit::Spades, 10),  // human -> 20
        card(Suit::Hearts, 8),   // ai -> 17
        card(Suit::Diamonds, 9), // house -> 19
    ];
    let lose_round = [
        card(Suit::Hearts, 10),   // human
        card(Suit::Hearts, 9),    // ai
        card(Suit::Diamonds, 10), // house up
        card(Suit::Spades, 9),    // human -> 19
        card(Suit::Hearts, 8),    // ai -> 17
        card(Suit::Clubs, 10),    // house -> 20
    ];

    let mut game = Match::new(Mode::HeadToHead, 21);
    for round in 0..5 {
        if round > 0 {
            game.advance_round().expect("round resolved");
        }
        let draws = if round < 3 { &win_round } else { &lose_round };
        game.deck = stacked_deck(draws);
        game.deal().expect("stacked deal");
        game.stand().expect("human stands");
        run_ai_and_house(&mut game);
        assert_eq!(game.phase, RoundPhase::Resolved);
    }

    assert!(game.is_over());
    assert_eq!(game.advance_round().unwrap_err(), MatchError::MatchOver);

    let result = game.final_result().expect("match finished");
    assert!(!result.drawn);
    assert_eq!(result.ranking[0].participant_id, 0);
    assert_eq!(result.ranking[0].position, 1);
    assert_eq!(result.ranking[0].rounds_won, 3);
    assert_eq!(result.ranking[1].position, 2);
}

#[test]
fn head_to_head_tie_is_a_draw() {
    // Human and house push every round; the AI loses every round.
    let push_round = [
        card(Suit::Hearts, 10),   // human
        card(Suit::Hearts, 9),    // ai
        card(Suit::Diamonds, 10), // house up
        card(Suit::Spades, 10),   // human -> 20
        card(Suit::Hearts, 8),    // ai -> 17
        card(Suit::Clubs, 10),    // house -> 20
    ];

    let mut game = Match::new(Mode::HeadToHead, 22);
    for round in 0..5 {
        if round > 0 {
            game.advance_round().expect("round resolved");
        }
        game.deck = stacked_deck(&push_round);
        game.deal().expect("stacked deal");
        game.stand().expect("human stands");
        run_ai_and_house(&mut game);
        assert_eq!(outcome_of(&game, 0), Outcome::Push);
    }

    let result = game.final_result().expect("match finished");
    assert!(result.drawn);
    assert_eq!(result.ranking[0].position, 1);
    assert_eq!(result.ranking[1].position, 1);
}

#[test]
fn team_match_sums_member_tallies() {
    // Human wins every round; everyone else loses to the house.
    let round = [
        card(Suit::Hearts, 10),  // human
        card(Suit::Hearts, 9),   // teammate
        card(Suit::Diamonds, 9), // rival 1
        card(Suit::Clubs, 9),    // rival 2
        card(Suit::Diamonds, 11), // house up
        card(Suit::Spades, 10),  // human -> 20
        card(Suit::Hearts, 8),   // teammate -> 17
        card(Suit::Diamonds, 8), // rival 1 -> 17
        card(Suit::Clubs, 8),    // rival 2 -> 17
        card(Suit::Spades, 8),   // house -> 18
    ];

    let mut game = Match::new(Mode::Team, 23);
    for index in 0..5 {
        if index > 0 {
            game.advance_round().expect("round resolved");
        }
        game.deck = stacked_deck(&round);
        game.deal().expect("stacked deal");
        game.stand().expect("human stands");
        run_ai_and_house(&mut game);
    }

    let result = game.final_result().expect("match finished");
    assert!(!result.drawn);
    assert_eq!(result.ranking.len(), 4);

    // Team one (human + teammate) outscored team two 5 to 0.
    assert_eq!(result.ranking[0].participant_id, 0);
    assert_eq!(result.ranking[0].position, 1);
    assert_eq!(result.ranking[1].participant_id, 1);
    assert_eq!(result.ranking[1].position, 1);
    assert_eq!(result.ranking[2].position, 2);
    assert_eq!(result.ranking[3].position, 2);
}

#[test]
fn session_plays_a_full_match_and_persists() {
    let mut session = Session::new(MemoryStore::new(), 11);
    assert_eq!(session.rating(), 1000);

    session.select_mode(Mode::HeadToHead).expect("no match yet");
    assert_eq!(
        session.select_mode(Mode::HeadToHead).unwrap_err(),
        MatchError::MatchInProgress
    );

    loop {
        let snapshot = session.snapshot();
        let game = snapshot.game.expect("match in progress");
        if game.result.is_some() {
            break;
        }
        match game.phase {
            RoundPhase::HumanTurn => {
                session.stand().expect("stand is legal");
            }
            RoundPhase::Resolved => {
                session.advance_round().expect("round resolved");
            }
            phase => panic!("session left the match in {phase:?}"),
        }
    }

    let snapshot = session.snapshot();
    assert!(snapshot.warning.is_none());
    assert_eq!(snapshot.stats.games_played, 1);
    assert_eq!(snapshot.stats.per_mode.head_to_head.games_played, 1);
    assert!([975, 1000, 1025].contains(&snapshot.rating));

    let saved = session.store().saved().expect("profile saved after match");
    assert_eq!(saved, session.profile());
}

#[test]
fn session_abandon_commits_nothing() {
    let mut session = Session::new(MemoryStore::new(), 12);
    session.select_mode(Mode::FreeForAll).expect("no match yet");

    let snapshot = session.snapshot();
    let game = snapshot.game.expect("match in progress");

    if game.phase == RoundPhase::HumanTurn {
        // Mid-round abandonment is rejected; finish the round first.
        assert_eq!(
            session.abandon_match().unwrap_err(),
            MatchError::RoundInProgress
        );
        session.stand().expect("stand is legal");
    }

    let snapshot = session.abandon_match().expect("between rounds");
    assert!(snapshot.game.is_none());
    assert_eq!(snapshot.stats.games_played, 0);
    assert_eq!(snapshot.rating, 1000);
    assert!(session.store().saved().is_none());
}

/// A store whose medium is down; play must continue regardless.
struct FailingStore;

impl ProfileStore for FailingStore {
    fn load(&mut self) -> Result<Option<Profile>, StoreError> {
        Err(StoreError::Io(io::Error::other("store offline")))
    }

    fn save(&mut self, _profile: &Profile) -> Result<(), StoreError> {
        Err(StoreError::Io(io::Error::other("store offline")))
    }
}

#[test]
fn store_failures_warn_but_never_block() {
    let mut session = Session::new(FailingStore, 13);

    let snapshot = session.snapshot();
    assert_eq!(session.rating(), 1000);
    assert!(
        snapshot
            .warning
            .as_deref()
            .is_some_and(|w| w.contains("load failed"))
    );

    session.select_mode(Mode::HeadToHead).expect("no match yet");
    loop {
        let snapshot = session.snapshot();
        let game = snapshot.game.expect("match in progress");
        if game.result.is_some() {
            break;
        }
        match game.phase {
            RoundPhase::HumanTurn => {
                session.stand().expect("stand is legal");
            }
            RoundPhase::Resolved => {
                session.advance_round().expect("round resolved");
            }
            phase => panic!("session left the match in {phase:?}"),
        }
    }

    let snapshot = session.snapshot();
    assert_eq!(snapshot.stats.games_played, 1);
    assert!(
        snapshot
            .warning
            .as_deref()
            .is_some_and(|w| w.contains("save failed"))
    );
}

//! CLI ranked-match example.

#![allow(clippy::missing_docs_in_private_items)]

use std::io::{self, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use rankjack::{
    Card, GameView, JsonFileStore, Mode, Outcome, RoundPhase, SeatKind, SeatStatus, SeatView,
    Session, Snapshot, Suit,
};

fn main() {
    println!("Ranked blackjack CLI example (type 'q' to quit)");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let store = JsonFileStore::new("rankjack_profile.json");
    let mut session = Session::new(store, seed);

    loop {
        print_menu(&session.snapshot());

        let mode = match prompt_line("Mode [1] 1v1  [2] 2v2  [3] ffa  (q to quit): ").as_str() {
            "1" | "1v1" => Mode::HeadToHead,
            "2" | "2v2" => Mode::Team,
            "3" | "ffa" => Mode::FreeForAll,
            "q" | "quit" => {
                println!("Goodbye.");
                return;
            }
            _ => {
                println!("Unknown mode.");
                continue;
            }
        };

        println!(
            "Searching for a {} match (estimated wait {}s)...",
            mode.label(),
            session.queue_wait().as_secs()
        );

        let snapshot = match session.select_mode(mode) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                println!("Match error: {err}");
                continue;
            }
        };

        if !play_match(&mut session, snapshot) {
            return;
        }
    }
}

/// Plays one match to completion. Returns `false` when the user quits.
fn play_match(session: &mut Session<JsonFileStore>, mut snapshot: Snapshot) -> bool {
    loop {
        if let Some(warning) = &snapshot.warning {
            println!("Warning: {warning}");
        }

        let Some(game) = &snapshot.game else {
            return true;
        };

        match game.phase {
            RoundPhase::HumanTurn => {
                print_table(game);
                let result = match prompt_line("Action [h]it [s]tand [d]ouble (q to quit): ")
                    .as_str()
                {
                    "h" | "hit" => session.hit(),
                    "s" | "stand" => session.stand(),
                    "d" | "double" => session.double_down(),
                    "q" | "quit" => return false,
                    _ => {
                        println!("Unknown action.");
                        continue;
                    }
                };

                match result {
                    Ok(next) => snapshot = next,
                    Err(err) => {
                        println!("Action error: {err}");
                        snapshot = session.snapshot();
                    }
                }
            }
            RoundPhase::Resolved => {
                print_table(game);
                print_outcomes(game);

                if game.result.is_some() {
                    print_final(&snapshot, game);
                    match session.abandon_match() {
                        Ok(next) => snapshot = next,
                        Err(err) => {
                            println!("Match error: {err}");
                            return true;
                        }
                    }
                    return true;
                }

                prompt_line("Press enter for the next round...");
                match session.advance_round() {
                    Ok(next) => snapshot = next,
                    Err(err) => {
                        println!("Match error: {err}");
                        return true;
                    }
                }
            }
            RoundPhase::Dealing => {
                // Only reachable after a mid-round deck exhaustion.
                println!("Round abandoned; redealing.");
                match session.redeal() {
                    Ok(next) => snapshot = next,
                    Err(err) => {
                        println!("Match error: {err}");
                        return true;
                    }
                }
            }
            RoundPhase::AiTurns | RoundPhase::HouseTurn => {
                // The session resolves these synchronously; nothing to do.
                snapshot = session.snapshot();
            }
        }
    }
}

fn print_menu(snapshot: &Snapshot) {
    let stats = &snapshot.stats;
    println!("\nRating: {}", snapshot.rating);
    println!(
        "Matches: {} played, {} won ({:.0}%), best streak {}",
        stats.games_played,
        stats.games_won,
        stats.win_rate() * 100.0,
        stats.best_streak
    );
}

fn print_table(game: &GameView) {
    println!(
        "\n--- Round {}/{} ({}) ---",
        game.round,
        game.max_rounds,
        game.mode.label()
    );

    for seat in &game.seats {
        let hide_hole = seat.kind == SeatKind::House
            && matches!(game.phase, RoundPhase::HumanTurn | RoundPhase::AiTurns);
        println!("{}", format_seat(seat, hide_hole));
    }
    println!();
}

fn format_seat(seat: &SeatView, hide_hole: bool) -> String {
    let cards = if hide_hole {
        let mut parts: Vec<String> = seat.cards.iter().take(1).map(format_card).collect();
        if seat.cards.len() > 1 {
            parts.push("??".to_owned());
        }
        parts.join(" ")
    } else {
        seat.cards
            .iter()
            .map(format_card)
            .collect::<Vec<_>>()
            .join(" ")
    };

    let score = if hide_hole {
        "?".to_owned()
    } else {
        seat.score.to_string()
    };

    let status = match seat.status {
        SeatStatus::Active => "",
        SeatStatus::Stood => " (stood)",
        SeatStatus::Busted => " (busted)",
    };

    let team = seat
        .team
        .map(|team| format!(" [team {team}]"))
        .unwrap_or_default();

    format!(
        "{:>10}{}: {} | value {} | rounds won {}{}",
        seat.name, team, cards, score, seat.rounds_won, status
    )
}

fn print_outcomes(game: &GameView) {
    let Some(outcomes) = &game.last_outcomes else {
        return;
    };

    for outcome in outcomes {
        let seat = game.seats.iter().find(|s| s.id == outcome.participant_id);
        let name = seat.map_or("?", |s| s.name.as_str());
        let label = match outcome.outcome {
            Outcome::Win => colorize("wins", "32"),
            Outcome::Lose => colorize("loses", "31"),
            Outcome::Push => "pushes".to_owned(),
            Outcome::Bust => colorize("busts", "31"),
        };
        println!("{} {} with {}", name, label, outcome.final_score);
    }
}

fn print_final(snapshot: &Snapshot, game: &GameView) {
    let Some(result) = &game.result else {
        return;
    };

    println!("\n=== Match over ===");
    if result.drawn {
        println!("The match is a draw.");
    }
    for standing in &result.ranking {
        let seat = game.seats.iter().find(|s| s.id == standing.participant_id);
        let name = seat.map_or("?", |s| s.name.as_str());
        println!(
            "#{} {} ({} rounds won)",
            standing.position, name, standing.rounds_won
        );
    }
    println!("Your rating is now {}.", snapshot.rating);
}

fn prompt_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return String::new();
    }
    input.trim().to_lowercase()
}

fn colorize(text: &str, code: &str) -> String {
    format!("\u{1b}[{code}m{text}\u{1b}[0m")
}

fn format_card(card: &Card) -> String {
    let (suit, color_code) = match card.suit {
        Suit::Hearts => ("H", "31"),
        Suit::Diamonds => ("D", "31"),
        Suit::Clubs => ("C", "32"),
        Suit::Spades => ("S", "34"),
    };

    let rank = match card.rank {
        1 => "A".to_string(),
        11 => "J".to_string(),
        12 => "Q".to_string(),
        13 => "K".to_string(),
        _ => card.rank.to_string(),
    };

    format!("{rank}{}", colorize(suit, color_code))
}

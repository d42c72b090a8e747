//! Interactive play loop: prompts, dice display, and turn driving.
//!
//! All rules live in naasii-core; this module only translates between the
//! terminal and the turn state machine. Malformed input is filtered, never
//! fatal: a bad keep-selection simply keeps nothing.

use std::io::{self, Write};
use std::path::PathBuf;

use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;

use naasii_core::{
    analyze_dice, DicePool, GameConfig, GameSession, PoolError, ScoreResult, TurnController,
    TurnError, DICE_COUNT, FACES,
};
use naasii_logging::{
    default_save_name, hash_config_bytes, now_ms, write_save_atomic, GameSaveV1, NdjsonWriter,
    TurnEventV1,
};
use naasii_stats::render_report;

/// Drive a session to completion (or early exit) on the terminal.
pub fn run_game(mut session: GameSession, cfg: &GameConfig, seed: u64) {
    println!("\nStarting game...");
    println!("Rounds: {}  Seed: {seed}", session.max_rounds);

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut turn = TurnController::new(DicePool::with_rolls_per_turn(cfg.rolls_per_turn));

    let config_hash = serde_yaml::to_string(cfg)
        .ok()
        .map(|s| hash_config_bytes(s.as_bytes()));

    let save_dir = PathBuf::from(&cfg.save_dir);
    if let Err(e) = std::fs::create_dir_all(&save_dir) {
        eprintln!("Cannot create {}: {e}", save_dir.display());
    }
    let mut events = match NdjsonWriter::open_append(save_dir.join("events.ndjson")) {
        Ok(w) => Some(w),
        Err(e) => {
            eprintln!("Event log disabled: {e}");
            None
        }
    };

    while !session.is_finished() {
        let round = session.current_round;
        println!();
        println!("{}", "=".repeat(40));
        println!("ROUND {round} of {}", session.max_rounds);
        println!("{}", "=".repeat(40));

        for idx in 0..session.players.len() {
            let name = session.players[idx].name.clone();
            println!();
            println!("{name}'s turn");
            println!("{}", "-".repeat(30));

            let Some(result) = play_turn(&mut turn, &mut rng) else {
                println!("Turn abandoned; no score recorded for {name}.");
                continue;
            };
            announce(&result);

            if let Err(e) = session.record_score(idx, &result) {
                eprintln!("{e}");
                continue;
            }
            let total = session.players[idx].score;
            println!("\n{name}'s total: {total} points");

            if let Some(w) = events.as_mut() {
                let ev = TurnEventV1 {
                    event: "turn_scored",
                    ts_ms: now_ms(),
                    round,
                    player: name.clone(),
                    dice: turn.pool().current_values().to_vec(),
                    category: result.category.as_str().to_string(),
                    score: result.score,
                    total,
                    rolls_taken: turn.pool().rolls_taken(),
                };
                if let Err(e) = w.write_event(&ev) {
                    eprintln!("Event log write failed: {e}");
                }
            }

            print_standings(&session);
        }

        if let Some(w) = events.as_mut() {
            let _ = w.flush();
        }
        session.advance_round();

        if cfg.auto_save {
            let path = save_dir.join(default_save_name(now_ms()));
            match write_save_atomic(&path, &GameSaveV1::snapshot(&session, config_hash.clone())) {
                Ok(()) => println!("\nGame saved to: {}", path.display()),
                Err(e) => eprintln!("Autosave failed: {e}"),
            }
        }

        if !session.is_finished() && !prompt_yes_no("\nContinue to the next round? (y/n): ", true) {
            println!("Ending game early.");
            break;
        }
    }

    final_results(&session, cfg);
}

/// One player's turn. `None` only if the turn could not be scored, which
/// correct sequencing never produces.
fn play_turn(turn: &mut TurnController, rng: &mut ChaCha8Rng) -> Option<ScoreResult> {
    turn.begin_turn();

    println!("First roll...");
    match turn.roll(rng) {
        Ok(values) => show_roll(turn, &values),
        Err(e) => eprintln!("Roll failed: {e}"),
    }

    while turn.can_roll() {
        println!("\nRolls left: {}", turn.pool().rolls_remaining());
        if !prompt_yes_no("Roll again? (y/n): ", false) {
            break;
        }
        select_dice(turn);
        match turn.roll(rng) {
            Ok(values) => show_roll(turn, &values),
            Err(TurnError::Pool(PoolError::NoRollsRemaining)) => break,
            Err(e) => {
                eprintln!("Roll failed: {e}");
                break;
            }
        }
    }

    match turn.score() {
        Ok(result) => Some(result),
        Err(e) => {
            eprintln!("Turn could not be scored: {e}");
            None
        }
    }
}

fn show_roll(turn: &TurnController, values: &[u8]) {
    println!("Dice:");
    println!("{}", format_dice_grid(turn.pool()));
    let analysis = analyze_dice(values);
    if !analysis.suggestions.is_empty() {
        println!("Suggestions:");
        for hint in analysis.suggestions.iter().take(2) {
            println!("  {hint}");
        }
    }
}

/// Two rows of six: position, value, and K for kept dice.
fn format_dice_grid(pool: &DicePool) -> String {
    let cells: Vec<String> = pool
        .dice()
        .iter()
        .enumerate()
        .map(|(i, die)| {
            format!("{:>2}:{}{}", i + 1, die.value, if die.locked { 'K' } else { '-' })
        })
        .collect();
    cells
        .chunks(6)
        .map(|row| row.join("  "))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, PartialEq, Eq)]
pub enum KeepCommand {
    Done,
    KeepAll,
    ReleaseAll,
    Positions(Vec<usize>),
}

pub fn parse_keep_command(line: &str) -> KeepCommand {
    let lowered = line.trim().to_ascii_lowercase();
    match lowered.as_str() {
        "" | "done" => KeepCommand::Done,
        "all" => KeepCommand::KeepAll,
        "none" => KeepCommand::ReleaseAll,
        other => KeepCommand::Positions(parse_positions(other)),
    }
}

/// 1-indexed positions from user input, 0-indexed out. Non-numeric tokens
/// and out-of-range positions are dropped.
pub fn parse_positions(line: &str) -> Vec<usize> {
    line.split_whitespace()
        .filter_map(|tok| tok.parse::<usize>().ok())
        .filter(|&p| (1..=DICE_COUNT).contains(&p))
        .map(|p| p - 1)
        .collect()
}

fn select_dice(turn: &mut TurnController) {
    println!("Select dice to keep: positions 1-12, 'all', 'none', or 'done'.");
    loop {
        let Some(line) = prompt("Selection: ") else {
            return;
        };
        match parse_keep_command(&line) {
            KeepCommand::Done => return,
            KeepCommand::KeepAll => {
                let _ = turn.lock_all();
                println!("All dice kept");
                return;
            }
            KeepCommand::ReleaseAll => {
                let _ = turn.unlock_all();
                println!("All dice released");
            }
            KeepCommand::Positions(indices) if !indices.is_empty() => {
                // A position list replaces the previous selection.
                let _ = turn.unlock_all();
                let _ = turn.lock(&indices);
                let shown: Vec<usize> = indices.iter().map(|i| i + 1).collect();
                println!("Keeping dice: {shown:?}");
                return;
            }
            KeepCommand::Positions(_) => {
                println!("No valid positions; enter numbers 1-12, 'all', 'none', or 'done'.");
            }
        }
    }
}

fn announce(result: &ScoreResult) {
    println!("\nScoring result:");
    println!("  Category: {}", result.category);
    println!("  Score: {} points", result.score);
    println!("  Counts: {}", format_counts(&result.counts));
}

pub fn format_counts(counts: &[u8; FACES]) -> String {
    counts
        .iter()
        .enumerate()
        .filter(|(_, &c)| c > 0)
        .map(|(i, &c)| format!("{}:{}", i + 1, c))
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_standings(session: &GameSession) {
    println!("\nCurrent standings:");
    println!("{}", "-".repeat(40));
    for (i, player) in session.standings().iter().enumerate() {
        println!("{}. {player}", i + 1);
    }
}

fn final_results(session: &GameSession, cfg: &GameConfig) {
    println!();
    println!("{}", "=".repeat(60));
    println!("FINAL RESULTS");
    println!("{}", "=".repeat(60));

    println!("\nFinal standings:");
    for (i, player) in session.standings().iter().enumerate() {
        println!("{}. {player}", i + 1);
    }

    if let Some(winner) = session.leader() {
        println!("\n{}", "*".repeat(40));
        println!("WINNER: {}", winner.name);
        println!("{}", "*".repeat(40));
    }

    println!();
    print!("{}", render_report(&session.players, cfg.charts));
}

pub fn prompt_player_names(cfg: &GameConfig) -> Vec<String> {
    println!("\nPLAYER SETUP");
    println!("{}", "-".repeat(40));

    let count = prompt_number(
        &format!(
            "Enter number of players ({}-{}): ",
            cfg.min_players, cfg.max_players
        ),
        cfg.min_players,
        cfg.max_players,
    );
    let Some(count) = count else {
        // Input closed: fall back to a default two-player table.
        return vec!["Player 1".to_string(), "Player 2".to_string()];
    };

    let mut names: Vec<String> = Vec::new();
    for i in 0..count {
        loop {
            let Some(raw) = prompt(&format!("Enter name for Player {}: ", i + 1)) else {
                names.push(format!("Player {}", i + 1));
                break;
            };
            let name = raw.trim().to_string();
            if name.is_empty() {
                println!("Name cannot be empty");
                continue;
            }
            if names.contains(&name) {
                println!("Name already taken");
                continue;
            }
            names.push(name);
            break;
        }
    }
    names
}

fn prompt(msg: &str) -> Option<String> {
    print!("{msg}");
    let _ = io::stdout().flush();
    let mut line = String::new();
    match io::stdin().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

fn prompt_yes_no(msg: &str, default_on_eof: bool) -> bool {
    match prompt(msg) {
        Some(answer) => matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"),
        None => default_on_eof,
    }
}

fn prompt_number(msg: &str, min: u32, max: u32) -> Option<u32> {
    loop {
        let line = prompt(msg)?;
        if line.is_empty() {
            continue;
        }
        match line.parse::<u32>() {
            Ok(v) if (min..=max).contains(&v) => return Some(v),
            _ => println!("Please enter a number between {min} and {max}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_are_one_indexed_and_filtered() {
        assert_eq!(parse_positions("1 5 12"), vec![0, 4, 11]);
        assert_eq!(parse_positions("0 13 x 7"), vec![6]);
        assert_eq!(parse_positions(""), Vec::<usize>::new());
        // Duplicates are harmless: locking is idempotent.
        assert_eq!(parse_positions("3 3"), vec![2, 2]);
    }

    #[test]
    fn keep_commands_parse() {
        assert_eq!(parse_keep_command("all"), KeepCommand::KeepAll);
        assert_eq!(parse_keep_command(" NONE "), KeepCommand::ReleaseAll);
        assert_eq!(parse_keep_command("done"), KeepCommand::Done);
        assert_eq!(parse_keep_command(""), KeepCommand::Done);
        assert_eq!(parse_keep_command("2 4"), KeepCommand::Positions(vec![1, 3]));
        assert_eq!(
            parse_keep_command("garbage"),
            KeepCommand::Positions(Vec::new())
        );
    }

    #[test]
    fn counts_formatting_skips_absent_faces() {
        let counts = [2, 0, 3, 0, 0, 7];
        assert_eq!(format_counts(&counts), "1:2 3:3 6:7");
    }

    #[test]
    fn dice_grid_marks_kept_dice() {
        let mut pool = DicePool::new();
        pool.lock(&[0]);
        let grid = format_dice_grid(&pool);
        assert!(grid.starts_with(" 1:1K"));
        assert!(grid.contains(" 7:1-"));
        assert_eq!(grid.lines().count(), 2);
    }
}

//! naasii: CLI binary for the twelve-dice Naasii game.
//!
//! Subcommands:
//! - play
//! - resume
//! - score
//! - sim
//! - stats

use std::env;
use std::path::PathBuf;
use std::process;

use naasii_core::{calculate_score, DicePool, GameConfig, GameSession, ROUNDS_CAP};
use naasii_stats::{histogram, summarize};

use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;

mod play;

fn print_help() {
    eprintln!(
        r#"naasii - twelve-dice scoring game

USAGE:
    naasii <COMMAND> [OPTIONS]

COMMANDS:
    play        Start an interactive game
    resume      Continue a game from a save file
    score       Score a single hand of 12 dice
    sim         Roll many no-keep turns and print the score distribution
    stats       Print the statistics report for a save file

OPTIONS:
    -h, --help      Print this help message
    -V, --version   Print version

For more information, run `naasii <COMMAND> --help`.
"#
    );
}

fn print_version() {
    println!("naasii {}", env!("CARGO_PKG_VERSION"));
}

fn parse_value<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> T {
    if i + 1 >= args.len() {
        eprintln!("Missing value for {flag}");
        process::exit(1);
    }
    args[i + 1].parse().unwrap_or_else(|_| {
        eprintln!("Invalid {flag} value: {}", args[i + 1]);
        process::exit(1);
    })
}

fn cmd_play(args: &[String]) {
    let mut config_path: Option<String> = None;
    let mut rounds: Option<u32> = None;
    let mut players_arg: Option<String> = None;
    let mut seed: Option<u64> = None;
    let mut save_dir: Option<String> = None;
    let mut no_autosave = false;
    let mut no_charts = false;

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!(
                    r#"naasii play

USAGE:
    naasii play [--config cfg.yaml] [--rounds N] [--players a,b,..] [--seed S]
                [--save-dir DIR] [--no-autosave] [--no-charts]

OPTIONS:
    --config PATH    Load game settings from a YAML file
    --rounds N       Number of rounds (clamped to the configured bounds)
    --players LIST   Comma-separated player names (2-4); prompted if absent
    --seed S         Dice RNG seed (default: current time)
    --save-dir DIR   Directory for save files and the event log
    --no-autosave    Do not save after each round
    --no-charts      Skip charts in the final report
"#
                );
                return;
            }
            "--config" => {
                config_path = Some(parse_value::<String>(args, i, "--config"));
                i += 2;
            }
            "--rounds" => {
                rounds = Some(parse_value::<u32>(args, i, "--rounds"));
                i += 2;
            }
            "--players" => {
                players_arg = Some(parse_value::<String>(args, i, "--players"));
                i += 2;
            }
            "--seed" => {
                seed = Some(parse_value::<u64>(args, i, "--seed"));
                i += 2;
            }
            "--save-dir" => {
                save_dir = Some(parse_value::<String>(args, i, "--save-dir"));
                i += 2;
            }
            "--no-autosave" => {
                no_autosave = true;
                i += 1;
            }
            "--no-charts" => {
                no_charts = true;
                i += 1;
            }
            other => {
                eprintln!("Unknown option for `naasii play`: {other}");
                eprintln!("Run `naasii play --help` for usage.");
                process::exit(1);
            }
        }
    }

    let mut cfg = match &config_path {
        Some(path) => GameConfig::load(path).unwrap_or_else(|e| {
            eprintln!("Failed to load {path}: {e}");
            process::exit(1);
        }),
        None => GameConfig::default(),
    };
    if let Some(r) = rounds {
        cfg.max_rounds = r.clamp(cfg.min_rounds, ROUNDS_CAP);
    }
    if let Some(dir) = save_dir {
        cfg.save_dir = dir;
    }
    if no_autosave {
        cfg.auto_save = false;
    }
    if no_charts {
        cfg.charts = false;
    }
    if let Err(e) = cfg.validate() {
        eprintln!("Invalid config: {e}");
        process::exit(1);
    }

    let names = match players_arg {
        Some(list) => list
            .split(',')
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect::<Vec<_>>(),
        None => play::prompt_player_names(&cfg),
    };

    let session = GameSession::new(&names, &cfg).unwrap_or_else(|e| {
        eprintln!("Cannot start game: {e}");
        process::exit(1);
    });

    let seed = seed.unwrap_or_else(naasii_logging::now_ms);
    play::run_game(session, &cfg, seed);
}

fn cmd_resume(args: &[String]) {
    let mut file: Option<String> = None;
    let mut config_path: Option<String> = None;
    let mut seed: Option<u64> = None;
    let mut save_dir: Option<String> = None;
    let mut no_autosave = false;
    let mut no_charts = false;

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!(
                    r#"naasii resume

USAGE:
    naasii resume <save.json> [--config cfg.yaml] [--seed S] [--save-dir DIR]
                  [--no-autosave] [--no-charts]
"#
                );
                return;
            }
            "--config" => {
                config_path = Some(parse_value::<String>(args, i, "--config"));
                i += 2;
            }
            "--seed" => {
                seed = Some(parse_value::<u64>(args, i, "--seed"));
                i += 2;
            }
            "--save-dir" => {
                save_dir = Some(parse_value::<String>(args, i, "--save-dir"));
                i += 2;
            }
            "--no-autosave" => {
                no_autosave = true;
                i += 1;
            }
            "--no-charts" => {
                no_charts = true;
                i += 1;
            }
            other if file.is_none() && !other.starts_with('-') => {
                file = Some(other.to_string());
                i += 1;
            }
            other => {
                eprintln!("Unknown option for `naasii resume`: {other}");
                process::exit(1);
            }
        }
    }

    let Some(file) = file else {
        eprintln!("Usage: naasii resume <save.json> [OPTIONS]");
        process::exit(1);
    };

    let save = naasii_logging::read_save(&file).unwrap_or_else(|e| {
        eprintln!("Failed to load {file}: {e}");
        process::exit(1);
    });

    let mut cfg = match &config_path {
        Some(path) => GameConfig::load(path).unwrap_or_else(|e| {
            eprintln!("Failed to load {path}: {e}");
            process::exit(1);
        }),
        None => GameConfig::default(),
    };
    if let Some(dir) = save_dir {
        cfg.save_dir = dir;
    }
    if no_autosave {
        cfg.auto_save = false;
    }
    if no_charts {
        cfg.charts = false;
    }

    println!(
        "Loaded {file}: round {} of {}, {} player(s)",
        save.current_round,
        save.max_rounds,
        save.players.len()
    );
    let session = save.restore();
    let seed = seed.unwrap_or_else(naasii_logging::now_ms);
    play::run_game(session, &cfg, seed);
}

fn cmd_score(args: &[String]) {
    if args.first().map(|a| a.as_str()) == Some("--help") || args.first().map(|a| a.as_str()) == Some("-h") {
        println!(
            r#"naasii score

USAGE:
    naasii score <v1> <v2> ... <v12>

Scores a hand of twelve die values (1-6 each) and prints the category,
point value, and per-face counts.
"#
        );
        return;
    }

    let mut dice: Vec<u8> = Vec::with_capacity(args.len());
    for arg in args {
        match arg.parse::<u8>() {
            Ok(v) => dice.push(v),
            Err(_) => {
                eprintln!("Invalid die value: {arg}");
                process::exit(1);
            }
        }
    }

    match calculate_score(&dice) {
        Ok(result) => {
            println!("Dice: {dice:?}");
            println!("Category: {}", result.category);
            println!("Score: {} points", result.score);
            println!("Counts: {}", play::format_counts(&result.counts));
        }
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    }
}

fn cmd_sim(args: &[String]) {
    let mut turns: usize = 10_000;
    let mut seed: u64 = 0;
    let mut rolls: u8 = 1;
    let mut no_hist = false;

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!(
                    r#"naasii sim

USAGE:
    naasii sim [--turns N] [--seed S] [--rolls K] [--no-hist]

OPTIONS:
    --turns N    Number of turns to simulate (default: 10000)
    --seed S     RNG seed (default: 0)
    --rolls K    Rolls per turn, nothing kept in between (default: 1, max 3)
    --no-hist    Skip printing the histogram
"#
                );
                return;
            }
            "--turns" => {
                turns = parse_value(args, i, "--turns");
                i += 2;
            }
            "--seed" => {
                seed = parse_value(args, i, "--seed");
                i += 2;
            }
            "--rolls" => {
                rolls = parse_value(args, i, "--rolls");
                i += 2;
            }
            "--no-hist" => {
                no_hist = true;
                i += 1;
            }
            other => {
                eprintln!("Unknown option for `naasii sim`: {other}");
                eprintln!("Run `naasii sim --help` for usage.");
                process::exit(1);
            }
        }
    }

    if turns == 0 {
        eprintln!("--turns must be >= 1");
        process::exit(1);
    }
    if !(1..=3).contains(&rolls) {
        eprintln!("--rolls must be in 1..=3");
        process::exit(1);
    }

    println!("Simulating {turns} turns (seed {seed}, {rolls} roll(s) per turn, no keeps)...");

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut pool = DicePool::new();
    let mut scores: Vec<u32> = Vec::with_capacity(turns);
    let mut freq: Vec<(&'static str, usize)> = Vec::new();

    for _ in 0..turns {
        pool.reset_turn();
        let mut values = [0u8; naasii_core::DICE_COUNT];
        for _ in 0..rolls {
            values = pool.roll_all(&mut rng).unwrap_or_else(|e| {
                eprintln!("Roll failed: {e}");
                process::exit(1);
            });
        }
        let result = calculate_score(&values).unwrap_or_else(|e| {
            eprintln!("Scoring failed: {e}");
            process::exit(1);
        });
        scores.push(result.score);
        let label = result.category.as_str();
        match freq.iter_mut().find(|e| e.0 == label) {
            Some(entry) => entry.1 += 1,
            None => freq.push((label, 1)),
        }
    }

    println!();
    println!("Evaluation:");
    println!("  - Turns: {turns}");
    if let Some(s) = summarize(&scores) {
        println!(
            "  - Score: mean={:.2}, median={:.1}, std={:.2}, min={}, max={}",
            s.mean, s.median, s.std_dev, s.min, s.max
        );
    }

    freq.sort_by(|a, b| b.1.cmp(&a.1));
    println!("  - Categories:");
    for (cat, count) in &freq {
        println!("      {cat:<22} {count}");
    }

    if !no_hist {
        println!();
        print!("{}", histogram(&scores));
    }
}

fn cmd_stats(args: &[String]) {
    let Some(file) = args.first() else {
        eprintln!("Usage: naasii stats <save.json>");
        process::exit(1);
    };
    if file == "--help" || file == "-h" {
        println!(
            r#"naasii stats

USAGE:
    naasii stats <save.json>

Prints the statistics report (with charts) for a saved game.
"#
        );
        return;
    }

    let save = naasii_logging::read_save(PathBuf::from(file)).unwrap_or_else(|e| {
        eprintln!("Failed to load {file}: {e}");
        process::exit(1);
    });

    println!(
        "Save: round {} of {}, written at {} ms",
        save.current_round, save.max_rounds, save.saved_ts_ms
    );
    println!();
    let session = save.restore();
    print!("{}", naasii_stats::render_report(&session.players, true));
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_help();
        process::exit(0);
    }

    match args[1].as_str() {
        "-h" | "--help" | "help" => {
            print_help();
        }
        "-V" | "--version" => {
            print_version();
        }
        "play" => {
            cmd_play(&args[2..]);
        }
        "resume" => {
            cmd_resume(&args[2..]);
        }
        "score" => {
            cmd_score(&args[2..]);
        }
        "sim" => {
            cmd_sim(&args[2..]);
        }
        "stats" => {
            cmd_stats(&args[2..]);
        }
        cmd => {
            eprintln!("Unknown command: {cmd}");
            eprintln!("Run `naasii --help` for usage.");
            process::exit(1);
        }
    }
}

//! Demo front end: search one position and print the chosen move.
//!
//! Usage: `plum_core [--depth N] [--time SECONDS] [FEN]`. Without a FEN the
//! starting position is searched. Set `RUST_LOG=debug` (or `trace`) for more
//! search output.

use std::process::ExitCode;

use env_logger::Env;
use plum_core::chess_errors::EngineError;
use plum_core::engines::engine::ChessEngine;
use plum_core::search::iterative_deepening::{SearchOptions, MAX_DEPTH};

struct Args {
    depth: usize,
    seconds: f64,
    fen: Option<String>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        depth: MAX_DEPTH,
        seconds: 3.0,
        fen: None,
    };
    let mut fen_fields = Vec::new();
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--depth" | "-d" => {
                let value = iter.next().ok_or("--depth needs a value")?;
                args.depth = value
                    .parse()
                    .map_err(|_| format!("invalid depth: {value}"))?;
            }
            "--time" | "-t" => {
                let value = iter.next().ok_or("--time needs a value")?;
                args.seconds = value
                    .parse()
                    .map_err(|_| format!("invalid time: {value}"))?;
            }
            _ => fen_fields.push(arg),
        }
    }
    if !fen_fields.is_empty() {
        args.fen = Some(fen_fields.join(" "));
    }
    Ok(args)
}

fn run(args: Args) -> Result<(), EngineError> {
    let mut engine = match &args.fen {
        Some(fen) => ChessEngine::from_fen(fen)?,
        None => ChessEngine::new(),
    };

    let result = engine.search_next_move(SearchOptions::new(args.depth, args.seconds))?;
    match result.best_move {
        Some(mv) => println!(
            "bestmove {mv} score {} depth {} nodes {}",
            result.best_score, result.reached_depth, result.stats.nodes
        ),
        None if engine.is_checkmate() => println!("no move: checkmate"),
        None => println!("no move: stalemate"),
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

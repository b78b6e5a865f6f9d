// This file is part of the chessgrid library.
// Copyright (C) 2017-2026 Niklas Fiekas <niklas.fiekas@backscattering.de>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

//! Counts move paths from a position given on the command line.
//!
//! ```text
//! RUST_LOG=info cargo run --release --example perft -- --depth 4 --divide
//! cargo run --release --example perft -- --chess960 518 --depth 5 --threads 8
//! ```

use std::{error::Error, num::NonZeroUsize, time::Instant};

use chessgrid::{chess960, divide, parallel_perft, Position};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "perft")]
#[command(about = "Count legal move paths from a chess or Chess960 position")]
struct Args {
    /// FEN of the root position (default: standard starting position)
    #[arg(short, long, conflicts_with = "chess960")]
    fen: Option<String>,

    /// Use Chess960 starting position number N instead of a FEN
    #[arg(long, value_name = "N")]
    chess960: Option<i64>,

    /// Moves to play from the root position, in UCI notation
    #[arg(short, long, num_args = 1..)]
    moves: Vec<String>,

    /// Search depth
    #[arg(short, long, default_value_t = 4)]
    depth: u32,

    /// Number of worker threads
    #[arg(short, long, default_value = "1")]
    threads: NonZeroUsize,

    /// Print the count of each root move
    #[arg(long)]
    divide: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let root = match (&args.fen, args.chess960) {
        (Some(fen), _) => fen.parse::<Position>()?,
        (None, Some(n)) => chess960::position(n),
        (None, None) => Position::new(),
    };
    let pos = root.play_sequence(&args.moves)?;

    println!("{}", pos.friendly_fen());

    let started = Instant::now();
    let nodes = if args.divide {
        let entries = divide(&pos, args.depth);
        for entry in &entries {
            println!("{:<6} {:<8} {}", entry.m, entry.nice, entry.nodes);
        }
        entries.iter().map(|entry| entry.nodes).sum()
    } else {
        parallel_perft(&pos, args.depth, args.threads)
    };
    let elapsed = started.elapsed();

    println!(
        "Total.......... {} ({:.1} seconds)",
        nodes,
        elapsed.as_secs_f64()
    );

    Ok(())
}

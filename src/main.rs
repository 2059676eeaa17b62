use std::fs;
use std::io::{stderr, stdin, stdout};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use rv32sim::board::Board;
use rv32sim::debug::dump;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Flat binary image, loaded at the reset address
    image: PathBuf,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(stderr)
        .init();

    // Bad invocations exit with status 1.
    let args = Args::try_parse().unwrap_or_else(|err| {
        let _ = err.print();
        process::exit(1);
    });
    let image = fs::read(&args.image).unwrap_or_else(|err| {
        eprintln!("{}: {err}", args.image.display());
        process::exit(1);
    });

    let mut board = Board::new(image, Some(Box::new(stdin())), Some(Box::new(stdout())));
    let status = board.run();
    debug!("final state: {}", dump(board.cpu()));
    process::exit(status as i32);
}

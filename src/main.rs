//! CLI entry point for tsuzuri
//!
//! Plays a compiled screenplay in the terminal, or validates one.

use std::path::PathBuf;
use std::process;

use anyhow::Context;
use tsuzuri::application::{SaveSlots, engine::Engine};
use tsuzuri::cli::{check::CheckReport, play::run_play};
use tsuzuri::config::EngineConfig;
use tsuzuri::infrastructure::{FileKeyValueStore, load_screenplay};
use tsuzuri::runtime::debug::DebugConfig;

#[derive(Debug, Default)]
struct PlayArgs {
    screenplay: PathBuf,
    config: Option<PathBuf>,
    saves: Option<PathBuf>,
    debug: bool,
}

fn parse_play_args(args: &[String]) -> Result<PlayArgs, String> {
    let mut iter = args.iter();
    let screenplay = iter
        .next()
        .ok_or_else(|| "Missing screenplay file path".to_string())?;
    let mut parsed = PlayArgs {
        screenplay: PathBuf::from(screenplay),
        ..PlayArgs::default()
    };

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--debug" => parsed.debug = true,
            "--config" => {
                let path = iter.next().ok_or("--config needs a file")?;
                parsed.config = Some(PathBuf::from(path));
            }
            "--saves" => {
                let path = iter.next().ok_or("--saves needs a directory")?;
                parsed.saves = Some(PathBuf::from(path));
            }
            other => return Err(format!("Unknown option '{other}'")),
        }
    }
    Ok(parsed)
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "play" => match parse_play_args(&args[2..]) {
            Ok(play_args) => play(play_args).await,
            Err(message) => {
                eprintln!("Error: {message}");
                eprintln!();
                print_usage();
                process::exit(1);
            }
        },
        "check" => match args.get(2) {
            Some(path) => check(PathBuf::from(path)).await,
            None => {
                eprintln!("Error: Missing screenplay file path");
                eprintln!();
                print_usage();
                process::exit(1);
            }
        },
        "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        command => {
            eprintln!("Error: Unknown command '{}'", command);
            eprintln!();
            print_usage();
            process::exit(1);
        }
    };

    if let Err(err) = result {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

fn print_usage() {
    println!("tsuzuri - Visual Novel Screenplay Engine");
    println!();
    println!("USAGE:");
    println!("    tsuzuri play <screenplay.json> [--config <file>] [--saves <dir>] [--debug]");
    println!("    tsuzuri check <screenplay.json>");
    println!();
    println!("COMMANDS:");
    println!("    play <file>     Play screenplay in terminal player mode");
    println!("    check <file>    Validate a screenplay and report unresolved strings");
    println!("    --help, -h      Show this help message");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>   Engine configuration (JSON)");
    println!("    --saves <dir>     Directory for save slots");
    println!("    --debug           Show cursor and presentation state, verbose engine logs");
    println!();
    println!("Set RUST_LOG=tsuzuri=debug to see engine logs.");
}

async fn play(args: PlayArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::from_path(path)
            .with_context(|| format!("Failed to load config '{}'", path.display()))?,
        None => EngineConfig::default(),
    };
    if args.debug {
        config.debug = DebugConfig::verbose();
    }

    let engine = Engine::load(&args.screenplay, &config)
        .await
        .with_context(|| format!("Failed to load '{}'", args.screenplay.display()))?;
    let saves = args
        .saves
        .map(|dir| SaveSlots::new(FileKeyValueStore::new(dir), &config.saves));

    run_play(engine, saves, args.debug).await
}

async fn check(path: PathBuf) -> anyhow::Result<()> {
    let screenplay = load_screenplay(&path)
        .await
        .with_context(|| format!("Failed to load '{}'", path.display()))?;
    CheckReport::new(&screenplay).print();
    Ok(())
}

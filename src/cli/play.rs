//! Terminal player mode for running screenplays
//!
//! Lets a screenplay be played through in the terminal, with save slots and
//! voice replay.

use crate::{
    application::{
        SaveSlots,
        api::{ApiError, Directive, NextAction, StepResult},
        engine::Engine,
    },
    cli::view_state::{ViewState, clear_screen, render_delta},
    domain::repositories::KeyValueStore,
    types::dialog::DisplayMode,
};
use std::io::{self, Write};

enum Command {
    Next,
    Choose(usize),
    Save(usize),
    Load(usize),
    List,
    Voice,
    Quit,
    Invalid(&'static str),
}

fn parse_command(input: &str) -> Command {
    let mut parts = input.split_whitespace();
    let head = parts.next().unwrap_or("");
    let slot = parts.next().and_then(|s| s.parse::<usize>().ok());

    match (head, slot) {
        ("", _) => Command::Next,
        ("q", _) => Command::Quit,
        ("v", _) => Command::Voice,
        ("list", _) => Command::List,
        ("s", Some(slot)) => Command::Save(slot),
        ("l", Some(slot)) => Command::Load(slot),
        ("s" | "l", None) => Command::Invalid("Give a slot number, e.g. 's 0'."),
        (number, _) => match number.parse::<usize>() {
            Ok(n) if (1..=9).contains(&n) => Command::Choose(n - 1),
            _ => Command::Invalid("Unknown command."),
        },
    }
}

/// Run the player mode
pub async fn run_play<S: KeyValueStore>(
    mut engine: Engine,
    saves: Option<SaveSlots<S>>,
    debug: bool,
) -> anyhow::Result<()> {
    let mut view_state = ViewState::new();

    println!("=== tsuzuri Screenplay Player ===");
    println!();
    println!("Controls:");
    println!("  Enter:  next");
    println!("  1-9:    select choice");
    println!("  s <n>:  save to slot n");
    println!("  l <n>:  load slot n");
    println!("  list:   list saves");
    println!("  v:      replay voice");
    println!("  q:      quit");
    println!();
    println!("Press Enter to start...");
    get_input("")?;

    let mut result = engine.step()?;
    loop {
        show_step(&mut view_state, &result);
        if debug {
            display_debug_info(&engine);
        }

        if result.next == NextAction::Halt {
            println!();
            println!("== THE END ==");
            return Ok(());
        }

        let prompt = match result.next {
            NextAction::WaitBranch => "Select (1-9):",
            _ => "",
        };

        // Read commands until one advances the screenplay
        result = loop {
            match parse_command(&get_input(prompt)?) {
                Command::Quit => {
                    println!("Goodbye!");
                    return Ok(());
                }
                Command::Next if result.next == NextAction::WaitUser => break engine.step()?,
                Command::Next => println!("Select a choice first."),
                Command::Choose(index) if result.next == NextAction::WaitBranch => {
                    match engine.choose(index) {
                        Ok(next) => {
                            clear_screen();
                            break next;
                        }
                        Err(err) => println!("{err}"),
                    }
                }
                Command::Choose(_) => println!("Press Enter to continue."),
                Command::Voice => match engine.replay_voice() {
                    Some(cue) => println!("[Voice] {}", cue.path),
                    None => println!("[No voice for this line]"),
                },
                Command::Save(slot) => match &saves {
                    Some(saves) => match saves.save(slot, &engine.save_state()).await {
                        Ok(true) => println!("Saved to slot {slot}."),
                        Ok(false) => println!("Save failed."),
                        Err(err) => println!("{err}"),
                    },
                    None => println!("Saving is disabled (use --saves <dir>)."),
                },
                Command::Load(slot) => match &saves {
                    Some(saves) => match load_slot(&mut engine, saves, slot).await {
                        Ok(directives) => {
                            view_state = ViewState::new();
                            render_delta(&view_state.apply(&directives));
                            println!("(loaded slot {slot})");
                            break engine.step()?;
                        }
                        Err(message) => println!("{message}"),
                    },
                    None => println!("Saving is disabled (use --saves <dir>)."),
                },
                Command::List => match &saves {
                    Some(saves) => {
                        for record in saves.list_all().await {
                            println!(
                                "  {:>2}: block {} (saved at {})",
                                record.slot, record.state.current_block_index, record.state.saved_at
                            );
                        }
                    }
                    None => println!("Saving is disabled (use --saves <dir>)."),
                },
                Command::Invalid(message) => println!("{message}"),
            }
        };
    }
}

/// Restore `slot` into `engine`.
///
/// Failures come back as a message for the player; the engine stays where it was.
async fn load_slot<S: KeyValueStore>(
    engine: &mut Engine,
    saves: &SaveSlots<S>,
    slot: usize,
) -> Result<Vec<Directive>, String> {
    match saves.load(slot).await {
        Ok(Some(state)) => engine.restore_state(&state).map_err(|err| match err {
            ApiError::Engine(err) if err.is_structural() => {
                format!("Slot {slot} does not fit this screenplay: {err}")
            }
            err => format!("Cannot load slot {slot}: {err}"),
        }),
        Ok(None) => Err(format!("Slot {slot} is empty.")),
        Err(err) => Err(err.to_string()),
    }
}

fn show_step(view_state: &mut ViewState, result: &StepResult) {
    render_delta(&view_state.apply(&result.directives));

    for directive in &result.directives {
        match directive {
            Directive::Say {
                speaker,
                text,
                mode,
            } => {
                match mode {
                    DisplayMode::Display => println!("{}:", speaker),
                    DisplayMode::Special => println!("【{}】", speaker),
                    DisplayMode::Hidden => {}
                }
                println!("{}", text);
                println!();
            }
            Directive::Branch { choices } => {
                println!("--- Choice ---");
                for (i, choice) in choices.iter().enumerate() {
                    println!("{}. {}", i + 1, choice);
                }
                println!();
            }
            _ => {}
        }
    }
}

/// Display debug information (only when --debug is set)
fn display_debug_info(engine: &Engine) {
    let context = engine.context();
    println!("[debug]");
    if let Ok(block) = context.current_block() {
        println!(
            "block={} (index {}) instruction={}",
            block.id,
            context.current_block_index(),
            context.current_instruction_index()
        );
    }
    let presentation = engine.presentation();
    println!(
        "bg={} portrait={} bgm={}",
        presentation.background.as_deref().unwrap_or("-"),
        presentation.portrait.as_deref().unwrap_or("-"),
        presentation.bgm.as_deref().unwrap_or("-")
    );
    println!();
}

/// Get user input with an optional prompt
fn get_input(prompt: &str) -> io::Result<String> {
    if !prompt.is_empty() {
        print!("{} ", prompt);
        io::stdout().flush()?;
    }

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

//! Terminal vs-tetris runner (default binary).
//!
//! Asks for a game mode on plain stdin, then switches the terminal into
//! raw mode and drives the session until it ends or the player quits.

use std::cell::RefCell;
use std::io::{self, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use vs_tetris::ai::Opponent;
use vs_tetris::core::{run_loop, ActionSource, GameSession};
use vs_tetris::term::{render_frame, HumanInput, TerminalScreen};
use vs_tetris::types::GameMode;

fn main() -> Result<()> {
    let mode = pick_mode()?;

    let mut term = TerminalScreen::new();
    term.enter()?;

    let result = run(&mut term, mode);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Mode menu, shown before the terminal enters raw mode.
fn pick_mode() -> Result<GameMode> {
    let mut input = String::new();
    loop {
        println!("  =*= v s - t e t r i s =*=");
        println!("  1) single player");
        println!("  2) two players, one keyboard");
        println!("  3) against the computer");
        print!("> ");
        io::stdout().flush()?;

        input.clear();
        if io::stdin().read_line(&mut input)? == 0 {
            anyhow::bail!("stdin closed before a mode was chosen");
        }
        match input.trim() {
            "1" => return Ok(GameMode::Singleplayer),
            "2" => return Ok(GameMode::VsPlayer),
            "3" => return Ok(GameMode::VsAi),
            _ => println!("please answer 1, 2 or 3\n"),
        }
    }
}

fn run(term: &mut TerminalScreen, mode: GameMode) -> Result<()> {
    let mut session = GameSession::new(mode, wall_clock_seed());
    // Shared between the action and render closures below.
    let human = RefCell::new(HumanInput::new());
    let mut opponent = Opponent::new();

    run_loop(
        &mut session,
        |s| {
            if s.mode() == GameMode::VsAi && s.current_player() == 1 {
                opponent.next_action(s)
            } else {
                human.borrow_mut().next_action(s)
            }
        },
        |s| -> Result<bool> {
            term.draw(&render_frame(s))?;
            Ok(!human.borrow().quit_requested())
        },
    )?;

    // Hold the final frame until a key is pressed, unless the player
    // already asked to leave.
    if session.is_over() && !human.borrow().quit_requested() {
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    break;
                }
            }
        }
    }
    Ok(())
}

fn wall_clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| (d.as_secs() as u32) ^ d.subsec_nanos())
        .unwrap_or(1)
}

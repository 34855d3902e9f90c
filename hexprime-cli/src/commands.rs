//! Interactive command shell
//!
//! ## Architecture
//!
//! - Level 1: Shell::run() - read lines until quit or end of input
//! - Level 2: Shell::execute() - one line, then the automated reply if due
//! - Level 3: Command::parse() and the per-command handlers
//! - Level 4: output helpers

use std::io::{self, BufRead, Write};

use anyhow::{anyhow, bail, Result};

use hexprime_core::{AutomatedTurn, PlacementOutcome, SessionManager};

// ============================================================================
// COMMANDS (Level 3 - Parsing)
// ============================================================================

const HELP_TEXT: &[&str] = &[
    "* help: print this help message",
    "* history [n]: show the last n moves of the current game, most recent first",
    "* list-games: list every game that is still running",
    "* new-game <name>: start a new game and switch to it",
    "* place <x> <y>: place a token for the current player",
    "* print: show the current game board",
    "* quit: leave every game and exit",
    "* swap: take over the opening stone instead of placing",
    "* switch-game <name>: continue another running game",
];

/// One parsed input line
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Place { x: i64, y: i64 },
    Swap,
    NewGame(String),
    SwitchGame(String),
    History(Option<i64>),
    ListGames,
    Print,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let name = words.next().unwrap_or_default();
        let args: Vec<&str> = words.collect();

        let command = match name {
            "place" => {
                expect_args(name, &args, 2, 2)?;
                let coordinate = |raw: &str| {
                    raw.parse::<i64>()
                        .map_err(|_| anyhow!("the given coordinates are not valid"))
                };
                Command::Place {
                    x: coordinate(args[0])?,
                    y: coordinate(args[1])?,
                }
            }
            "swap" => {
                expect_args(name, &args, 0, 0)?;
                Command::Swap
            }
            "new-game" => {
                expect_args(name, &args, 1, 1)?;
                Command::NewGame(args[0].to_string())
            }
            "switch-game" => {
                expect_args(name, &args, 1, 1)?;
                Command::SwitchGame(args[0].to_string())
            }
            "history" => {
                expect_args(name, &args, 0, 1)?;
                let count = args
                    .first()
                    .map(|raw| {
                        raw.parse::<i64>().map_err(|_| {
                            anyhow!("the given number of movements to show is not valid")
                        })
                    })
                    .transpose()?;
                Command::History(count)
            }
            "list-games" => {
                expect_args(name, &args, 0, 0)?;
                Command::ListGames
            }
            "print" => {
                expect_args(name, &args, 0, 0)?;
                Command::Print
            }
            "help" => {
                expect_args(name, &args, 0, 0)?;
                Command::Help
            }
            "quit" => {
                expect_args(name, &args, 0, 0)?;
                Command::Quit
            }
            _ => bail!("Command '{name}' not found"),
        };
        Ok(command)
    }
}

fn expect_args(name: &str, args: &[&str], min: usize, max: usize) -> Result<()> {
    if args.len() > max {
        bail!("expected {max} arguments but got {}", args.len());
    }
    if args.len() < min {
        bail!("the command {name} needs {min} arguments");
    }
    Ok(())
}

// ============================================================================
// SHELL (Level 1/2 - Orchestration)
// ============================================================================

/// Whether to keep reading input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Drives a match from text commands. Game output goes to `out`, failures to `err`.
pub struct Shell<O: Write, E: Write> {
    manager: SessionManager,
    auto_print: bool,
    out: O,
    err: E,
}

impl<O: Write, E: Write> Shell<O, E> {
    pub fn new(manager: SessionManager, auto_print: bool, out: O, err: E) -> Self {
        Self {
            manager,
            auto_print,
            out,
            err,
        }
    }

    pub fn manager(&self) -> &SessionManager {
        &self.manager
    }

    /// Opening banner: welcome, the board when auto-printing, whose turn it is
    pub fn greet(&mut self) -> Result<()> {
        writeln!(self.out, "Welcome to {}", self.manager.active_game().name())?;
        self.print_board_if_auto()?;
        self.print_turn()
    }

    pub fn run(&mut self, input: impl BufRead) -> Result<()> {
        for line in input.lines() {
            if self.execute(&line?)? == Flow::Quit {
                break;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    /// Run one command line, then the automated player's reply if it is due
    pub fn execute(&mut self, line: &str) -> Result<Flow> {
        let flow = match Command::parse(line).and_then(|command| self.dispatch(command)) {
            Ok(flow) => flow,
            Err(e) if e.is::<io::Error>() => return Err(e),
            Err(e) => {
                writeln!(self.err, "Error: {e}")?;
                Flow::Continue
            }
        };

        if flow == Flow::Continue && self.manager.is_automated_turn() {
            self.automated_turn()?;
        }
        Ok(flow)
    }

    // ========================================================================
    // HANDLERS (Level 3)
    // ========================================================================

    fn dispatch(&mut self, command: Command) -> Result<Flow> {
        tracing::debug!(?command, "command");
        match command {
            Command::Place { x, y } => {
                let outcome = self.manager.place_token(x, y)?;
                self.report_placement(&outcome)?;
            }
            Command::Swap => {
                let swapper = self.manager.request_swap()?;
                writeln!(self.out, "{swapper} swaps")?;
                self.print_board_if_auto()?;
                self.print_turn()?;
            }
            Command::NewGame(name) => {
                self.manager.start_new_session(&name)?;
                writeln!(self.out, "Welcome to {name}")?;
                self.print_board_if_auto()?;
                self.print_turn()?;
            }
            Command::SwitchGame(name) => {
                self.manager.switch_session(&name)?;
                writeln!(self.out, "Switched to {name}")?;
            }
            Command::History(count) => {
                for entry in self.manager.query_history(count)? {
                    writeln!(self.out, "{entry}")?;
                }
            }
            Command::ListGames => {
                for summary in self.manager.list_sessions() {
                    writeln!(self.out, "{summary}")?;
                }
            }
            Command::Print => {
                writeln!(self.out, "{}", self.manager.active_game().board())?;
            }
            Command::Help => {
                for line in HELP_TEXT {
                    writeln!(self.out, "{line}")?;
                }
            }
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn automated_turn(&mut self) -> Result<()> {
        match self.manager.play_automated_turn()? {
            AutomatedTurn::Placed(outcome) => {
                writeln!(
                    self.out,
                    "{} places at {} {}",
                    outcome.player, outcome.at.x, outcome.at.y
                )?;
                self.report_placement(&outcome)?;
            }
            AutomatedTurn::Swapped { player } => {
                writeln!(self.out, "{player} swaps")?;
                self.print_board_if_auto()?;
                self.print_turn()?;
            }
            AutomatedTurn::Passed { player } => {
                tracing::warn!(%player, "automated player found no move");
                self.print_turn()?;
            }
        }
        Ok(())
    }

    // ========================================================================
    // OUTPUT (Level 4)
    // ========================================================================

    fn report_placement(&mut self, outcome: &PlacementOutcome) -> Result<()> {
        match &outcome.winner {
            Some(winner) => {
                writeln!(self.out, "{winner} wins!")?;
                writeln!(self.out, "{}", self.manager.active_game().winning_board())?;
            }
            None => {
                self.print_board_if_auto()?;
                self.print_turn()?;
            }
        }
        Ok(())
    }

    fn print_board_if_auto(&mut self) -> Result<()> {
        if self.auto_print {
            writeln!(self.out, "{}", self.manager.active_game().board())?;
        }
        Ok(())
    }

    fn print_turn(&mut self) -> Result<()> {
        writeln!(self.out, "{}'s turn", self.manager.current_player().name())?;
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

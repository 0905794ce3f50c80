//! Line-oriented text protocol.
//!
//! The protocol follows the shape of GTP so that scripts and simple GUIs can
//! drive the engine over stdin/stdout: each line is an optional numeric id
//! followed by a command and its arguments; responses start with `=` on
//! success or `?` on failure, echo the id, and end with a blank line.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`
//! - `list_commands`, `known_command <cmd>`
//! - `quit`
//! - `clear_board` - Reset the board to empty
//! - `winlength <n>` - Change the winning line length (clears the board)
//! - `play <mark> <x> <y>` - Place a mark
//! - `genmove <mark> [depth]` - Search and play a move, responds `x y`
//! - `cell <x> <y>` - Responds `X`, `O`, or `.`
//! - `moves` - Candidate moves as `x,y` pairs
//! - `winner` - `X`, `O`, or `none`
//! - `nodes` - Nodes evaluated by the latest `genmove`
//! - `showboard` - Render the occupied area
//!
//! ## Example
//!
//! ```ignore
//! use infinite_ttt::protocol::TextEngine;
//! let mut engine = TextEngine::new();
//! engine.run();
//! ```

use std::io::{self, BufRead, Write};

use log::warn;

use crate::board::{Coord, Mark};
use crate::constants::DEFAULT_DEPTH;
use crate::display::{BoardView, Viewport};
use crate::game::GameSession;
use crate::search::SearchConfig;

const KNOWN_COMMANDS: &[&str] = &[
    "cell",
    "clear_board",
    "genmove",
    "known_command",
    "list_commands",
    "moves",
    "name",
    "nodes",
    "play",
    "protocol_version",
    "quit",
    "showboard",
    "version",
    "winlength",
    "winner",
];

/// Protocol engine state.
pub struct TextEngine {
    game: GameSession,
    /// Depth used by `genmove` when none is given
    depth: u32,
}

impl Default for TextEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextEngine {
    /// Engine with the default rules and search depth.
    pub fn new() -> Self {
        Self::with_settings(SearchConfig::default(), DEFAULT_DEPTH)
    }

    /// Engine with explicit search limits and default `genmove` depth.
    pub fn with_settings(config: SearchConfig, depth: u32) -> Self {
        Self {
            game: GameSession::with_config(config),
            depth,
        }
    }

    /// The game being played.
    pub fn game(&self) -> &GameSession {
        &self.game
    }

    /// Serve commands from stdin until `quit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.serve(stdin.lock(), stdout.lock())
    }

    /// Serve commands from `input`, writing responses to `output`.
    pub fn serve(&mut self, input: impl BufRead, mut output: impl Write) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let command = parts[0].to_lowercase();
            let (success, message) = self.execute(&command, &parts[1..]);
            if !success {
                warn!("{command}: {message}");
            }

            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();
            writeln!(output, "{prefix}{id_str} {message}\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Split an optional leading numeric id from the command text.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let end = line
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(line.len());
        if end == 0 {
            return (None, line);
        }
        match line[..end].parse::<u32>() {
            Ok(id) => (Some(id), line[end..].trim()),
            Err(_) => (None, line),
        }
    }

    /// Read `x y` from the first two arguments.
    fn parse_coord(args: &[&str]) -> Result<Coord, String> {
        match args {
            [x, y, ..] => format!("{x} {y}").parse::<Coord>().map_err(|e| e.to_string()),
            _ => Err("missing coordinates".to_string()),
        }
    }

    /// Execute one command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "1".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => match args.first() {
                Some(cmd) => {
                    let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                    (true, known.to_string())
                }
                None => (false, "missing argument".to_string()),
            },

            "quit" => (true, String::new()),

            "clear_board" => {
                self.game.reset();
                (true, String::new())
            }

            "winlength" => match args.first().map(|a| a.parse::<usize>()) {
                Some(Ok(n)) if n >= 1 => {
                    let config = SearchConfig {
                        win_length: n,
                        ..*self.game.config()
                    };
                    self.game = GameSession::with_config(config);
                    (true, String::new())
                }
                Some(_) => (false, "invalid win length".to_string()),
                None => (false, "missing argument".to_string()),
            },

            "play" => {
                let Some(mark) = args.first() else {
                    return (false, "missing arguments".to_string());
                };
                let mark = match mark.parse::<Mark>() {
                    Ok(m) => m,
                    Err(e) => return (false, e.to_string()),
                };
                let coord = match Self::parse_coord(&args[1..]) {
                    Ok(c) => c,
                    Err(e) => return (false, e),
                };
                match self.game.make_move(coord.x, coord.y, mark) {
                    Ok(()) => (true, String::new()),
                    Err(e) => (false, format!("illegal move: {e}")),
                }
            }

            "genmove" => {
                let Some(mark) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let mark = match mark.parse::<Mark>() {
                    Ok(m) => m,
                    Err(e) => return (false, e.to_string()),
                };
                let depth = match args.get(1).map(|d| d.parse::<u32>()) {
                    None => self.depth,
                    Some(Ok(d)) => d,
                    Some(Err(_)) => return (false, "invalid depth".to_string()),
                };
                if self.game.winner().is_some() {
                    return (false, "game is over".to_string());
                }

                let mv = match self.game.find_best_move(mark, depth) {
                    Ok(mv) => mv,
                    Err(e) => return (false, e.to_string()),
                };
                match self.game.make_move(mv.x, mv.y, mark) {
                    Ok(()) => (true, format!("{} {}", mv.x, mv.y)),
                    Err(e) => (false, e.to_string()),
                }
            }

            "cell" => match Self::parse_coord(args) {
                Ok(c) => (true, self.game.cell(c.x, c.y).to_string()),
                Err(e) => (false, e),
            },

            "moves" => {
                let moves: Vec<String> = self
                    .game
                    .possible_moves()
                    .iter()
                    .map(|c| format!("{},{}", c.x, c.y))
                    .collect();
                (true, moves.join(" "))
            }

            "winner" => match self.game.winner() {
                Some(m) => (true, m.to_string()),
                None => (true, "none".to_string()),
            },

            "nodes" => (true, self.game.nodes_evaluated().to_string()),

            "showboard" => {
                let view = Viewport::fitting(self.game.board());
                (true, format!("\n{}", BoardView::new(self.game.board(), view)))
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }
}

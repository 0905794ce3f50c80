//! Interactive game modes, the AI-vs-AI demo, and the depth benchmark.
//!
//! Every mode reads from a [`BufRead`] and writes to a [`Write`] instead of
//! touching the terminal directly, so the binary passes stdin/stdout and the
//! tests pass byte buffers.

use std::io::{BufRead, Write};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use log::info;

use crate::board::{Coord, Mark};
use crate::constants::{DEMO_DEPTH, VIEW_MARGIN};
use crate::display::{BoardView, Viewport};
use crate::game::GameSession;
use crate::search::SearchConfig;

/// Delay between demo moves in [`Pace::Slow`].
const SLOW_DELAY: Duration = Duration::from_millis(700);

/// Read one line. `None` at end of input.
fn read_line(input: &mut impl BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    let n = input.read_line(&mut line).context("failed to read input")?;
    Ok((n > 0).then(|| line.trim().to_string()))
}

/// Prompt until the user types a valid coordinate. `None` at end of input.
fn prompt_coord(
    input: &mut impl BufRead,
    output: &mut impl Write,
    prompt: &str,
) -> Result<Option<Coord>> {
    loop {
        write!(output, "{prompt}")?;
        output.flush()?;
        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        match line.parse::<Coord>() {
            Ok(c) => return Ok(Some(c)),
            Err(e) => writeln!(output, "Invalid input: {e}. Enter two integers (x y).")?,
        }
    }
}

fn show(output: &mut impl Write, game: &GameSession, view: &Viewport) -> Result<()> {
    writeln!(output)?;
    write!(output, "{}", BoardView::new(game.board(), *view))?;
    Ok(())
}

/// Announce the winner if there is one.
fn announce_winner(output: &mut impl Write, game: &GameSession) -> Result<Option<Mark>> {
    let winner = game.winner();
    if let Some(mark) = winner {
        writeln!(output, "\n*** {mark} wins! ***")?;
    }
    Ok(winner)
}

/// Let the computer move for `mark`, reporting time and node count.
fn computer_turn(
    output: &mut impl Write,
    game: &mut GameSession,
    view: &mut Viewport,
    mark: Mark,
    depth: u32,
) -> Result<Coord> {
    writeln!(output, "\nComputer ({mark}) is thinking...")?;
    let start = Instant::now();
    let mv = game.find_best_move(mark, depth)?;
    let elapsed = start.elapsed();
    game.make_move(mv.x, mv.y, mark)
        .with_context(|| format!("search proposed an occupied cell {mv}"))?;
    view.include(mv, VIEW_MARGIN);

    writeln!(output, "Computer played {mv}")?;
    writeln!(output, "Time: {} ms", elapsed.as_millis())?;
    writeln!(output, "Nodes evaluated: {}", game.nodes_evaluated())?;
    Ok(mv)
}

/// Ask `mark`'s human player for a move until a free cell is given.
/// Returns `false` at end of input.
fn human_turn(
    input: &mut impl BufRead,
    output: &mut impl Write,
    game: &mut GameSession,
    view: &mut Viewport,
    mark: Mark,
) -> Result<bool> {
    loop {
        let prompt = format!("\nYour move ({mark}), enter x y: ");
        let Some(c) = prompt_coord(input, output, &prompt)? else {
            return Ok(false);
        };
        match game.make_move(c.x, c.y, mark) {
            Ok(()) => {
                view.include(c, VIEW_MARGIN);
                return Ok(true);
            }
            Err(e) => writeln!(output, "Illegal move: {e}. Try again.")?,
        }
    }
}

/// Human against the computer. X always moves first.
///
/// Returns the winner, or `None` if input ran out first.
pub fn human_vs_ai(
    input: &mut impl BufRead,
    output: &mut impl Write,
    config: SearchConfig,
    human: Mark,
    depth: u32,
) -> Result<Option<Mark>> {
    if !human.is_player() {
        bail!("the human player needs a mark");
    }
    let mut game = GameSession::with_config(config);
    let mut view = Viewport::default();
    let ai = human.opponent();
    let mut to_move = Mark::X;

    writeln!(output, "=== Infinite board, {} in a row wins ===", game.win_length())?;
    writeln!(output, "You play {human}, the computer plays {ai}.")?;

    loop {
        show(output, &game, &view)?;
        if let Some(winner) = announce_winner(output, &game)? {
            return Ok(Some(winner));
        }

        if to_move == human {
            if !human_turn(input, output, &mut game, &mut view, human)? {
                return Ok(None);
            }
        } else {
            computer_turn(output, &mut game, &mut view, ai, depth)?;
        }
        to_move = to_move.opponent();
    }
}

/// Two humans sharing the keyboard.
pub fn human_vs_human(
    input: &mut impl BufRead,
    output: &mut impl Write,
    config: SearchConfig,
) -> Result<Option<Mark>> {
    let mut game = GameSession::with_config(config);
    let mut view = Viewport::default();
    let mut to_move = Mark::X;

    writeln!(output, "=== Human vs human, {} in a row wins ===", game.win_length())?;

    loop {
        show(output, &game, &view)?;
        if let Some(winner) = announce_winner(output, &game)? {
            return Ok(Some(winner));
        }
        if !human_turn(input, output, &mut game, &mut view, to_move)? {
            return Ok(None);
        }
        to_move = to_move.opponent();
    }
}

/// How fast the demo advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Pace {
    /// No pause between moves
    #[default]
    Fast,
    /// Short pause after each move
    Slow,
    /// Wait for Enter after each move
    Step,
}

#[derive(Debug, Clone, Copy)]
pub struct DemoOptions {
    pub depth: u32,
    /// Number of opening moves picked at random among the candidates
    pub random_openings: usize,
    pub max_moves: usize,
    pub pace: Pace,
    pub seed: Option<u64>,
}

impl Default for DemoOptions {
    fn default() -> Self {
        Self {
            depth: DEMO_DEPTH,
            random_openings: 2,
            max_moves: 40,
            pace: Pace::Fast,
            seed: None,
        }
    }
}

/// Computer against itself. The first few moves are random so that games
/// differ from run to run.
pub fn demo(
    input: &mut impl BufRead,
    output: &mut impl Write,
    config: SearchConfig,
    options: DemoOptions,
) -> Result<Option<Mark>> {
    let mut rng = match options.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    let mut game = GameSession::with_config(config);
    let mut view = Viewport::default();
    let mut to_move = Mark::X;

    writeln!(output, "=== Demo: computer vs computer ===")?;

    for ply in 0..options.max_moves {
        show(output, &game, &view)?;
        if let Some(winner) = announce_winner(output, &game)? {
            return Ok(Some(winner));
        }

        let mv = if ply < options.random_openings {
            let moves = game.possible_moves();
            let mv = moves[rng.usize(..moves.len())];
            game.make_move(mv.x, mv.y, to_move)?;
            view.include(mv, VIEW_MARGIN);
            writeln!(output, "\n{to_move} opens at random: {mv}")?;
            mv
        } else {
            computer_turn(output, &mut game, &mut view, to_move, options.depth)?
        };
        info!("demo ply {ply}: {to_move} {mv}");
        to_move = to_move.opponent();

        match options.pace {
            Pace::Fast => {}
            Pace::Slow => thread::sleep(SLOW_DELAY),
            Pace::Step => {
                write!(output, "Press Enter for the next move...")?;
                output.flush()?;
                if read_line(input)?.is_none() {
                    return Ok(None);
                }
            }
        }
    }

    show(output, &game, &view)?;
    let winner = announce_winner(output, &game)?;
    if winner.is_none() {
        writeln!(output, "\nMove limit reached.")?;
    }
    Ok(winner)
}

/// One line of the depth benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchRow {
    pub depth: u32,
    pub elapsed: Duration,
    pub nodes: u64,
    pub best_move: Coord,
}

/// Opening used for every benchmark depth.
const BENCH_POSITION: [(i32, i32, Mark); 4] = [
    (0, 0, Mark::X),
    (1, 0, Mark::O),
    (0, 1, Mark::X),
    (1, 1, Mark::O),
];

/// Time X's search on a fixed position for each depth in `1..=max_depth`.
pub fn benchmark(config: SearchConfig, max_depth: u32) -> Result<Vec<BenchRow>> {
    let mut rows = Vec::new();
    for depth in 1..=max_depth {
        let mut game = GameSession::with_config(config);
        for (x, y, mark) in BENCH_POSITION {
            game.make_move(x, y, mark)?;
        }

        let start = Instant::now();
        let best_move = game.find_best_move(Mark::X, depth)?;
        let elapsed = start.elapsed();
        rows.push(BenchRow {
            depth,
            elapsed,
            nodes: game.nodes_evaluated(),
            best_move,
        });
    }
    Ok(rows)
}

/// Print benchmark rows in human-readable form.
pub fn print_benchmark(output: &mut impl Write, rows: &[BenchRow]) -> Result<()> {
    for row in rows {
        writeln!(output, "Depth {}:", row.depth)?;
        writeln!(output, "  Time: {} ms", row.elapsed.as_millis())?;
        writeln!(output, "  Nodes evaluated: {}", row.nodes)?;
        writeln!(output, "  Best move: {}\n", row.best_move)?;
    }
    Ok(())
}

/// Write benchmark rows as CSV (`depth,elapsed_ms,nodes`).
pub fn write_csv(output: &mut impl Write, rows: &[BenchRow]) -> Result<()> {
    writeln!(output, "depth,elapsed_ms,nodes")?;
    for row in rows {
        writeln!(output, "{},{},{}", row.depth, row.elapsed.as_millis(), row.nodes)?;
    }
    Ok(())
}

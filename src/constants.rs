//! Constants for game rules, search limits, and evaluation weights.
//!
//! These are the defaults the engine runs with. Most of them can be
//! overridden at runtime through [`SearchConfig`](crate::search::SearchConfig)
//! or the command-line flags of the `infinite-ttt` binary.

// =============================================================================
// Game Rules
// =============================================================================

/// Default number of marks in a row needed to win.
pub const WIN_LENGTH: usize = 5;

/// Line directions scanned for wins and evaluation.
/// Order: horizontal, vertical, diagonal (up-right), diagonal (down-right).
pub const DIRECTIONS: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// Offsets to the eight neighbouring cells, in lexicographic `(dx, dy)` order.
pub const NEIGHBORS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

// =============================================================================
// Search Parameters
// =============================================================================

/// Default search depth (plies) for the computer player.
pub const DEFAULT_DEPTH: u32 = 3;

/// Search depth used by the AI-vs-AI demo.
pub const DEMO_DEPTH: u32 = 2;

/// Maximum number of candidates tried at the root of a search.
pub const ROOT_CANDIDATES: usize = 20;

/// Maximum number of candidates tried at every inner node.
pub const NODE_CANDIDATES: usize = 15;

// =============================================================================
// Evaluation Weights
// =============================================================================

/// Score of a position where one side already has a winning line.
pub const WIN_SCORE: i32 = 10_000;

/// Multiplier applied to the squared length of every completable line.
pub const LINE_WEIGHT: i32 = 10;

// =============================================================================
// Hash Table
// =============================================================================

/// Number of buckets a fresh board starts with.
pub const INITIAL_CAPACITY: usize = 1024;

/// Load factor (entries per bucket) above which the table doubles.
pub const MAX_LOAD_FACTOR: f64 = 0.75;

// =============================================================================
// Text Display
// =============================================================================

/// Half-width of the window shown before any move is played.
pub const VIEW_RADIUS: i32 = 5;

/// Cells kept visible around every played move.
pub const VIEW_MARGIN: i32 = 2;

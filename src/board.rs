//! Sparse board over the unbounded integer plane.
//!
//! Only occupied cells are stored. A cell that is absent from the table is
//! empty, so [`Mark::Empty`] never appears as a stored value.

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

use log::error;
use thiserror::Error;

use crate::table::CoordTable;

/// A cell address on the infinite board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

/// The cell every game starts from.
pub const ORIGIN: Coord = Coord { x: 0, y: 0 };

impl Coord {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The coordinate `steps` cells away along `(dx, dy)`, or `None` if
    /// that cell lies outside the `i32` plane.
    #[inline]
    pub fn offset(self, (dx, dy): (i32, i32), steps: i32) -> Option<Self> {
        let x = self.x.checked_add(dx.checked_mul(steps)?)?;
        let y = self.y.checked_add(dy.checked_mul(steps)?)?;
        Some(Self { x, y })
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected two integers `x y`, got {0:?}")]
pub struct ParseCoordError(pub String);

impl FromStr for Coord {
    type Err = ParseCoordError;

    /// Accepts `x y`, `x,y`, and `(x, y)`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseCoordError(s.to_string());
        let cleaned = s.trim().trim_start_matches('(').trim_end_matches(')');
        let mut parts = cleaned
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty());
        let x = parts.next().ok_or_else(err)?.parse().map_err(|_| err())?;
        let y = parts.next().ok_or_else(err)?.parse().map_err(|_| err())?;
        if parts.next().is_some() {
            return Err(err());
        }
        Ok(Self::new(x, y))
    }
}

/// Content of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Mark {
    #[default]
    Empty,
    /// First player.
    X,
    /// Second player.
    O,
}

impl Mark {
    /// The other player. `Empty` stays `Empty`.
    #[inline]
    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
            Mark::Empty => Mark::Empty,
        }
    }

    /// True for `X` and `O`.
    #[inline]
    pub fn is_player(self) -> bool {
        self != Mark::Empty
    }

    /// Character used in board diagrams and protocol replies.
    pub fn symbol(self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
            Mark::Empty => '.',
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown mark {0:?}, expected X or O")]
pub struct ParseMarkError(pub String);

impl FromStr for Mark {
    type Err = ParseMarkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Mark::X),
            "o" => Ok(Mark::O),
            _ => Err(ParseMarkError(s.to_string())),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("cell {0} is already occupied")]
    OccupiedCell(Coord),
    #[error("cell {0} holds no mark")]
    KeyNotFound(Coord),
    #[error("cannot store an empty mark at {0}")]
    EmptyMark(Coord),
}

/// The game board: occupied cells only.
#[derive(Clone, Debug, Default)]
pub struct SparseBoard {
    cells: CoordTable<Mark>,
}

impl SparseBoard {
    /// Empty board with the default table size.
    pub fn new() -> Self {
        Self {
            cells: CoordTable::new(),
        }
    }

    /// Board whose underlying table starts with `capacity` buckets.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cells: CoordTable::with_capacity(capacity),
        }
    }

    /// Put `mark` on an empty cell.
    pub fn place(&mut self, coord: Coord, mark: Mark) -> Result<(), BoardError> {
        if !mark.is_player() {
            return Err(BoardError::EmptyMark(coord));
        }
        if self.cells.contains_key(coord) {
            return Err(BoardError::OccupiedCell(coord));
        }
        self.cells.insert(coord, mark);
        Ok(())
    }

    /// Take the mark off an occupied cell, returning it.
    ///
    /// This undoes a tentative placement; players never clear cells.
    pub fn remove(&mut self, coord: Coord) -> Result<Mark, BoardError> {
        self.cells.remove(coord).ok_or(BoardError::KeyNotFound(coord))
    }

    /// Mark at `coord`; `Empty` for any cell never played.
    #[inline]
    pub fn get(&self, coord: Coord) -> Mark {
        self.cells.get(coord).copied().unwrap_or(Mark::Empty)
    }

    /// True if `coord` holds a mark.
    #[inline]
    pub fn contains(&self, coord: Coord) -> bool {
        self.cells.contains_key(coord)
    }

    /// Occupied cells with their marks.
    ///
    /// The order is arbitrary but identical between two reads of an
    /// unchanged board.
    pub fn occupied(&self) -> impl Iterator<Item = (Coord, Mark)> + '_ {
        self.cells.iter().map(|(c, m)| (c, *m))
    }

    /// Number of marks on the board.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Remove every mark.
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Smallest rectangle `(min, max)` holding every mark.
    pub fn bounds(&self) -> Option<(Coord, Coord)> {
        self.occupied().map(|(c, _)| c).fold(None, |acc, c| match acc {
            None => Some((c, c)),
            Some((lo, hi)) => Some((
                Coord::new(lo.x.min(c.x), lo.y.min(c.y)),
                Coord::new(hi.x.max(c.x), hi.y.max(c.y)),
            )),
        })
    }

    /// Place `mark` at `coord` until the returned guard is dropped.
    ///
    /// The guard dereferences to the board, so the placement can be searched
    /// through; dropping it removes the mark again on every exit path.
    pub fn tentative(&mut self, coord: Coord, mark: Mark) -> Result<Tentative<'_>, BoardError> {
        self.place(coord, mark)?;
        Ok(Tentative { board: self, coord })
    }
}

/// Undo guard returned by [`SparseBoard::tentative`].
pub struct Tentative<'a> {
    board: &'a mut SparseBoard,
    coord: Coord,
}

impl Tentative<'_> {
    /// Cell holding the tentative mark.
    pub fn coord(&self) -> Coord {
        self.coord
    }
}

impl Deref for Tentative<'_> {
    type Target = SparseBoard;

    fn deref(&self) -> &SparseBoard {
        &*self.board
    }
}

impl DerefMut for Tentative<'_> {
    fn deref_mut(&mut self) -> &mut SparseBoard {
        &mut *self.board
    }
}

impl Drop for Tentative<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.board.remove(self.coord) {
            error!("tentative mark lost before undo: {e}");
        }
    }
}

//! Text rendering of a rectangular window onto the board.
//!
//! The board is infinite, so what gets printed is a [`Viewport`] that grows
//! to keep every played move (plus a margin) in view. Axis labels carry the
//! real coordinates.

use std::fmt::{self, Write};

use crate::board::{Coord, Mark, SparseBoard};
use crate::constants::{VIEW_MARGIN, VIEW_RADIUS};

/// Inclusive coordinate window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub min: Coord,
    pub max: Coord,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::around(Coord::new(0, 0), VIEW_RADIUS)
    }
}

impl Viewport {
    /// Square window of half-width `radius` centred on `center`.
    pub fn around(center: Coord, radius: i32) -> Self {
        Self {
            min: Coord::new(center.x.saturating_sub(radius), center.y.saturating_sub(radius)),
            max: Coord::new(center.x.saturating_add(radius), center.y.saturating_add(radius)),
        }
    }

    /// Smallest default-sized window that shows every mark on `board`.
    pub fn fitting(board: &SparseBoard) -> Self {
        let mut view = Self::default();
        if let Some((lo, hi)) = board.bounds() {
            view.include(lo, VIEW_MARGIN);
            view.include(hi, VIEW_MARGIN);
        }
        view
    }

    /// Extend the window so that `coord` and `margin` cells around it show.
    pub fn include(&mut self, coord: Coord, margin: i32) {
        self.min.x = self.min.x.min(coord.x.saturating_sub(margin));
        self.min.y = self.min.y.min(coord.y.saturating_sub(margin));
        self.max.x = self.max.x.max(coord.x.saturating_add(margin));
        self.max.y = self.max.y.max(coord.y.saturating_add(margin));
    }

    /// Columns in the window.
    pub fn width(&self) -> usize {
        (self.max.x as i64 - self.min.x as i64 + 1) as usize
    }

    /// Rows in the window.
    pub fn height(&self) -> usize {
        (self.max.y as i64 - self.min.y as i64 + 1) as usize
    }

    /// True if `coord` is inside the window.
    pub fn contains(&self, coord: Coord) -> bool {
        (self.min.x..=self.max.x).contains(&coord.x) && (self.min.y..=self.max.y).contains(&coord.y)
    }
}

/// Renders `board` inside `view`.
///
/// ```
/// use infinite_ttt::board::{Coord, Mark, SparseBoard};
/// use infinite_ttt::display::{BoardView, Viewport};
///
/// let mut board = SparseBoard::new();
/// board.place(Coord::new(0, 0), Mark::X).unwrap();
/// let view = Viewport::around(Coord::new(0, 0), 1);
/// print!("{}", BoardView::new(&board, view));
/// ```
pub struct BoardView<'a> {
    board: &'a SparseBoard,
    view: Viewport,
}

impl<'a> BoardView<'a> {
    /// Renderer for the part of `board` inside `view`.
    pub fn new(board: &'a SparseBoard, view: Viewport) -> Self {
        Self { board, view }
    }
}

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Viewport { min, max } = self.view;
        let label_width = [min.y, max.y]
            .iter()
            .map(|y| y.to_string().len())
            .max()
            .unwrap_or(1);

        // column header: one label per column, aligned with the cells
        let mut header = String::new();
        for x in min.x..=max.x {
            write!(header, "{x} ")?;
        }
        writeln!(f, "{:w$} {}", "", header.trim_end(), w = label_width)?;

        for y in min.y..=max.y {
            write!(f, "{y:>label_width$} ")?;
            let row: Vec<String> = (min.x..=max.x)
                .map(|x| {
                    let c = Coord::new(x, y);
                    match self.board.get(c) {
                        Mark::Empty => " ".to_string(),
                        m => m.to_string(),
                    }
                })
                .collect();
            writeln!(f, "{}", row.join("|"))?;

            if y < max.y {
                let sep = vec!["-"; self.view.width()].join("+");
                writeln!(f, "{:w$} {}", "", sep, w = label_width)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_view() {
        let v = Viewport::default();
        assert_eq!(v.width(), 11);
        assert_eq!(v.height(), 11);
        assert!(v.contains(Coord::new(-5, 5)));
        assert!(!v.contains(Coord::new(6, 0)));
    }

    #[test]
    fn test_include_grows_window() {
        let mut v = Viewport::default();
        v.include(Coord::new(10, -8), VIEW_MARGIN);
        assert_eq!(v.max.x, 12);
        assert_eq!(v.min.y, -10);
        assert_eq!(v.min.x, -5);
    }

    #[test]
    fn test_fitting() {
        let mut b = SparseBoard::new();
        b.place(Coord::new(-20, 0), Mark::O).unwrap();
        let v = Viewport::fitting(&b);
        assert_eq!(v.min.x, -22);
        assert_eq!(v.max.x, 5);
    }

    #[test]
    fn test_render_small_window() {
        let mut b = SparseBoard::new();
        b.place(Coord::new(0, 0), Mark::X).unwrap();
        b.place(Coord::new(1, 1), Mark::O).unwrap();
        let view = Viewport {
            min: Coord::new(0, 0),
            max: Coord::new(1, 1),
        };
        let text = BoardView::new(&b, view).to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["  0 1", "0 X| ", "  -+-", "1  |O"]);
    }
}

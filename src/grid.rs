use std::fmt;

use thiserror::Error;

use crate::Coord;

/// Edge topology of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapMode {
    /// Opposite edges are glued together, so every cell has 8 neighbors.
    #[default]
    Torus,

    /// Hard edges. Anything outside the board reads as dead.
    Plane,
}

pub type GridResult<T> = Result<T, GridError>;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GridError {
    #[error("Board dimensions must be at least 1x1, got {width}x{height}")]
    InvalidDimension { width: usize, height: usize },

    #[error("({x}, {y}) is outside the {width}x{height} board")]
    OutOfRange {
        x: Coord,
        y: Coord,
        width: usize,
        height: usize,
    },
}

/// One generation of cells.
///
/// Cells are stored row-major with `(0, 0)` in the top-left corner, `x`
/// growing rightward and `y` growing downward. A grid always holds exactly
/// `width * height` cells, both dimensions at least 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<bool>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Create an all-dead `width x height` grid.
    pub fn new(width: usize, height: usize) -> GridResult<Self> {
        if width == 0 || height == 0 {
            return Err(GridError::InvalidDimension { width, height });
        }

        Ok(Self {
            cells: vec![false; width * height],
            width,
            height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Resolve a possibly out-of-range coordinate pair to a buffer index.
    ///
    /// On a [`WrapMode::Torus`], coordinates are reduced with a floor-style
    /// modulo, so `-1` lands on the far edge. On a [`WrapMode::Plane`],
    /// off-board coordinates resolve to `None`.
    fn index(&self, x: Coord, y: Coord, mode: WrapMode) -> Option<usize> {
        let (x, y) = match mode {
            WrapMode::Torus => (
                x.rem_euclid(self.width as Coord),
                y.rem_euclid(self.height as Coord),
            ),
            WrapMode::Plane => {
                if x < 0 || y < 0 || x >= self.width as Coord || y >= self.height as Coord {
                    return None;
                }

                (x, y)
            }
        };

        Some(y as usize * self.width + x as usize)
    }

    /// Whether the cell at `(x, y)` is alive.
    ///
    /// Off-board reads on a [`WrapMode::Plane`] are dead, never an error.
    /// Neighbor counting relies on this to work unconditionally at the
    /// edges.
    pub fn get(&self, x: Coord, y: Coord, mode: WrapMode) -> bool {
        self.index(x, y, mode).is_some_and(|i| self.cells[i])
    }

    /// Write the cell at `(x, y)`.
    ///
    /// On a [`WrapMode::Torus`], coordinates are normalized onto the board.
    /// On a [`WrapMode::Plane`], off-board writes are rejected and the grid
    /// is left unchanged.
    pub fn set(&mut self, x: Coord, y: Coord, alive: bool, mode: WrapMode) -> GridResult<()> {
        let i = self.index(x, y, mode).ok_or(GridError::OutOfRange {
            x,
            y,
            width: self.width,
            height: self.height,
        })?;

        self.cells[i] = alive;

        Ok(())
    }

    /// Flip a single cell, returning its new state.
    pub fn toggle(&mut self, x: Coord, y: Coord, mode: WrapMode) -> GridResult<bool> {
        let i = self.index(x, y, mode).ok_or(GridError::OutOfRange {
            x,
            y,
            width: self.width,
            height: self.height,
        })?;

        self.cells[i] = !self.cells[i];

        Ok(self.cells[i])
    }

    /// Set every cell to `alive`.
    pub fn fill(&mut self, alive: bool) {
        self.cells.fill(alive);
    }

    /// Overwrite every cell with values drawn from `f`, row by row.
    pub fn fill_with<F>(&mut self, mut f: F)
    where
        F: FnMut() -> bool,
    {
        for cell in &mut self.cells {
            *cell = f();
        }
    }

    /// Number of live cells on the board.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Coordinates of every live cell, row by row.
    pub fn live_cells(&self) -> impl Iterator<Item = (Coord, Coord)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &alive)| alive)
            .map(|(i, _)| ((i % self.width) as Coord, (i / self.width) as Coord))
    }

    /// Visit every cell mutably along with its coordinates, row by row.
    pub(crate) fn cells_mut(&mut self) -> impl Iterator<Item = ((Coord, Coord), &mut bool)> {
        let width = self.width;

        self.cells
            .iter_mut()
            .enumerate()
            .map(move |(i, cell)| (((i % width) as Coord, (i / width) as Coord), cell))
    }

    /// Build a `width x height` replacement for this grid.
    ///
    /// Cells in the overlap rectangle `[0, min(old, new))` on both axes keep
    /// their values; everything else starts dead. Cells that fall outside
    /// the new bounds are discarded for good. The original grid is not
    /// touched, so a failed resize loses nothing.
    pub fn resized(&self, width: usize, height: usize) -> GridResult<Self> {
        let mut next = Self::new(width, height)?;

        for y in 0..self.height.min(height) {
            for x in 0..self.width.min(width) {
                next.cells[y * width + x] = self.cells[y * self.width + x];
            }
        }

        Ok(next)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            for &alive in row {
                f.write_str(if alive { "X" } else { "." })?;
            }

            f.write_str("\n")?;
        }

        Ok(())
    }
}

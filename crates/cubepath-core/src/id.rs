//! Lattice cell identifiers and grid dimensions.

use std::fmt;

/// A lattice cell identified by its integer index triple `(x, y, z)`.
///
/// Cells are plain values: equality, ordering and hashing are all
/// index-based. A cell does not know its continuous position; that is
/// a function of the grid spacing and lives on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    /// Index along the x-axis (width).
    pub x: i32,
    /// Index along the y-axis (height).
    pub y: i32,
    /// Index along the z-axis (depth).
    pub z: i32,
}

impl Cell {
    /// Create a cell from its index triple.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The origin cell `(0, 0, 0)`.
    pub const ORIGIN: Cell = Cell::new(0, 0, 0);

    /// Checkerboard parity: `(x + y + z) mod 2`, always `0` or `1`.
    pub fn parity(&self) -> u8 {
        (self.x + self.y + self.z).rem_euclid(2) as u8
    }

    /// L1 (Manhattan) distance between two cells.
    pub fn manhattan(&self, other: &Cell) -> u32 {
        (self.x - other.x).unsigned_abs()
            + (self.y - other.y).unsigned_abs()
            + (self.z - other.z).unsigned_abs()
    }

    /// Whether two cells are 6-connected neighbours.
    ///
    /// Exactly one coordinate differs by one and the other two are equal,
    /// which for integer triples is the same as Manhattan distance 1.
    pub fn is_adjacent(&self, other: &Cell) -> bool {
        self.manhattan(other) == 1
    }

    /// The cell displaced by `(dx, dy, dz)`. No bounds check.
    pub fn offset(&self, dx: i32, dy: i32, dz: i32) -> Cell {
        Cell::new(self.x + dx, self.y + dy, self.z + dz)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.x, self.y, self.z)
    }
}

impl From<(i32, i32, i32)> for Cell {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}

/// Extents of a box-shaped lattice along each axis.
///
/// `Dims` carries no validation of its own; `Grid` construction
/// enforces the supported range. The feasibility analysis accepts raw
/// dimensions so it can reason about degenerate slabs too.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dims {
    /// Extent along x.
    pub width: u32,
    /// Extent along y.
    pub height: u32,
    /// Extent along z.
    pub depth: u32,
}

impl Dims {
    /// Create dimensions `width × height × depth`.
    pub const fn new(width: u32, height: u32, depth: u32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// A cube with the same extent on every axis.
    pub const fn cube(size: u32) -> Self {
        Self::new(size, size, size)
    }

    /// Total number of cells, `width * height * depth`.
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize * self.depth as usize
    }

    /// Largest extent over the three axes.
    pub fn max_dim(&self) -> u32 {
        self.width.max(self.height).max(self.depth)
    }

    /// The three extents in axis order `[x, y, z]`.
    pub fn as_array(&self) -> [u32; 3] {
        [self.width, self.height, self.depth]
    }

    /// Whether `cell` lies inside `[0, dim)` on every axis.
    pub fn contains(&self, cell: &Cell) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && cell.z >= 0
            && (cell.x as u32) < self.width
            && (cell.y as u32) < self.height
            && (cell.z as u32) < self.depth
    }

    /// Dense index of `cell` in z-major, then y, then x order.
    ///
    /// Returns `None` for cells outside the box.
    pub fn rank(&self, cell: &Cell) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        let w = self.width as usize;
        let h = self.height as usize;
        Some((cell.z as usize * h + cell.y as usize) * w + cell.x as usize)
    }

    /// Inverse of [`rank`](Self::rank).
    pub fn cell_of(&self, rank: usize) -> Option<Cell> {
        if rank >= self.cell_count() {
            return None;
        }
        let w = self.width as usize;
        let h = self.height as usize;
        let x = rank % w;
        let y = (rank / w) % h;
        let z = rank / (w * h);
        Some(Cell::new(x as i32, y as i32, z as i32))
    }
}

impl fmt::Display for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.width, self.height, self.depth)
    }
}

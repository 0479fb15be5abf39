//! The six axis-aligned unit moves.

/// One of the six 6-connected moves.
///
/// Declaration order is `+x, -x, +y, -y, +z, -z`; the direction-order
/// tables used by the backtracking search index into [`Direction::ALL`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    /// `+x`.
    XPos = 0,
    /// `-x`.
    XNeg = 1,
    /// `+y`.
    YPos = 2,
    /// `-y`.
    YNeg = 3,
    /// `+z`.
    ZPos = 4,
    /// `-z`.
    ZNeg = 5,
}

impl Direction {
    /// All directions in declaration order.
    pub const ALL: [Direction; 6] = [
        Direction::XPos,
        Direction::XNeg,
        Direction::YPos,
        Direction::YNeg,
        Direction::ZPos,
        Direction::ZNeg,
    ];

    /// Unit offset `(dx, dy, dz)`.
    pub fn offset(self) -> (i32, i32, i32) {
        match self {
            Direction::XPos => (1, 0, 0),
            Direction::XNeg => (-1, 0, 0),
            Direction::YPos => (0, 1, 0),
            Direction::YNeg => (0, -1, 0),
            Direction::ZPos => (0, 0, 1),
            Direction::ZNeg => (0, 0, -1),
        }
    }

    /// The opposite move.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::XPos => Direction::XNeg,
            Direction::XNeg => Direction::XPos,
            Direction::YPos => Direction::YNeg,
            Direction::YNeg => Direction::YPos,
            Direction::ZPos => Direction::ZNeg,
            Direction::ZNeg => Direction::ZPos,
        }
    }

    /// Direction at position `index` of [`Direction::ALL`].
    pub fn from_index(index: usize) -> Option<Direction> {
        Self::ALL.get(index).copied()
    }

    /// Short label, e.g. `"x+"`.
    pub fn label(self) -> &'static str {
        match self {
            Direction::XPos => "x+",
            Direction::XNeg => "x-",
            Direction::YPos => "y+",
            Direction::YNeg => "y-",
            Direction::ZPos => "z+",
            Direction::ZNeg => "z-",
        }
    }
}

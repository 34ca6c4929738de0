use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use super::{
    grid::Grid,
    shape::{PieceKind, PieceRotation, Shape},
};

/// A falling piece with position, rotation, and type.
///
/// Pieces are immutable values: movement and rotation operations return new
/// `Piece` instances and leave the original untouched.
///
/// # Coordinate System
///
/// - `(x, y)` is the top-left corner of the shape's bounding box in grid coordinates
/// - X increases rightward, Y increases downward, row 0 is the topmost visible row
/// - Both coordinates are signed: a piece may protrude above the grid (`y < 0`)
///   and its bounding box may overhang the side walls as long as no occupied cell does
///
/// # Example
///
/// ```
/// use blockfall_engine::{Piece, PieceKind};
///
/// let piece = Piece::spawn(PieceKind::T, 10);
/// assert_eq!((piece.x(), piece.y()), (3, -1));
///
/// let moved = piece.moved(1, 0).rotated_right();
/// assert_eq!(moved.x(), 4);
/// assert_eq!(moved.rotation().index(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    rotation: PieceRotation,
    x: i32,
    y: i32,
}

impl Serialize for Piece {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: "kind#rotation@x,y" (e.g., "T#1@3,-1")
        let s = format!(
            "{}#{}@{},{}",
            self.kind.as_char(),
            self.rotation.index(),
            self.x,
            self.y
        );
        serializer.serialize_str(&s)
    }
}

impl<'de> Deserialize<'de> for Piece {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error as _;

        let s = String::deserialize(deserializer)?;

        let (kind_str, rest) = s.split_once('#').ok_or_else(|| {
            D::Error::custom(format!("missing '#' in format 'kind#rotation@x,y', got '{s}'"))
        })?;
        let (rotation_str, position_str) = rest.split_once('@').ok_or_else(|| {
            D::Error::custom(format!("missing '@' in format 'kind#rotation@x,y', got '{s}'"))
        })?;
        let (x_str, y_str) = position_str.split_once(',').ok_or_else(|| {
            D::Error::custom(format!("missing ',' in format 'kind#rotation@x,y', got '{s}'"))
        })?;

        let mut kind_chars = kind_str.chars();
        let kind = match (kind_chars.next(), kind_chars.next()) {
            (Some(c), None) => PieceKind::from_char(c)
                .ok_or_else(|| D::Error::custom(format!("invalid piece kind: {c}")))?,
            _ => {
                return Err(D::Error::custom(format!(
                    "piece kind must be single character, got '{kind_str}'"
                )));
            }
        };

        let rotation_num = rotation_str
            .parse::<u8>()
            .map_err(|e| D::Error::custom(format!("invalid rotation: {rotation_str} ({e})")))?;
        if usize::from(rotation_num) >= PieceRotation::LEN {
            return Err(D::Error::custom(format!(
                "rotation must be 0-3, got {rotation_num}"
            )));
        }

        let x = x_str
            .parse::<i32>()
            .map_err(|e| D::Error::custom(format!("invalid x position: {x_str} ({e})")))?;
        let y = y_str
            .parse::<i32>()
            .map_err(|e| D::Error::custom(format!("invalid y position: {y_str} ({e})")))?;

        Ok(Piece::new(kind, PieceRotation::new(rotation_num), x, y))
    }
}

impl Piece {
    /// Row every piece spawns at, one row above the visible grid.
    pub const SPAWN_Y: i32 = -1;

    #[must_use]
    pub const fn new(kind: PieceKind, rotation: PieceRotation, x: i32, y: i32) -> Self {
        Self {
            kind,
            rotation,
            x,
            y,
        }
    }

    /// Creates a freshly spawned piece for a grid of the given width.
    ///
    /// The piece starts in rotation 0 at `y = -1`, horizontally centered as a 4-wide
    /// box: `x = (width - 4) / 2`, which is column 3 on a 10-wide grid.
    #[must_use]
    pub fn spawn(kind: PieceKind, grid_width: usize) -> Self {
        let x = i32::try_from(grid_width.saturating_sub(4) / 2).unwrap_or(0);
        Self::new(kind, PieceRotation::default(), x, Self::SPAWN_Y)
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn rotation(&self) -> PieceRotation {
        self.rotation
    }

    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    #[must_use]
    pub fn shape(&self) -> &'static Shape {
        self.kind.shape(self.rotation)
    }

    /// Returns the grid coordinates of the occupied cells.
    #[must_use]
    pub fn occupied_cells(&self) -> ArrayVec<(i32, i32), 4> {
        self.shape()
            .cells()
            .map(|(dx, dy)| (self.x + i32::from(dx), self.y + i32::from(dy)))
            .collect()
    }

    /// Returns this piece translated by `(dx, dy)`.
    #[must_use]
    pub const fn moved(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    #[must_use]
    pub const fn rotated_right(&self) -> Self {
        Self {
            rotation: self.rotation.rotated_right(),
            ..*self
        }
    }

    /// Rotates clockwise, falling back to a one-column wall kick.
    ///
    /// Returns `None` if the rotated piece fits nowhere.
    #[must_use]
    pub fn kicked_rotated_right(&self, grid: &Grid) -> Option<Self> {
        wall_kick(grid, self.rotated_right())
    }

    /// Returns the lowest placeable position straight below this piece, together with
    /// the number of rows travelled.
    #[must_use]
    pub fn drop_position(&self, grid: &Grid) -> (Self, usize) {
        let mut dropped = *self;
        let mut distance = 0;
        loop {
            let below = dropped.moved(0, 1);
            if !grid.can_place(&below) {
                return (dropped, distance);
            }
            dropped = below;
            distance += 1;
        }
    }
}

/// Attempts a simplified wall kick for a rotated piece.
///
/// Tries the unmodified position, then one column right, then one column left; the
/// first placeable candidate wins. There are no vertical kicks and no per-kind kick
/// tables.
fn wall_kick(grid: &Grid, piece: Piece) -> Option<Piece> {
    [piece, piece.moved(1, 0), piece.moved(-1, 0)]
        .into_iter()
        .find(|candidate| grid.can_place(candidate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_serialization() {
        let piece = Piece::new(PieceKind::S, PieceRotation::new(1), 4, 18);
        let serialized = serde_json::to_string(&piece).unwrap();
        assert_eq!(serialized, "\"S#1@4,18\"");

        let deserialized: Piece = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, piece);
    }

    #[test]
    fn test_piece_serialization_negative_coordinates() {
        let piece = Piece::new(PieceKind::I, PieceRotation::new(3), -1, -1);
        let serialized = serde_json::to_string(&piece).unwrap();
        assert_eq!(serialized, "\"I#3@-1,-1\"");
        assert_eq!(serde_json::from_str::<Piece>(&serialized).unwrap(), piece);
    }

    #[test]
    fn test_piece_deserialization_error_cases() {
        assert!(serde_json::from_str::<Piece>("\"S1@4,18\"").is_err());
        assert!(serde_json::from_str::<Piece>("\"S#1#4,18\"").is_err());
        assert!(serde_json::from_str::<Piece>("\"S#1@4\"").is_err());
        assert!(serde_json::from_str::<Piece>("\"X#1@4,18\"").is_err());
        assert!(serde_json::from_str::<Piece>("\"SS#1@4,18\"").is_err());
        assert!(serde_json::from_str::<Piece>("\"S#4@4,18\"").is_err());
        assert!(serde_json::from_str::<Piece>("\"S#1@abc,18\"").is_err());
    }

    #[test]
    fn test_spawn_position() {
        for kind in PieceKind::ALL {
            let piece = Piece::spawn(kind, 10);
            assert_eq!(piece.x(), 3);
            assert_eq!(piece.y(), -1);
            assert_eq!(piece.rotation(), PieceRotation::default());
        }
        assert_eq!(Piece::spawn(PieceKind::T, 12).x(), 4);
        assert_eq!(Piece::spawn(PieceKind::T, 4).x(), 0);
    }

    #[test]
    fn test_occupied_cells_are_offset() {
        let piece = Piece::new(PieceKind::O, PieceRotation::default(), 2, -1);
        let cells: Vec<_> = piece.occupied_cells().into_iter().collect();
        assert_eq!(cells, vec![(2, -1), (3, -1), (2, 0), (3, 0)]);
    }

    #[test]
    fn test_drop_position_on_empty_grid() {
        let grid = Grid::new(10, 20);
        let piece = Piece::spawn(PieceKind::O, 10);
        let (dropped, distance) = piece.drop_position(&grid);
        assert_eq!(dropped.y(), 18);
        assert_eq!(distance, 19);
    }

    #[test]
    fn test_kick_right_off_left_wall() {
        let grid = Grid::new(10, 20);
        // Vertical I in rotation 3 occupies local column 1; at x = -1 it sits in column 0.
        let piece = Piece::new(PieceKind::I, PieceRotation::new(3), -1, 5);
        assert!(grid.can_place(&piece));
        // Rotation 0 spans local columns 0..4, so column -1 is out; the +1 kick fits.
        let rotated = piece.kicked_rotated_right(&grid).unwrap();
        assert_eq!(rotated.rotation().index(), 0);
        assert_eq!(rotated.x(), 0);
    }

    #[test]
    fn test_kick_left_off_right_wall() {
        let grid = Grid::new(10, 20);
        // Vertical I in rotation 1 occupies local column 2; at x = 7 it sits in column 9.
        let piece = Piece::new(PieceKind::I, PieceRotation::new(1), 7, 5);
        assert!(grid.can_place(&piece));
        let rotated = piece.kicked_rotated_right(&grid).unwrap();
        assert_eq!(rotated.rotation().index(), 2);
        assert_eq!(rotated.x(), 6);
    }
}

use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

/// Enum representing the type of piece.
///
/// Discriminants index the shape catalog, so the declaration order is part of the
/// catalog layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// T-piece.
    T = 2,
    /// S-piece.
    S = 3,
    /// Z-piece.
    Z = 4,
    /// J-piece.
    J = 5,
    /// L-piece.
    L = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// All piece kinds in catalog order.
    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Returns the occupancy matrix of this kind in the given rotation.
    #[must_use]
    pub fn shape(self, rotation: PieceRotation) -> &'static Shape {
        &SHAPES[self as usize][rotation.index()]
    }

    /// Returns the fixed display color of this kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::T.color().to_string(), "#a855f7");
    /// ```
    #[must_use]
    pub const fn color(self) -> PieceColor {
        match self {
            PieceKind::I => PieceColor::new(0x22, 0xd3, 0xee),
            PieceKind::O => PieceColor::new(0xfa, 0xcc, 0x15),
            PieceKind::T => PieceColor::new(0xa8, 0x55, 0xf7),
            PieceKind::S => PieceColor::new(0x4a, 0xde, 0x80),
            PieceKind::Z => PieceColor::new(0xf4, 0x3f, 0x5e),
            PieceKind::J => PieceColor::new(0x3b, 0x82, 0xf6),
            PieceKind::L => PieceColor::new(0xfb, 0x92, 0x3c),
        }
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('S'), Some(PieceKind::S));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'T' => Some(PieceKind::T),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            _ => None,
        }
    }
}

/// Display color of a piece kind, as 8-bit RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
#[display("#{r:02x}{g:02x}{b:02x}")]
pub struct PieceColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl PieceColor {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Rotation state of a piece.
///
/// - `0`: spawn orientation
/// - `1`: 90° clockwise
/// - `2`: 180°
/// - `3`: 270° clockwise
///
/// Rotation operations wrap around modulo 4.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(from = "u8", into = "u8")]
pub struct PieceRotation(u8);

impl From<u8> for PieceRotation {
    fn from(index: u8) -> Self {
        Self::new(index)
    }
}

impl From<PieceRotation> for u8 {
    fn from(rotation: PieceRotation) -> Self {
        rotation.0
    }
}

impl PieceRotation {
    /// Number of rotation states per piece kind.
    pub const LEN: usize = 4;

    /// Creates a rotation state, normalizing `index` modulo 4.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index % 4)
    }

    #[must_use]
    pub const fn rotated_right(self) -> Self {
        Self((self.0 + 1) % 4)
    }

    #[must_use]
    pub const fn rotated_left(self) -> Self {
        Self((self.0 + 3) % 4)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Occupancy matrix of one piece kind in one rotation state.
///
/// The matrix is square (`size × size`) and local to the piece's origin, the
/// top-left corner of the bounding box. Row `y` is stored as a bitmask where bit
/// `x` is set when the cell `(x, y)` is occupied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    size: u8,
    rows: [u8; 4],
}

impl Shape {
    /// Builds a shape from `#`/`.` rows at compile time.
    #[expect(clippy::cast_possible_truncation)]
    const fn from_rows(rows: &[&str]) -> Self {
        let size = rows.len();
        assert!(size > 0 && size <= 4);
        let mut bits = [0; 4];
        let mut y = 0;
        while y < size {
            let row = rows[y].as_bytes();
            assert!(row.len() == size);
            let mut x = 0;
            while x < size {
                if row[x] == b'#' {
                    bits[y] |= 1 << x;
                }
                x += 1;
            }
            y += 1;
        }
        Self {
            size: size as u8,
            rows: bits,
        }
    }

    /// Side length of the bounding box.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size as usize
    }

    /// Checks if the local cell `(x, y)` is occupied. Out-of-box cells are empty.
    #[must_use]
    pub const fn is_occupied(&self, x: usize, y: usize) -> bool {
        x < 4 && y < 4 && (self.rows[y] & (1 << x)) != 0
    }

    /// Returns an iterator over the occupied local cells, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        (0..self.size).flat_map(move |y| {
            (0..self.size).filter_map(move |x| {
                self.is_occupied(usize::from(x), usize::from(y))
                    .then_some((x, y))
            })
        })
    }

    /// Width and height of the occupied area (tight bounds, not the bounding box).
    #[must_use]
    pub fn extent(&self) -> (u8, u8) {
        let mut max = (0, 0);
        for (x, y) in self.cells() {
            max.0 = max.0.max(x + 1);
            max.1 = max.1.max(y + 1);
        }
        max
    }
}

const SHAPES: [[Shape; PieceRotation::LEN]; PieceKind::LEN] = {
    const fn s(rows: &[&str]) -> Shape {
        Shape::from_rows(rows)
    }

    [
        // I-piece
        [
            s(&["....", "####", "....", "...."]),
            s(&["..#.", "..#.", "..#.", "..#."]),
            s(&["....", "....", "####", "...."]),
            s(&[".#..", ".#..", ".#..", ".#.."]),
        ],
        // O-piece
        [
            s(&["##", "##"]),
            s(&["##", "##"]),
            s(&["##", "##"]),
            s(&["##", "##"]),
        ],
        // T-piece
        [
            s(&[".#.", "###", "..."]),
            s(&[".#.", ".##", ".#."]),
            s(&["...", "###", ".#."]),
            s(&[".#.", "##.", ".#."]),
        ],
        // S-piece
        [
            s(&[".##", "##.", "..."]),
            s(&[".#.", ".##", "..#"]),
            s(&["...", ".##", "##."]),
            s(&["#..", "##.", ".#."]),
        ],
        // Z-piece
        [
            s(&["##.", ".##", "..."]),
            s(&["..#", ".##", ".#."]),
            s(&["...", "##.", ".##"]),
            s(&[".#.", "##.", "#.."]),
        ],
        // J-piece
        [
            s(&["#..", "###", "..."]),
            s(&[".##", ".#.", ".#."]),
            s(&["...", "###", "..#"]),
            s(&[".#.", ".#.", "##."]),
        ],
        // L-piece
        [
            s(&["..#", "###", "..."]),
            s(&[".#.", ".#.", ".##"]),
            s(&["...", "###", "#.."]),
            s(&["##.", ".#.", ".#."]),
        ],
    ]
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_shape_has_four_cells() {
        for kind in PieceKind::ALL {
            for r in 0..4 {
                let shape = kind.shape(PieceRotation::new(r));
                assert_eq!(shape.cells().count(), 4, "{kind:?} rotation {r}");
            }
        }
    }

    #[test]
    fn test_bounding_box_sizes() {
        for rotation in (0..4).map(PieceRotation::new) {
            assert_eq!(PieceKind::I.shape(rotation).size(), 4);
            assert_eq!(PieceKind::O.shape(rotation).size(), 2);
            for kind in [PieceKind::T, PieceKind::S, PieceKind::Z, PieceKind::J, PieceKind::L] {
                assert_eq!(kind.shape(rotation).size(), 3);
            }
        }
    }

    #[test]
    fn test_t_piece_spawn_cells() {
        let cells: Vec<_> = PieceKind::T.shape(PieceRotation::default()).cells().collect();
        assert_eq!(cells, vec![(1, 0), (0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn test_rotation_wraps_in_both_directions() {
        let mut rotation = PieceRotation::default();
        for _ in 0..4 {
            rotation = rotation.rotated_right();
        }
        assert_eq!(rotation, PieceRotation::default());

        assert_eq!(PieceRotation::default().rotated_left(), PieceRotation::new(3));
        assert_eq!(PieceRotation::new(7), PieceRotation::new(3));
        assert_eq!(PieceRotation::new(3).rotated_right().index(), 0);
    }

    #[test]
    fn test_rotation_serialization_normalizes() {
        let rotation: PieceRotation = serde_json::from_str("6").unwrap();
        assert_eq!(rotation.index(), 2);
        assert_eq!(serde_json::to_string(&rotation).unwrap(), "2");
    }

    #[test]
    fn test_extent() {
        assert_eq!(PieceKind::I.shape(PieceRotation::default()).extent(), (4, 2));
        assert_eq!(PieceKind::O.shape(PieceRotation::default()).extent(), (2, 2));
        assert_eq!(PieceKind::L.shape(PieceRotation::new(1)).extent(), (3, 3));
    }

    #[test]
    fn test_colors() {
        assert_eq!(PieceKind::I.color().to_string(), "#22d3ee");
        assert_eq!(PieceKind::L.color(), PieceColor::new(0xfb, 0x92, 0x3c));
    }

    #[test]
    fn test_piece_kind_char_conversion() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_char(kind.as_char()), Some(kind));
        }
        assert_eq!(PieceKind::from_char('x'), None);
        assert_eq!(PieceKind::from_char('.'), None);
    }
}

use std::fmt;
use std::ops::{Index, IndexMut, Not};

use serde::{Serialize, Serializer};

#[repr(u8)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    /// Row delta of a pawn push for this color.
    #[inline(always)]
    pub const fn forward(self) -> i8 {
        match self {
            Self::White => 1,
            Self::Black => -1,
        }
    }

    /// Capitalized name, as used in prompts ("White's turn.").
    pub const fn title(self) -> &'static str {
        match self {
            Self::White => "White",
            Self::Black => "Black",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::White => "white",
            Self::Black => "black",
        })
    }
}

/// Allows for array indexing without explicit conversion of Color to usize.
/// Example: `array[Color::White]`
impl<T> Index<Color> for [T] {
    type Output = T;
    fn index(&self, index: Color) -> &Self::Output {
        &self[index as usize]
    }
}

impl<T> IndexMut<Color> for [T] {
    fn index_mut(&mut self, index: Color) -> &mut Self::Output {
        &mut self[index as usize]
    }
}

impl Not for Color {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }
}

#[repr(u8)]
#[derive(Copy, Clone, Eq, PartialEq)]
#[rustfmt::skip]
pub enum Square {
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
}

impl Square {
    #[rustfmt::skip]
    pub const ALL: [Square; 64] = [
        Square::A1, Square::B1, Square::C1, Square::D1, Square::E1, Square::F1, Square::G1, Square::H1,
        Square::A2, Square::B2, Square::C2, Square::D2, Square::E2, Square::F2, Square::G2, Square::H2,
        Square::A3, Square::B3, Square::C3, Square::D3, Square::E3, Square::F3, Square::G3, Square::H3,
        Square::A4, Square::B4, Square::C4, Square::D4, Square::E4, Square::F4, Square::G4, Square::H4,
        Square::A5, Square::B5, Square::C5, Square::D5, Square::E5, Square::F5, Square::G5, Square::H5,
        Square::A6, Square::B6, Square::C6, Square::D6, Square::E6, Square::F6, Square::G6, Square::H6,
        Square::A7, Square::B7, Square::C7, Square::D7, Square::E7, Square::F7, Square::G7, Square::H7,
        Square::A8, Square::B8, Square::C8, Square::D8, Square::E8, Square::F8, Square::G8, Square::H8,
    ];

    /// Builds the square at `row` (0 = rank 1) and `col` (0 = file a), if it is on the board.
    #[inline(always)]
    pub const fn from_coords(row: i8, col: i8) -> Option<Square> {
        if row < 0 || row > 7 || col < 0 || col > 7 {
            return None;
        }
        Some(Self::ALL[(row * 8 + col) as usize])
    }

    /// Returns the row (rank index) of the square
    #[inline(always)]
    pub const fn row(self) -> i8 {
        (self as u8 >> 3) as i8 // Same as /8
    }

    /// Returns the column (file index) of the square
    #[inline(always)]
    pub const fn col(self) -> i8 {
        (self as u8 & 0b0000_0111) as i8 // Same as %8
    }

    /// Square shifted by the given deltas, or `None` when that leaves the board.
    #[inline(always)]
    pub const fn offset(self, d_row: i8, d_col: i8) -> Option<Square> {
        Self::from_coords(self.row() + d_row, self.col() + d_col)
    }

    /// Parses coordinate text such as `e2`: exactly a file letter `a`..`h` followed by a rank digit `1`..`8`.
    pub fn parse(text: &str) -> Option<Square> {
        let &[file, rank] = text.as_bytes() else {
            return None;
        };
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return None;
        }
        Self::from_coords((rank - b'1') as i8, (file - b'a') as i8)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.col() as u8) as char;
        let rank = (b'1' + self.row() as u8) as char;
        write!(f, "{file}{rank}")
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl Serialize for Square {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Raw (row, col) pair as handed in by a caller. Unlike [`Square`] it may lie off the board.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Coord {
    pub row: i8,
    pub col: i8,
}

impl Coord {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    pub const fn to_square(self) -> Option<Square> {
        Square::from_coords(self.row, self.col)
    }
}

impl From<Square> for Coord {
    fn from(sq: Square) -> Self {
        Self { row: sq.row(), col: sq.col() }
    }
}

#[repr(u8)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize)]
pub enum PieceKind {
    Pawn = 0,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pawn => "Pawn",
            Self::Knight => "Knight",
            Self::Bishop => "Bishop",
            Self::Rook => "Rook",
            Self::Queen => "Queen",
            Self::King => "King",
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Contents of an occupied board cell.
///
/// `has_moved` belongs to the cell value: it travels with the piece when the board relocates it and is only
/// consulted for kings and rooks (castling eligibility).
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub has_moved: bool,
}

impl Piece {
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color, has_moved: false }
    }

    /// Converts Piece to its FEN letter (uppercase for white).
    #[rustfmt::skip]
    pub const fn to_char(self) -> char {
        let ch = match self.kind {
            PieceKind::Pawn   => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook   => 'r',
            PieceKind::Queen  => 'q',
            PieceKind::King   => 'k',
        };
        match self.color {
            Color::White => ch.to_ascii_uppercase(),
            Color::Black => ch,
        }
    }

    /// Creates an unmoved Piece from a FEN letter.
    #[rustfmt::skip]
    pub const fn from_char(ch: char) -> Option<Self> {
        let color = if ch.is_ascii_uppercase() { Color::White } else { Color::Black };
        let kind = match ch.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _   => return None,
        };
        Some(Self::new(kind, color))
    }

    /// Unicode chess glyph used by the board renderer.
    #[rustfmt::skip]
    pub const fn symbol(self) -> char {
        match (self.color, self.kind) {
            (Color::White, PieceKind::Pawn)   => '♙',
            (Color::White, PieceKind::Knight) => '♘',
            (Color::White, PieceKind::Bishop) => '♗',
            (Color::White, PieceKind::Rook)   => '♖',
            (Color::White, PieceKind::Queen)  => '♕',
            (Color::White, PieceKind::King)   => '♔',
            (Color::Black, PieceKind::Pawn)   => '♟',
            (Color::Black, PieceKind::Knight) => '♞',
            (Color::Black, PieceKind::Bishop) => '♝',
            (Color::Black, PieceKind::Rook)   => '♜',
            (Color::Black, PieceKind::Queen)  => '♛',
            (Color::Black, PieceKind::King)   => '♚',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("a1", Some(Square::A1))]
    #[case("e2", Some(Square::E2))]
    #[case("h8", Some(Square::H8))]
    #[case("i9", None)]
    #[case("a0", None)]
    #[case("a9", None)]
    #[case("E2", None)]
    #[case("e", None)]
    #[case("e22", None)]
    #[case("", None)]
    #[case("2e", None)]
    fn parses_coordinate_text(#[case] text: &str, #[case] expected: Option<Square>) {
        assert_eq!(Square::parse(text), expected);
    }

    #[test]
    fn square_coordinates_round_trip_through_display() {
        for sq in Square::ALL {
            assert_eq!(Square::from_coords(sq.row(), sq.col()), Some(sq));
            assert_eq!(Square::parse(&sq.to_string()), Some(sq));
        }
    }

    #[test]
    fn offset_stops_at_the_edge() {
        assert_eq!(Square::H1.offset(0, 1), None);
        assert_eq!(Square::A8.offset(1, 0), None);
        assert_eq!(Square::E2.offset(2, 0), Some(Square::E4));
        assert_eq!(Coord::new(8, 0).to_square(), None);
        assert_eq!(Coord::new(-1, 3).to_square(), None);
    }

    #[test]
    fn fen_letters_carry_color() {
        let p = Piece::from_char('N').unwrap();
        assert_eq!((p.kind, p.color, p.has_moved), (PieceKind::Knight, Color::White, false));
        assert_eq!(Piece::from_char('q').unwrap().color, Color::Black);
        assert_eq!(Piece::from_char('x'), None);
        assert_eq!(Piece::new(PieceKind::King, Color::Black).to_char(), 'k');
    }

    #[test]
    fn color_flips_and_indexes() {
        assert_eq!(!Color::White, Color::Black);
        let homes = [1, 6];
        assert_eq!(homes[Color::Black], 6);
    }
}

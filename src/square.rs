// This file is part of the plyboard library.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

use std::{convert::TryFrom, fmt};

use crate::errors::RangeError;

/// A file of the board, `a` to `h`.
#[allow(missing_docs)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
#[repr(u8)]
pub enum File {
    A = 0,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl File {
    /// Gets the file from its letter.
    ///
    /// # Examples
    ///
    /// ```
    /// use plyboard::File;
    ///
    /// assert_eq!(File::from_char('e'), Some(File::E));
    /// assert_eq!(File::from_char('i'), None);
    /// ```
    #[inline]
    pub const fn from_char(ch: char) -> Option<File> {
        Some(match ch {
            'a' => File::A,
            'b' => File::B,
            'c' => File::C,
            'd' => File::D,
            'e' => File::E,
            'f' => File::F,
            'g' => File::G,
            'h' => File::H,
            _ => return None,
        })
    }

    #[inline]
    pub const fn new(index: u8) -> Option<File> {
        if index < 8 {
            Some(File::ALL[index as usize])
        } else {
            None
        }
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    #[inline]
    pub const fn char(self) -> char {
        (b'a' + self as u8) as char
    }

    /// `A` to `H`, in this order.
    pub const ALL: [File; 8] = [
        File::A,
        File::B,
        File::C,
        File::D,
        File::E,
        File::F,
        File::G,
        File::H,
    ];
}

/// A rank of the board, `1` to `8`.
#[allow(missing_docs)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
#[repr(u8)]
pub enum Rank {
    First = 0,
    Second,
    Third,
    Fourth,
    Fifth,
    Sixth,
    Seventh,
    Eighth,
}

impl Rank {
    /// Gets the rank from its digit.
    ///
    /// # Examples
    ///
    /// ```
    /// use plyboard::Rank;
    ///
    /// assert_eq!(Rank::from_char('4'), Some(Rank::Fourth));
    /// assert_eq!(Rank::from_char('9'), None);
    /// ```
    #[inline]
    pub const fn from_char(ch: char) -> Option<Rank> {
        Some(match ch {
            '1' => Rank::First,
            '2' => Rank::Second,
            '3' => Rank::Third,
            '4' => Rank::Fourth,
            '5' => Rank::Fifth,
            '6' => Rank::Sixth,
            '7' => Rank::Seventh,
            '8' => Rank::Eighth,
            _ => return None,
        })
    }

    #[inline]
    pub const fn new(index: u8) -> Option<Rank> {
        if index < 8 {
            Some(Rank::ALL[index as usize])
        } else {
            None
        }
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    #[inline]
    pub const fn char(self) -> char {
        (b'1' + self as u8) as char
    }

    /// `First` to `Eighth`, in this order.
    pub const ALL: [Rank; 8] = [
        Rank::First,
        Rank::Second,
        Rank::Third,
        Rank::Fourth,
        Rank::Fifth,
        Rank::Sixth,
        Rank::Seventh,
        Rank::Eighth,
    ];
}

/// A square index, `0` (a1) to `63` (h8). Square `i` has rank `i / 8` and
/// file `i % 8`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Square(u8);

/// Converts a (rank, file) pair to a square.
///
/// # Errors
///
/// Returns [`RangeError`] if `rank` or `file` is not in `0..=7`.
///
/// # Examples
///
/// ```
/// use plyboard::{square_from_rank_file, Square};
///
/// assert_eq!(square_from_rank_file(3, 5)?, Square::F4);
/// assert_eq!(u8::from(Square::F4), 29);
/// assert!(square_from_rank_file(8, 0).is_err());
/// assert!(square_from_rank_file(0, -1).is_err());
/// # Ok::<_, plyboard::RangeError>(())
/// ```
pub fn square_from_rank_file(rank: i64, file: i64) -> Result<Square, RangeError> {
    let rank = u8::try_from(rank)
        .ok()
        .and_then(Rank::new)
        .ok_or(RangeError::Rank(rank))?;
    let file = u8::try_from(file)
        .ok()
        .and_then(File::new)
        .ok_or(RangeError::File(file))?;
    Ok(Square::from_coords(file, rank))
}

impl Square {
    #[inline]
    pub const fn from_coords(file: File, rank: Rank) -> Square {
        Square(file as u8 | ((rank as u8) << 3))
    }

    /// Parses a square name like `e4`.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError`] for a character outside `a..=h` or `1..=8`.
    pub fn from_ascii(s: &[u8]) -> Result<Square, RangeError> {
        match *s {
            [file, rank] => {
                let file = File::from_char(char::from(file))
                    .ok_or(RangeError::FileChar(char::from(file)))?;
                let rank = Rank::from_char(char::from(rank))
                    .ok_or(RangeError::RankChar(char::from(rank)))?;
                Ok(Square::from_coords(file, rank))
            }
            _ => Err(RangeError::Square(-1)),
        }
    }

    #[inline]
    pub const fn file(self) -> File {
        File::ALL[(self.0 & 7) as usize]
    }

    #[inline]
    pub const fn rank(self) -> Rank {
        Rank::ALL[(self.0 >> 3) as usize]
    }

    /// Inverse of [`square_from_rank_file`].
    #[inline]
    pub const fn rank_file(self) -> (u8, u8) {
        (self.0 >> 3, self.0 & 7)
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// The square `delta_rank` ranks and `delta_file` files away, or `None`
    /// if that leaves the board.
    ///
    /// # Examples
    ///
    /// ```
    /// use plyboard::Square;
    ///
    /// assert_eq!(Square::G1.offset(2, -1), Some(Square::F3));
    /// assert_eq!(Square::H1.offset(0, 1), None);
    /// ```
    #[inline]
    pub const fn offset(self, delta_rank: i8, delta_file: i8) -> Option<Square> {
        let rank = (self.0 >> 3) as i16 + delta_rank as i16;
        let file = (self.0 & 7) as i16 + delta_file as i16;
        if 0 <= rank && rank < 8 && 0 <= file && file < 8 {
            Some(Square(((rank as u8) << 3) | file as u8))
        } else {
            None
        }
    }
}

macro_rules! square_consts {
    ($($name:ident = $index:expr,)+) => {
        #[allow(missing_docs)]
        impl Square {
            $(pub const $name: Square = Square($index);)+
        }
    }
}

square_consts! {
    A1 = 0, B1 = 1, C1 = 2, D1 = 3, E1 = 4, F1 = 5, G1 = 6, H1 = 7,
    A2 = 8, B2 = 9, C2 = 10, D2 = 11, E2 = 12, F2 = 13, G2 = 14, H2 = 15,
    A3 = 16, B3 = 17, C3 = 18, D3 = 19, E3 = 20, F3 = 21, G3 = 22, H3 = 23,
    A4 = 24, B4 = 25, C4 = 26, D4 = 27, E4 = 28, F4 = 29, G4 = 30, H4 = 31,
    A5 = 32, B5 = 33, C5 = 34, D5 = 35, E5 = 36, F5 = 37, G5 = 38, H5 = 39,
    A6 = 40, B6 = 41, C6 = 42, D6 = 43, E6 = 44, F6 = 45, G6 = 46, H6 = 47,
    A7 = 48, B7 = 49, C7 = 50, D7 = 51, E7 = 52, F7 = 53, G7 = 54, H7 = 55,
    A8 = 56, B8 = 57, C8 = 58, D8 = 59, E8 = 60, F8 = 61, G8 = 62, H8 = 63,
}

macro_rules! try_square_from_int_impl {
    ($($t:ty)+) => {
        $(impl TryFrom<$t> for Square {
            type Error = RangeError;

            #[inline]
            fn try_from(value: $t) -> Result<Square, RangeError> {
                if (0..64).contains(&value) {
                    Ok(Square(value as u8))
                } else {
                    Err(RangeError::Square(value as i64))
                }
            }
        })+
    }
}

try_square_from_int_impl! { u8 i8 u16 i16 u32 i32 i64 }

impl TryFrom<usize> for Square {
    type Error = RangeError;

    #[inline]
    fn try_from(value: usize) -> Result<Square, RangeError> {
        u8::try_from(value)
            .ok()
            .filter(|&index| index < 64)
            .map(Square)
            .ok_or(RangeError::Square(i64::try_from(value).unwrap_or(i64::MAX)))
    }
}

macro_rules! int_from_square_impl {
    ($($t:ty)+) => {
        $(impl From<Square> for $t {
            #[inline]
            fn from(sq: Square) -> $t {
                sq.0 as $t
            }
        })+
    }
}

int_from_square_impl! { u8 u16 u32 u64 i32 i64 usize }

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file().char(), self.rank().char())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string().to_uppercase())
    }
}

#[cfg(feature = "arbitrary")]
impl<'a> arbitrary::Arbitrary<'a> for Square {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Square> {
        Ok(Square(u.int_in_range(0..=63)?))
    }
}

//! Conversion between algebraic square names and grid indices
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use super::error::*;

/// Converts an algebraic square name such as `"e2"` to `(row, col)` grid indices, where row 0 is
/// rank 8 and column 0 is file `a`.
///
/// # Errors
///
/// Returns `Error::InvalidSquare` unless `square` is exactly one file letter `a`-`h` followed by
/// one rank digit `1`-`8`.
///
/// # Example
/// ```
/// use arbiter::chess::coord::to_grid;
/// assert_eq!(to_grid("e2").unwrap(), (6, 4));
/// assert_eq!(to_grid("a8").unwrap(), (0, 0));
/// ```
pub fn to_grid(square: &str) -> Result<(usize, usize)> {
    match square.as_bytes() {
        [file @ b'a'..=b'h', rank @ b'1'..=b'8'] => {
            Ok(((b'8' - rank) as usize, (file - b'a') as usize))
        },
        _ => Err(Error::InvalidSquare),
    }
}

/// Converts `(row, col)` grid indices to an algebraic square name. The inverse of `to_grid`.
///
/// # Errors
///
/// Returns `Error::InvalidSquare` if either index is outside `0..8`.
pub fn to_square(row: usize, col: usize) -> Result<String> {
    if row < 8 && col < 8 {
        let file = (b'a' + col as u8) as char;
        let rank = (b'8' - row as u8) as char;
        Ok(format!("{}{}", file, rank))
    } else {
        Err(Error::InvalidSquare)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_over_all_squares() {
        for file in "abcdefgh".chars() {
            for rank in "12345678".chars() {
                let name = format!("{}{}", file, rank);
                let (row, col) = to_grid(&name).unwrap();
                assert_eq!(to_square(row, col).unwrap(), name);
            }
        }
    }

    #[test]
    fn grid_round_trip_over_all_indices() {
        for row in 0..8 {
            for col in 0..8 {
                assert_eq!(to_grid(&to_square(row, col).unwrap()).unwrap(), (row, col));
            }
        }
    }

    #[test]
    fn rank_eight_is_row_zero() {
        assert_eq!(to_grid("h8").unwrap(), (0, 7));
        assert_eq!(to_grid("a1").unwrap(), (7, 0));
    }

    #[test]
    fn malformed_text_is_rejected() {
        for bad in &["", "e", "e22", "E2", "z1", "a0", "a9", "2e", " e2", "e2 "] {
            assert_eq!(to_grid(bad), Err(Error::InvalidSquare), "{:?}", bad);
        }
    }

    #[test]
    fn out_of_range_indices_are_rejected() {
        assert_eq!(to_square(8, 0), Err(Error::InvalidSquare));
        assert_eq!(to_square(0, 8), Err(Error::InvalidSquare));
    }
}

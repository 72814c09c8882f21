//! # Occlusion filling
//!
//! Occluded columns of an aligned scanline are left at 0. Filling copies the nearest valid
//! disparity from the left into each of them, which biases every gap towards the disparity of its
//! left neighbour. Zeros with nothing valid to their left are kept.

/// Forward fill the zero entries of `row` in place.
///
/// Filling is idempotent: a filled row has no zero after its first non-zero entry.
pub fn fill_occlusions(row: &mut [u8]) {
    let mut last_valid = 0u8;

    for val in row.iter_mut() {
        if *val == 0 {
            *val = last_valid;
        }
        else {
            last_valid = *val;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_from_the_left() {
        let mut row = [0, 0, 4, 0, 0, 7, 0, 9];
        fill_occlusions(&mut row);
        assert_eq!(row, [0, 0, 4, 4, 4, 7, 7, 9]);
    }

    #[test]
    fn empty_and_all_zero_rows() {
        let mut empty: [u8; 0] = [];
        fill_occlusions(&mut empty);

        let mut zeros = [0u8; 5];
        fill_occlusions(&mut zeros);
        assert_eq!(zeros, [0; 5]);
    }
}

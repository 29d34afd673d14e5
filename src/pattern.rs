//! Random-dot pattern propagation along a completed link table.

use rand::Rng;

use crate::links::LinkTable;

/// The two luminance levels a dot may take.
pub const DOT_DARK: u8 = 0;
pub const DOT_BRIGHT: u8 = 255;

/// Fills one output row of binary luminance values.
///
/// Columns are visited left to right; a root column draws a random dot, a
/// linked column copies its predecessor. `left[c] <= c` guarantees the
/// predecessor is already written.
pub fn fill_row<R: Rng>(links: &LinkTable, rng: &mut R, out: &mut [u8]) {
    debug_assert_eq!(links.width(), out.len());
    for c in 0..out.len() {
        let src = links.left(c);
        out[c] = if src == c {
            if rng.random() {
                DOT_BRIGHT
            } else {
                DOT_DARK
            }
        } else {
            out[src]
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn every_column_is_root_or_copy() {
        let mut table = LinkTable::new(12);
        for x in 2..12 {
            table.link(x, 4); // pairs (x-2, x+2) while in range
        }
        let mut rng = StdRng::seed_from_u64(7);
        let mut row = vec![1u8; 12];
        fill_row(&table, &mut rng, &mut row);
        for c in 0..12 {
            assert!(row[c] == DOT_DARK || row[c] == DOT_BRIGHT);
            if table.left(c) != c {
                assert_eq!(row[c], row[table.left(c)]);
            }
        }
    }

    #[test]
    fn seeded_fill_is_deterministic() {
        let table = LinkTable::new(64);
        let mut a = vec![0u8; 64];
        let mut b = vec![0u8; 64];
        fill_row(&table, &mut StdRng::seed_from_u64(42), &mut a);
        fill_row(&table, &mut StdRng::seed_from_u64(42), &mut b);
        assert_eq!(a, b);
        // An all-root row of this width is practically never uniform.
        let mut c = vec![0u8; 64];
        fill_row(&table, &mut StdRng::seed_from_u64(43), &mut c);
        assert_ne!(a, c);
    }

    #[test]
    fn single_column_row_is_one_random_dot() {
        let table = LinkTable::new(1);
        let mut row = [9u8];
        fill_row(&table, &mut StdRng::seed_from_u64(0), &mut row);
        assert!(row[0] == DOT_DARK || row[0] == DOT_BRIGHT);
    }
}

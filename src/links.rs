//! Per-row link table with hidden-surface removal.
//!
//! Every column whose stereo pair is in range claims two screen points that
//! both eyes should fuse into one dot. Overlapping claims are resolved so the
//! nearer surface hides the farther one; the surviving links are what the
//! pattern stage propagates dot colors along.

use crate::geometry::Geometry;

/// Mutual links between columns of one row.
///
/// `left[i] <= i` holds at all times. After a full pass, `left[i] < i` means
/// column `i` copies column `left[i]`'s color and `left[i] == i` marks a color
/// root. `right` is scratch used to find existing left-endpoint claims while
/// linking; it carries no meaning afterwards.
pub struct LinkTable {
    left: Vec<usize>,
    right: Vec<usize>,
}

impl LinkTable {
    pub fn new(width: usize) -> Self {
        LinkTable {
            left: (0..width).collect(),
            right: (0..width).collect(),
        }
    }

    pub fn width(&self) -> usize {
        self.left.len()
    }

    /// Resets every column to the unconstrained self-linked state.
    pub fn reset(&mut self) {
        for (i, l) in self.left.iter_mut().enumerate() {
            *l = i;
        }
        for (i, r) in self.right.iter_mut().enumerate() {
            *r = i;
        }
    }

    /// The column whose color column `c` must copy (`c` itself for roots).
    pub fn left(&self, c: usize) -> usize {
        self.left[c]
    }

    /// Registers the stereo pair of column `x` at the given separation.
    ///
    /// The pair is `(x - separation/2, x - separation/2 + separation)`; if it
    /// falls outside the row it is discarded. Otherwise both endpoints are
    /// checked against existing claims: a claim whose span encloses the new
    /// pair belongs to a farther surface and is broken, while an enclosed or
    /// equal claim is nearer (or was first at equal depth) and vetoes the new
    /// pair. Both endpoints are always checked, either one may veto.
    pub fn link(&mut self, x: usize, separation: usize) {
        let half = separation / 2;
        if half > x {
            return;
        }
        let x_left = x - half;
        let x_right = x_left + separation;
        if x_right >= self.left.len() {
            return;
        }

        let mut visible = true;
        let p = self.left[x_right];
        if p != x_right {
            // Right point already claimed.
            if p < x_left {
                self.right[p] = p; // break the farther pair
                self.left[x_right] = x_right;
            } else {
                visible = false;
            }
        }
        let q = self.right[x_left];
        if q != x_left {
            // Left point already claimed.
            if q > x_right {
                self.left[q] = q;
                self.right[x_left] = x_left;
            } else {
                visible = false;
            }
        }
        if visible {
            self.left[x_right] = x_left;
            self.right[x_left] = x_right;
        }
    }

    /// Builds the completed table for one row of depth samples.
    pub fn build_row(&mut self, samples: &[u8], geometry: &Geometry) {
        debug_assert_eq!(samples.len(), self.left.len());
        self.reset();
        for (x, &depth) in samples.iter().enumerate() {
            self.link(x, geometry.separation(depth));
        }
    }
}

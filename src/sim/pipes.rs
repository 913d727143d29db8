//! Fixed-size pool of pipe pairs
//!
//! The pool is allocated once per session and never grows or shrinks.
//! Recycling moves an off-screen pair behind the rightmost one, so the
//! distance between neighbours stays at `pipe_spacing` no matter how many
//! pairs recycle in a frame.

use std::ops::{Index, IndexMut};

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::tuning::Tuning;

/// One top/bottom pipe pair. Pipes are anchored at their top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstaclePair {
    /// Stable pool slot
    pub index: usize,
    /// Left edge shared by both pipes
    pub x: f32,
    /// Y of the top pipe's top edge (<= 0; the pipe hangs from above the screen)
    pub gap_offset: f32,
    /// Already counted on this pass; cleared when the pair is recycled
    #[serde(default)]
    pub scored: bool,
}

impl ObstaclePair {
    pub fn right(&self, tuning: &Tuning) -> f32 {
        self.x + tuning.pipe_width
    }

    pub fn center_x(&self, tuning: &Tuning) -> f32 {
        self.x + tuning.pipe_width * 0.5
    }

    /// Y of the top pipe's top edge
    pub fn top_y(&self) -> f32 {
        self.gap_offset
    }

    /// Y of the bottom pipe's top edge
    pub fn bottom_y(&self, tuning: &Tuning) -> f32 {
        self.gap_offset + tuning.pipe_height + tuning.pipe_gap_height
    }

    /// Upper and lower bound of the opening
    pub fn gap(&self, tuning: &Tuning) -> (f32, f32) {
        let top = self.gap_offset + tuning.pipe_height;
        (top, top + tuning.pipe_gap_height)
    }

    pub fn top_rect(&self, tuning: &Tuning) -> Rect {
        Rect::from_top_left(self.x, self.top_y(), tuning.pipe_width, tuning.pipe_height)
    }

    pub fn bottom_rect(&self, tuning: &Tuning) -> Rect {
        Rect::from_top_left(
            self.x,
            self.bottom_y(tuning),
            tuning.pipe_width,
            tuning.pipe_height,
        )
    }
}

/// Draw a gap offset uniformly from `[min_gap_offset, 0]`
pub fn random_gap_offset<R: Rng + ?Sized>(tuning: &Tuning, rng: &mut R) -> f32 {
    let min = tuning.min_gap_offset();
    if min.is_nan() || min >= 0.0 {
        return 0.0;
    }
    rng.random_range(min..=0.0)
}

/// Pool of pipe pairs, indexed by slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipePool {
    pairs: Vec<ObstaclePair>,
}

impl PipePool {
    /// Allocate `tuning.pipe_pairs` pairs in their staggered start layout
    pub fn new<R: Rng + ?Sized>(tuning: &Tuning, rng: &mut R) -> Self {
        let pairs = (0..tuning.pipe_pairs)
            .map(|index| ObstaclePair {
                index,
                x: 0.0,
                gap_offset: 0.0,
                scored: false,
            })
            .collect();
        let mut pool = Self { pairs };
        pool.reset(tuning, rng);
        pool
    }

    /// Move every pair back to the start layout with fresh gap offsets
    pub fn reset<R: Rng + ?Sized>(&mut self, tuning: &Tuning, rng: &mut R) {
        let first_x = tuning.first_pipe_x();
        for pair in &mut self.pairs {
            pair.x = first_x + pair.index as f32 * tuning.pipe_spacing;
            pair.gap_offset = random_gap_offset(tuning, rng);
            pair.scored = false;
        }
    }

    /// Scroll every pair left
    pub fn advance(&mut self, speed: f32) {
        for pair in &mut self.pairs {
            pair.x -= speed;
        }
    }

    /// X of the pair furthest to the right
    pub fn rightmost_x(&self) -> f32 {
        self.pairs
            .iter()
            .map(|p| p.x)
            .fold(f32::NEG_INFINITY, f32::max)
    }

    /// Recycle pair `index` if its right edge has left the screen.
    /// Returns true when the pair was moved.
    pub fn recycle_if_offscreen<R: Rng + ?Sized>(
        &mut self,
        index: usize,
        tuning: &Tuning,
        rng: &mut R,
    ) -> bool {
        if self.pairs[index].right(tuning) >= 0.0 {
            return false;
        }
        let x = self.rightmost_x() + tuning.pipe_spacing;
        let pair = &mut self.pairs[index];
        pair.x = x;
        pair.gap_offset = random_gap_offset(tuning, rng);
        pair.scored = false;
        true
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ObstaclePair> {
        self.pairs.iter()
    }

    /// Pair slots sorted left to right
    pub fn sorted_by_x(&self) -> Vec<ObstaclePair> {
        let mut pairs = self.pairs.clone();
        pairs.sort_by(|a, b| a.x.total_cmp(&b.x));
        pairs
    }

    /// First pair whose right edge is still at or ahead of `x`
    pub fn next_ahead_of(&self, x: f32, tuning: &Tuning) -> Option<&ObstaclePair> {
        self.pairs
            .iter()
            .filter(|p| p.right(tuning) >= x)
            .min_by(|a, b| a.x.total_cmp(&b.x))
    }
}

impl Index<usize> for PipePool {
    type Output = ObstaclePair;

    fn index(&self, index: usize) -> &Self::Output {
        &self.pairs[index]
    }
}

impl IndexMut<usize> for PipePool {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.pairs[index]
    }
}

//! Score overlay layout
//!
//! The score is drawn as one sprite per digit, centered horizontally.

/// A digit sprite to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DigitSprite {
    pub digit: u8,
    /// Left edge
    pub x: f32,
}

/// Lay out `score` as digit sprites centered on `center_x`
pub fn digit_layout(score: u64, center_x: f32, digit_width: f32) -> Vec<DigitSprite> {
    let digits: Vec<u8> = score.to_string().bytes().map(|b| b - b'0').collect();
    let left = center_x - digits.len() as f32 * digit_width / 2.0;

    digits
        .into_iter()
        .enumerate()
        .map(|(i, digit)| DigitSprite {
            digit,
            x: left + i as f32 * digit_width,
        })
        .collect()
}

/// Text shown under the game-over banner
pub fn best_score_label(best: u64) -> String {
    format!("High Score : {best}")
}

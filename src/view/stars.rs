//! Star rating glyphs.

/// Number of glyphs in every rating display.
pub const STAR_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Star {
    Filled,
    Empty,
}

impl Star {
    pub fn glyph(&self) -> char {
        match self {
            Star::Filled => '★',
            Star::Empty => '☆',
        }
    }
}

/// Five glyphs; position `i` is filled when `i < rating`.
///
/// The rating is not validated: anything below 0 renders empty and anything
/// above 5 renders full. A half star (e.g. 3.5) rounds up.
pub fn render_stars(rating: f64) -> [Star; STAR_COUNT] {
    std::array::from_fn(|i| {
        if (i as f64) < rating {
            Star::Filled
        } else {
            Star::Empty
        }
    })
}

/// The rating as a glyph string, e.g. `★★★☆☆`.
pub fn star_line(rating: f64) -> String {
    render_stars(rating).iter().map(Star::glyph).collect()
}

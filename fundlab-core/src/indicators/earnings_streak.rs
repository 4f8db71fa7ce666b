//! Consecutive-earnings-growth flag.
//!
//! `Some(true)` iff the three most recent annual net-income figures are
//! strictly increasing toward the present (y0 > y1 > y2), `Some(false)`
//! otherwise, and `None` when any of the three years is missing — an absent
//! year is unknowable, not a failed streak.

pub fn consecutive_earnings_growth(
    earnings_y0: Option<f64>,
    earnings_y1: Option<f64>,
    earnings_y2: Option<f64>,
) -> Option<bool> {
    let (y0, y1, y2) = (earnings_y0?, earnings_y1?, earnings_y2?);
    Some(y0 > y1 && y1 > y2)
}

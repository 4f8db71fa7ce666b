//! PEG ratio.
//!
//! Formula: trailing_pe / (earnings_growth × 100). The upstream growth rate
//! is a decimal (0.15 = 15%), hence the conversion to percentage points.

use super::safe_div;

pub fn peg_ratio(trailing_pe: Option<f64>, earnings_growth: Option<f64>) -> Option<f64> {
    safe_div(trailing_pe, earnings_growth.map(|g| g * 100.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn decimal_growth_converts_to_percent() {
        // PE 15 with 15% growth ⇒ PEG 1.0
        let peg = peg_ratio(Some(15.0), Some(0.15)).unwrap();
        assert_approx(peg, 1.0, DEFAULT_EPSILON);
    }

    #[test]
    fn zero_growth_undefined() {
        assert_eq!(peg_ratio(Some(15.0), Some(0.0)), None);
    }

    #[test]
    fn null_inputs_propagate() {
        assert_eq!(peg_ratio(None, Some(0.15)), None);
        assert_eq!(peg_ratio(Some(15.0), None), None);
    }
}

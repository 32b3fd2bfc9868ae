//! Bonding Curve Price Chart
//!
//! Display-only price curve over progress. It is independent of the
//! market-cap math and exists to draw the "price action" panel.

use serde::Serialize;

use super::market::MAX_PROGRESS;

/// Price at zero progress (in SOL)
pub const BASE_PRICE: f64 = 0.000_001;

/// Per-percent growth factor of the display curve
pub const GROWTH_FACTOR: f64 = 1.06;

/// Spacing between chart samples, in progress percent
pub const SAMPLE_STEP: usize = 2;

/// Label drawn at the graduation marker
pub const GRADUATION_LABEL: &str = "RAYDIUM";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurvePoint {
    pub progress: f64,
    pub price: f64,
}

/// Display price at a progress value (clamped to [0, 100])
pub fn price_at(progress: f64) -> f64 {
    let progress = if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, MAX_PROGRESS)
    };
    BASE_PRICE * GROWTH_FACTOR.powf(progress)
}

/// Sampled curve from 0 to 100 inclusive
pub fn curve_points() -> Vec<CurvePoint> {
    (0..=MAX_PROGRESS as usize)
        .step_by(SAMPLE_STEP)
        .map(|p| CurvePoint {
            progress: p as f64,
            price: price_at(p as f64),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_curve_sampling() {
        let points = curve_points();
        assert_eq!(points.len(), 51);
        assert_eq!(points[0].progress, 0.0);
        assert_eq!(points[50].progress, 100.0);
        assert_relative_eq!(points[0].price, BASE_PRICE);
        assert!(points.windows(2).all(|w| w[1].price > w[0].price));
    }

    #[test]
    fn test_price_at_clamps() {
        assert_relative_eq!(price_at(-5.0), BASE_PRICE);
        assert_relative_eq!(price_at(250.0), price_at(100.0));
        assert_relative_eq!(price_at(100.0), BASE_PRICE * 1.06_f64.powi(100), max_relative = 1e-12);
    }
}

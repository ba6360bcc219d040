#![allow(dead_code)]

use ta_core::Bar;

pub const DAY: i64 = 86_400;
pub const START: i64 = 1_704_067_200;

/// Daily bars with closes `100, 101, ...` and constant volume 1000.
pub fn rising(n: usize) -> Vec<Bar> {
    (0..n)
        .map(|i| {
            let close = 100.0 + i as f64;
            Bar::new(START + i as i64 * DAY, close - 0.5, close + 1.0, close - 1.0, close, 1000.0)
        })
        .collect()
}

/// Daily bars with `high == low == close` everywhere.
pub fn flat(n: usize, price: f64) -> Vec<Bar> {
    (0..n)
        .map(|i| Bar::new(START + i as i64 * DAY, price, price, price, price, 1000.0))
        .collect()
}

/// Deterministic pseudo-random walk with consistent OHLC relationships.
pub fn random_walk(n: usize, seed: u64) -> Vec<Bar> {
    let mut state = seed;
    let mut next = move || {
        // 64-bit LCG, top 53 bits as a unit float
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (state >> 11) as f64 / (1u64 << 53) as f64
    };

    let mut close: f64 = 100.0;
    (0..n)
        .map(|i| {
            let open = close;
            close = (close + (next() - 0.5) * 4.0).max(1.0);
            let high = open.max(close) + next() * 2.0;
            let low = (open.min(close) - next() * 2.0).max(0.5);
            let volume = (next() * 5000.0).floor();
            Bar::new(START + i as i64 * 3600, open, high, low, close, volume)
        })
        .collect()
}

pub fn values(points: &[ta_core::IndicatorPoint]) -> Vec<f64> {
    points.iter().map(|p| p.value).collect()
}

pub fn assert_near(actual: f64, expected: f64, tolerance: f64, context: &str) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "{context}: expected {expected}, got {actual}"
    );
}

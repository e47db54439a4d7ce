//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;
pub mod mock_helpers;

use livechart_rs::ChartEngine;

/// Assert two floats are approximately equal
pub fn assert_float_eq(a: f64, b: f64, epsilon: f64) {
    assert!(
        (a - b).abs() < epsilon,
        "Expected {} to be approximately equal to {} (epsilon: {})",
        a,
        b,
        epsilon
    );
}

/// Run `n` ticks, letting each glide finish before the next
pub fn tick_settled(engine: &mut ChartEngine, n: usize) {
    for _ in 0..n {
        engine.tick();
        engine.settle();
    }
}

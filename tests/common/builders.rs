//! Test data builders for creating test objects

use livechart_rs::{ChartConfig, ChartEngine, SequenceSource};

/// Builder for engines fed by a scripted sequence
pub struct EngineBuilder {
    config: ChartConfig,
    start_ms: f64,
    step_ms: f64,
    values: Vec<f64>,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            config: ChartConfig::default(),
            start_ms: 0.0,
            step_ms: 100.0,
            values: Vec::new(),
        }
    }

    pub fn values(mut self, values: &[f64]) -> Self {
        self.values = values.to_vec();
        self
    }

    pub fn start_ms(mut self, start_ms: f64) -> Self {
        self.start_ms = start_ms;
        self
    }

    pub fn step_ms(mut self, step_ms: f64) -> Self {
        self.step_ms = step_ms;
        self
    }

    pub fn configure(mut self, f: impl FnOnce(&mut ChartConfig)) -> Self {
        f(&mut self.config);
        self
    }

    pub fn build(self) -> ChartEngine {
        ChartEngine::with_source(
            &self.config,
            Box::new(SequenceSource::evenly_spaced(
                self.start_ms,
                self.step_ms,
                &self.values,
            )),
        )
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_builder() {
        let mut engine = EngineBuilder::new().values(&[7.0]).start_ms(50.0).build();
        engine.tick();
        let last = engine.buffer().last().unwrap();
        assert_eq!(last.timestamp_ms, 50.0);
        assert_eq!(last.value, 7.0);
    }
}

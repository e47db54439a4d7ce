//! Test to verify test infrastructure works correctly

mod common;

use common::builders::EngineBuilder;
use common::mock_helpers::scripted_mock;
use livechart_rs::{Point, SampleSource};

#[test]
fn test_infrastructure_setup() {
    let mut engine = EngineBuilder::new().values(&[1.0, 2.0]).build();
    common::tick_settled(&mut engine, 2);
    assert_eq!(engine.buffer().len(), 2);
}

#[test]
fn test_scripted_mock_yields_in_order() {
    let mut mock = scripted_mock(vec![Point::new(0.0, 1.0), Point::new(1.0, 2.0)]);
    assert_eq!(mock.next_sample(), Point::new(0.0, 1.0));
    assert_eq!(mock.next_sample(), Point::new(1.0, 2.0));
    assert_eq!(mock.name(), "source");
}

#[test]
fn test_float_comparison() {
    common::assert_float_eq(1.0, 1.0000001, 0.001);
}

#[test]
#[should_panic]
fn test_float_comparison_fails() {
    common::assert_float_eq(1.0, 2.0, 0.001);
}

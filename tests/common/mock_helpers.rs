//! Mock construction helpers

use livechart_rs::{Point, SampleSource};
use mockall::mock;

mock! {
    pub Source {}

    impl SampleSource for Source {
        fn next_sample(&mut self) -> Point;
    }
}

/// A mock source that yields `samples` in order, then panics if called again
pub fn scripted_mock(samples: Vec<Point>) -> MockSource {
    let mut mock = MockSource::new();
    let mut seq = mockall::Sequence::new();
    for sample in samples {
        mock.expect_next_sample()
            .times(1)
            .in_sequence(&mut seq)
            .return_const(sample);
    }
    mock
}

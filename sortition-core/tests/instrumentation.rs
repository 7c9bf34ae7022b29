//! Tracing spans emitted by run-level sampling operations.

use sortition_core::{
    PairingConfig, UniformSource, build_balanced_pairing, sample_distinct_pairs, select_from_stream,
};
use sortition_test_support::tracing::record;
use tracing::Level;

#[test]
fn stream_span_records_items_seen() {
    let (sample, layer) = record(|| {
        let mut source = UniformSource::from_seed(4);
        select_from_stream(&mut source, 0..250_u32, 3)
    });
    assert_eq!(sample.expect("stream is long enough").len(), 3);

    let span = layer
        .span_named("sampling.select_from_stream")
        .expect("stream span must close");
    assert_eq!(span.fields.get("k").map(String::as_str), Some("3"));
    assert_eq!(span.fields.get("seen").map(String::as_str), Some("250"));
}

#[test]
fn pairing_span_records_vertex_count() {
    let ((), layer) = record(|| {
        let mut source = UniformSource::from_seed(4);
        let vertices: Vec<u8> = (0..6).collect();
        build_balanced_pairing(&mut source, &vertices, 5).expect("target is reachable");
    });
    let span = layer
        .span_named("sampling.build_balanced_pairing")
        .expect("pairing span must close");
    assert_eq!(span.fields.get("vertices").map(String::as_str), Some("6"));
    assert_eq!(span.fields.get("target_edges").map(String::as_str), Some("5"));
}

#[test]
fn exhausted_retries_are_reported_as_errors() {
    let (result, layer) = record(|| {
        let mut source = UniformSource::from_seed(4);
        let config = PairingConfig::builder()
            .with_max_retries(3)
            .build()
            .expect("ceiling is positive");
        sample_distinct_pairs(&mut source, &['a', 'b'], 1, &[('b', 'a')], &config)
    });
    assert!(result.is_err());
    assert!(
        layer
            .events()
            .iter()
            .any(|event| event.level == Level::ERROR && event.fields.contains_key("error")),
        "instrumented error must be logged"
    );
}

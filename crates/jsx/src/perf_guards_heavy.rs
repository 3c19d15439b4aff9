use crate::perf_fixtures::{make_blocks, make_nested_expression};
use crate::traverse::node_count;
use crate::{Node, TransformConfig, transform, transform_with_config};
use std::time::{Duration, Instant};

const LARGE_BLOCKS: usize = 5_000;
// div, span, Text("hello "), Expression(name), img.
const NODES_PER_BLOCK: usize = 5;
const MAX_STEPS_PER_BYTE_LARGE: f64 = 8.0;
const MAX_STEPS_PER_BYTE_ADVERSARIAL: f64 = 4.0;

fn measure_total(input: &str) -> Duration {
    let _ = transform(input);
    let mut total = Duration::ZERO;
    for _ in 0..5 {
        let start = Instant::now();
        let _ = transform(input);
        total += start.elapsed();
    }
    total
}

fn steps_per_byte(input: &str) -> (Node, f64) {
    let (node, stats) =
        transform_with_config(input, &TransformConfig::default()).expect("within limits");
    (node, stats.steps as f64 / input.len() as f64)
}

#[test]
fn perf_guard_large_node_count_and_step_ratio() {
    let input = make_blocks(LARGE_BLOCKS);
    let (node, ratio) = steps_per_byte(&input);
    assert_eq!(
        node_count(&node),
        1 + LARGE_BLOCKS * NODES_PER_BLOCK,
        "unexpected node count for large input"
    );
    assert!(
        ratio <= MAX_STEPS_PER_BYTE_LARGE,
        "step/byte ratio {ratio:.4} exceeded guard {MAX_STEPS_PER_BYTE_LARGE}"
    );
}

#[test]
fn perf_guard_adversarial_inputs_stay_linear() {
    let body = 256 * 1024;
    let inputs = [
        format!("<p>{}", "{".repeat(body)),
        format!("<p>{}</p>", "<a ".repeat(body / 3)),
        format!("<p>{}</p>", "a<1".repeat(body / 3)),
        format!("<p>{}</p>", "'\"`".repeat(body / 3)),
        format!("<p>{}</p>", "<i>{x</i>".repeat(body / 9)),
    ];
    for input in &inputs {
        let (_, ratio) = steps_per_byte(input);
        assert!(
            ratio <= MAX_STEPS_PER_BYTE_ADVERSARIAL,
            "step/byte ratio {ratio:.4} exceeded guard {MAX_STEPS_PER_BYTE_ADVERSARIAL} for {:?}…",
            &input[..16]
        );
    }
}

#[test]
fn perf_guard_deep_nesting_around_large_expression() {
    let input = make_nested_expression(64, 1_100_000);
    let (_, ratio) = steps_per_byte(&input);
    assert!(
        ratio <= MAX_STEPS_PER_BYTE_LARGE,
        "step/byte ratio {ratio:.4} exceeded guard {MAX_STEPS_PER_BYTE_LARGE}"
    );
}

#[test]
fn perf_guard_transform_scales_roughly_linearly() {
    let small = make_blocks(2_000);
    let large = make_blocks(8_000);

    let t_small = measure_total(&small);
    let t_large = measure_total(&large);
    assert!(!t_small.is_zero(), "timer resolution too coarse for test");
    // Generous slack: catches quadratic regressions, not noise.
    assert!(
        t_large <= t_small.saturating_mul(12),
        "expected near-linear scaling; t_small={t_small:?} t_large={t_large:?}"
    );
}

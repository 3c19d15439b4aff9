use crate::perf_fixtures::{make_blocks, make_nested, make_nested_expression};
use crate::traverse::{node_count, tree_depth};
use crate::{TransformConfig, transform_with_config};

const SMOKE_BLOCKS: usize = 512;
// For BLOCK_TEMPLATE: div, span, Text("hello "), Expression(name), img.
const NODES_PER_BLOCK: usize = 5;
const MAX_STEPS_PER_BYTE_SMOKE: f64 = 8.0;

#[test]
fn perf_guard_smoke_node_count_and_step_ratio() {
    let input = make_blocks(SMOKE_BLOCKS);
    let (node, stats) =
        transform_with_config(&input, &TransformConfig::default()).expect("transform");
    assert_eq!(
        node_count(&node),
        1 + SMOKE_BLOCKS * NODES_PER_BLOCK,
        "unexpected node count for smoke input"
    );
    assert_eq!(stats.diagnostics, 0);
    let ratio = stats.steps as f64 / input.len() as f64;
    assert!(
        ratio <= MAX_STEPS_PER_BYTE_SMOKE,
        "step/byte ratio {ratio:.4} exceeded guard {MAX_STEPS_PER_BYTE_SMOKE}"
    );
}

#[test]
fn perf_guard_smoke_nested_within_default_depth() {
    let input = make_nested(64);
    let (node, _) =
        transform_with_config(&input, &TransformConfig::default()).expect("transform");
    assert_eq!(tree_depth(&node), 65);
}

#[test]
fn perf_guard_smoke_deep_nesting_scans_once() {
    let input = make_nested_expression(64, 64 * 1024);
    let (node, stats) =
        transform_with_config(&input, &TransformConfig::default()).expect("transform");
    assert_eq!(tree_depth(&node), 65);
    let ratio = stats.steps as f64 / input.len() as f64;
    assert!(
        ratio <= MAX_STEPS_PER_BYTE_SMOKE,
        "step/byte ratio {ratio:.4} exceeded guard {MAX_STEPS_PER_BYTE_SMOKE}"
    );
}

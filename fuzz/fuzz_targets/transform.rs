#![no_main]

use jsx::traverse::{collect_diagnostics, tree_depth};
use jsx::{RenderConfig, TransformConfig, render, transform_with_config};
use libfuzzer_sys::fuzz_target;

const FUZZ_MAX_DEPTH: usize = 64;
const FUZZ_MAX_STEPS: u64 = 1 << 20;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let config = TransformConfig {
        max_depth: FUZZ_MAX_DEPTH,
        max_steps: FUZZ_MAX_STEPS,
    };
    let Ok((node, stats)) = transform_with_config(input, &config) else {
        return;
    };
    assert!(stats.steps <= FUZZ_MAX_STEPS);
    assert!(tree_depth(&node) <= FUZZ_MAX_DEPTH + 1);
    for diag in collect_diagnostics(&node) {
        assert!(diag.span.start <= diag.span.end && diag.span.end <= input.len());
        assert_eq!(&input[diag.span.start..diag.span.end], diag.fragment);
    }

    let (again, _) = transform_with_config(input, &config).expect("second run must match first");
    assert_eq!(node, again, "transform is not deterministic");
    let rendered = render(&node, &RenderConfig::default());
    assert_eq!(rendered, render(&again, &RenderConfig::default()));
});

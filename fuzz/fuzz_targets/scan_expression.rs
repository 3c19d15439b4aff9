#![no_main]

use jsx::scan::scan_expression;
use jsx::{TransformConfig, TransformContext};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(body) = std::str::from_utf8(data) else {
        return;
    };
    let src = format!("{{{body}");
    let mut ctx = TransformContext::new(TransformConfig {
        max_steps: 1 << 20,
        ..TransformConfig::default()
    });
    if let Ok(Some(found)) = scan_expression(&src, 0, &mut ctx) {
        assert!(found.end <= src.len());
        assert_eq!(src.as_bytes()[found.end - 1], b'}');
        assert!(src.is_char_boundary(found.end));
    }
});

//! Transform entry point: markup string in, call tree out.
//!
//! Each call owns a fresh [`TransformContext`]; nothing is shared between calls.

use crate::attrs::parse_attributes;
use crate::children::parse_children;
use crate::context::{TransformConfig, TransformContext, TransformStats};
use crate::error::{DiagnosticCode, TransformError};
use crate::render::{RenderConfig, render};
use crate::scan::{scan_element, scan_open_tag, starts_markup};
use crate::types::{Element, Node, Span};
use memchr::memrchr;

/// Transform `input` with default limits.
///
/// Malformed markup never fails the call; it is reported inline as
/// [`Node::Diagnostic`] or [`crate::AttributeValue::Malformed`]. Only the
/// step and depth limits produce `Err`.
pub fn transform(input: &str) -> Result<Node, TransformError> {
    transform_with_config(input, &TransformConfig::default()).map(|(node, _)| node)
}

/// Transform `input` with explicit limits, also returning instrumentation.
pub fn transform_with_config(
    input: &str,
    config: &TransformConfig,
) -> Result<(Node, TransformStats), TransformError> {
    let mut ctx = TransformContext::new(config.clone());
    let node = transform_root(input, &mut ctx)?;
    let stats = ctx.stats();
    log::debug!(
        target: "jsx.transform",
        "transformed {} bytes: elements={} expressions={} diagnostics={} steps={} memo_hits={} max_depth={}",
        input.len(),
        stats.elements,
        stats.expressions,
        stats.diagnostics,
        stats.steps,
        stats.memo_hits,
        stats.max_depth_seen
    );
    Ok((node, stats))
}

/// Transform `input` and render it as constructor-call text with default names.
pub fn transform_to_call_text(input: &str) -> Result<String, TransformError> {
    let node = transform(input)?;
    Ok(render(&node, &RenderConfig::default()))
}

fn transform_root(input: &str, ctx: &mut TransformContext) -> Result<Node, TransformError> {
    let start = input.len() - input.trim_start().len();
    let end = input.trim_end().len().max(start);
    let src = &input[..end];
    let whole = Span::new(start, end);

    if !starts_markup(src.as_bytes(), start) {
        let diag = ctx.diagnostic(DiagnosticCode::UnparseableMarkup, src, whole);
        return Ok(Node::Diagnostic(diag));
    }
    match scan_element(src, start, ctx)? {
        Some(root_end) if root_end == end => build_node(src, start, end, ctx),
        Some(root_end) => {
            log::debug!(
                target: "jsx.transform",
                "trailing content after root element: {} bytes",
                end - root_end
            );
            let diag = ctx.diagnostic(DiagnosticCode::UnparseableMarkup, src, whole);
            Ok(Node::Diagnostic(diag))
        }
        None => {
            let diag = ctx.diagnostic(DiagnosticCode::UnterminatedElement, src, whole);
            Ok(Node::Diagnostic(diag))
        }
    }
}

/// Build the node for a complete element or fragment occupying `src[start..end]`.
///
/// `end` must come from a successful [`scan_element`] at `start` over the same
/// `src`, so the opening tag and nested constructs are already measured.
pub(crate) fn build_node(
    src: &str,
    start: usize,
    end: usize,
    ctx: &mut TransformContext,
) -> Result<Node, TransformError> {
    ctx.nested(|ctx| {
        let open = match scan_open_tag(src, start, ctx)? {
            Some(open) if open.gt < end => open,
            _ => {
                let diag = ctx.diagnostic(
                    DiagnosticCode::UnterminatedElement,
                    src,
                    Span::new(start, end),
                );
                return Ok(Node::Diagnostic(diag));
            }
        };

        let children = if open.self_closing {
            Vec::new()
        } else {
            let body_start = open.gt + 1;
            // The closing tag holds the last `<` of the element.
            let body_end = memrchr(b'<', &src.as_bytes()[body_start..end])
                .map_or(body_start, |rel| body_start + rel);
            parse_children(src, body_start, body_end, ctx)?
        };

        if open.is_fragment() {
            return Ok(Node::Fragment(children));
        }

        let (attrs_start, attrs_end) = open.attrs_range();
        let attributes = parse_attributes(src, attrs_start, attrs_end, ctx)?;
        ctx.record_element();
        #[cfg(any(test, feature = "debug-stats"))]
        log::trace!(
            target: "jsx.transform",
            "element <{}> attrs={} children={} depth={}",
            open.name(src),
            attributes.len(),
            children.len(),
            ctx.depth()
        );
        Ok(Node::Element(Element {
            name: open.name(src).to_string(),
            attributes,
            children,
            self_closing: open.self_closing,
            span: Span::new(start, end),
        }))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Attribute, AttributeValue};

    fn element(node: &Node) -> &Element {
        node.as_element()
            .unwrap_or_else(|| panic!("expected element, got: {node:?}"))
    }

    #[test]
    fn self_closing_tag_has_no_children() {
        let node = transform("<div/>").expect("transform");
        let el = element(&node);
        assert_eq!(el.name, "div");
        assert!(el.self_closing);
        assert!(el.attributes.is_empty());
        assert!(el.children.is_empty());
        assert_eq!(el.span, Span::new(0, 6));
    }

    #[test]
    fn attributes_and_children_are_parsed() {
        let node = transform(r#"<input type="text" value={myVar} disabled/>"#).expect("transform");
        let el = element(&node);
        assert_eq!(
            el.attributes,
            vec![
                Attribute::new("type", AttributeValue::Str("text".to_string())),
                Attribute::new("value", AttributeValue::Expr("myVar".to_string())),
                Attribute::new("disabled", AttributeValue::Bool),
            ]
        );
    }

    #[test]
    fn surrounding_whitespace_is_ignored_and_spans_stay_absolute() {
        let node = transform("\n  <p>hi</p>\n").expect("transform");
        let el = element(&node);
        assert_eq!(el.span, Span::new(3, 12));
        assert_eq!(el.children, vec![Node::Text("hi".to_string())]);
    }

    #[test]
    fn fragment_root_becomes_fragment_node() {
        let node = transform("<>Hello Fragment!</>").expect("transform");
        assert_eq!(
            node,
            Node::Fragment(vec![Node::Text("Hello Fragment!".to_string())])
        );
    }

    #[test]
    fn deep_nesting_preserves_structure_and_order() {
        let node = transform("<a><b><c>x</c><d/></b>y</a>").expect("transform");
        let a = element(&node);
        assert_eq!(a.children.len(), 2);
        let b = element(&a.children[0]);
        let names: Vec<_> = b
            .children
            .iter()
            .map(|n| element(n).name.as_str())
            .collect();
        assert_eq!(names, vec!["c", "d"]);
        assert_eq!(element(&b.children[0]).children, vec![Node::Text("x".into())]);
        assert_eq!(a.children[1], Node::Text("y".into()));
    }

    #[test]
    fn closing_tag_with_trailing_whitespace_is_accepted() {
        let node = transform("<p>x</p >").expect("transform");
        assert_eq!(element(&node).children, vec![Node::Text("x".into())]);
    }

    #[test]
    fn non_markup_input_is_unparseable() {
        for input in ["hello", "", "   ", "< p/>", "{x}"] {
            let node = transform(input).expect("transform");
            assert!(
                matches!(&node, Node::Diagnostic(d) if d.code == DiagnosticCode::UnparseableMarkup),
                "input {input:?}, got: {node:?}"
            );
        }
    }

    #[test]
    fn trailing_content_is_unparseable() {
        let node = transform("<a/><b/>").expect("transform");
        let Node::Diagnostic(diag) = node else {
            panic!("expected diagnostic, got: {node:?}");
        };
        assert_eq!(diag.code, DiagnosticCode::UnparseableMarkup);
        assert_eq!(diag.fragment, "<a/><b/>");
    }

    #[test]
    fn unclosed_child_is_scoped_to_its_parent() {
        let node = transform("<div><p>ok</p><span>unclosed</div>").expect("transform");
        let div = element(&node);
        assert_eq!(div.name, "div");
        assert_eq!(div.children.len(), 2, "got: {node:?}");
        assert_eq!(element(&div.children[0]).name, "p");
        let Node::Diagnostic(diag) = &div.children[1] else {
            panic!("expected diagnostic, got: {node:?}");
        };
        assert_eq!(diag.code, DiagnosticCode::UnterminatedElement);
        assert_eq!(diag.fragment, "<span>unclosed");
        assert_eq!(diag.span, Span::new(14, 28));
    }

    #[test]
    fn unterminated_child_expression_is_scoped_to_its_parent() {
        let node = transform("<div><p>ok</p>{oops</div>").expect("transform");
        let div = element(&node);
        assert_eq!(element(&div.children[0]).name, "p");
        assert!(
            matches!(&div.children[1..], [Node::Diagnostic(d)]
                if d.code == DiagnosticCode::UnterminatedExpression && d.fragment == "{oops"),
            "got: {node:?}"
        );
        assert_eq!(
            transform_to_call_text("<div><p>ok</p>{oops</div>").expect("transform"),
            "React.createElement('div', null, React.createElement('p', null, 'ok'), \
             /* error: unterminated expression: \"{oops\" */ null)"
        );
    }

    #[test]
    fn unterminated_attribute_expression_marks_only_that_tag() {
        let node = transform("<div><a b={oops/></div>").expect("transform");
        let div = element(&node);
        let a = element(&div.children[0]);
        assert_eq!(a.name, "a");
        assert!(a.self_closing);
        assert!(
            matches!(a.attributes.as_slice(), [Attribute { name, value: AttributeValue::Malformed(d) }]
                if name == "b" && d.fragment == "b={oops"),
            "got: {node:?}"
        );
    }

    #[test]
    fn deep_nesting_scans_each_byte_a_bounded_number_of_times() {
        let depth = 32;
        let payload = "x".repeat(64 * 1024);
        let input = format!(
            "{}{{{payload}}}{}",
            "<a>".repeat(depth),
            "</a>".repeat(depth)
        );
        let (node, stats) =
            transform_with_config(&input, &TransformConfig::default()).expect("transform");
        let mut leaf = &node;
        for _ in 1..depth {
            leaf = &element(leaf).children[0];
        }
        assert_eq!(element(leaf).children, vec![Node::Expression(payload)]);
        assert!(
            stats.steps <= 2 * input.len() as u64,
            "steps={} bytes={}",
            stats.steps,
            input.len()
        );
    }

    #[test]
    fn unterminated_root_is_reported() {
        let node = transform("<div><span>x</span>").expect("transform");
        assert!(
            matches!(&node, Node::Diagnostic(d) if d.code == DiagnosticCode::UnterminatedElement),
            "got: {node:?}"
        );
    }

    #[test]
    fn malformed_attribute_keeps_children() {
        let node = transform("<a x=1>kept</a>").expect("transform");
        let el = element(&node);
        assert!(matches!(
            el.attributes.as_slice(),
            [Attribute { value: AttributeValue::Malformed(_), .. }]
        ));
        assert_eq!(el.children, vec![Node::Text("kept".into())]);
    }

    #[test]
    fn stats_count_elements_and_expressions() {
        let (_, stats) = transform_with_config(
            "<ul><li>{a}</li><li>{b}</li></ul>",
            &TransformConfig::default(),
        )
        .expect("transform");
        assert_eq!(stats.elements, 3);
        assert_eq!(stats.expressions, 2);
        assert_eq!(stats.diagnostics, 0);
        assert!(stats.max_depth_seen >= 2);
    }

    #[test]
    fn depth_limit_is_fatal() {
        let input = format!("{}{}", "<a>".repeat(40), "</a>".repeat(40));
        let config = TransformConfig {
            max_depth: 16,
            ..TransformConfig::default()
        };
        assert_eq!(
            transform_with_config(&input, &config).map(|(node, _)| node),
            Err(TransformError::DepthLimitExceeded { limit: 16 })
        );
    }

    #[test]
    fn step_limit_is_fatal() {
        let config = TransformConfig {
            max_steps: 10,
            ..TransformConfig::default()
        };
        let result = transform_with_config("<p>{a}{b}{c}{d}{e}{f}</p>", &config);
        assert_eq!(
            result.map(|(node, _)| node),
            Err(TransformError::StepLimitExceeded { limit: 10 })
        );
    }

    #[test]
    fn identical_input_gives_identical_output() {
        let input = r#"<div id="x">Hi {name}<br/><>{a}</></div>"#;
        assert_eq!(transform(input), transform(input));
        assert_eq!(
            transform_to_call_text(input),
            transform_to_call_text(input)
        );
    }
}

pub const BLOCK_TEMPLATE: &str =
    r#"<div className="box"><span>hello {name}</span><img src={url}/></div>"#;

/// `blocks` copies of [`BLOCK_TEMPLATE`] as siblings inside one root `<section>`.
pub fn make_blocks(blocks: usize) -> String {
    let mut jsx = String::with_capacity(BLOCK_TEMPLATE.len() * blocks + 32);
    jsx.push_str("<section>");
    for _ in 0..blocks {
        jsx.push_str(BLOCK_TEMPLATE);
    }
    jsx.push_str("</section>");
    jsx
}

/// `depth` nested `<div>` elements around a single text child.
pub fn make_nested(depth: usize) -> String {
    let mut jsx = String::with_capacity(depth * 11 + 8);
    for _ in 0..depth {
        jsx.push_str("<div>");
    }
    jsx.push_str("leaf");
    for _ in 0..depth {
        jsx.push_str("</div>");
    }
    jsx
}

/// `depth` nested `<a>` elements around one `{...}` child of `payload` bytes.
pub fn make_nested_expression(depth: usize, payload: usize) -> String {
    let mut jsx = String::with_capacity(depth * 7 + payload + 2);
    for _ in 0..depth {
        jsx.push_str("<a>");
    }
    jsx.push('{');
    jsx.extend(std::iter::repeat_n('x', payload));
    jsx.push('}');
    for _ in 0..depth {
        jsx.push_str("</a>");
    }
    jsx
}

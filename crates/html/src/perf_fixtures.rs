//! Synthetic inputs for benchmarks and scaling tests.

pub const BLOCK_TEMPLATE: &str =
    r#"<div class="box"><span title="a &amp; b">hello</span><img src="x.png" alt=""></div>"#;

pub const STYLE_RULE_TEMPLATE: &str = "p.note { color: red; margin: 0 auto; }\n";

/// `blocks` copies of [`BLOCK_TEMPLATE`], valid for the parser.
pub fn make_blocks(blocks: usize) -> String {
    BLOCK_TEMPLATE.repeat(blocks)
}

/// A `<style>` element holding `rules` copies of [`STYLE_RULE_TEMPLATE`].
pub fn make_style_sheet(rules: usize) -> String {
    let mut html = String::with_capacity(STYLE_RULE_TEMPLATE.len() * rules + 15);
    html.push_str("<style>");
    html.push_str(&STYLE_RULE_TEMPLATE.repeat(rules));
    html.push_str("</style>");
    html
}

/// `depth` nested `<div>` elements around one text node.
pub fn make_nested(depth: usize) -> String {
    format!("{}x{}", "<div>".repeat(depth), "</div>".repeat(depth))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    #[test]
    fn fixtures_parse_cleanly() {
        for source in [make_blocks(3), make_style_sheet(3), make_nested(50)] {
            let result = parse(&source);
            assert!(result.is_ok(), "{:?}", result.error);
        }
    }

    #[test]
    fn node_count_scales_with_blocks() {
        let one = parse(&make_blocks(1)).document.len();
        let ten = parse(&make_blocks(10)).document.len();
        assert_eq!(one, 4);
        assert_eq!(ten, 10 * one);
    }
}

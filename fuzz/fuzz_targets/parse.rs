#![no_main]

use html::{Node, Span, parse};
use libfuzzer_sys::fuzz_target;

fn check_span(source: &str, span: Span) {
    assert!(span.start <= span.end, "inverted span {span}");
    assert!(span.end <= source.len(), "span {span} past end of input");
    assert!(
        source.is_char_boundary(span.start) && source.is_char_boundary(span.end),
        "span {span} splits a char"
    );
}

fuzz_target!(|data: &[u8]| {
    let Ok(source) = std::str::from_utf8(data) else {
        return;
    };
    let result = parse(source);

    if let Some(doctype) = result.document.doctype() {
        check_span(source, doctype);
    }
    for (_, _, node) in result.document.descendants() {
        match node {
            Node::Element(element) => {
                check_span(source, element.open_tag);
                if let Some(close) = element.close_tag {
                    check_span(source, close);
                    assert!(element.open_tag.end <= close.start);
                }
                for attr in &element.attributes {
                    check_span(source, attr.name_span);
                    if let Some(value) = attr.value_span {
                        check_span(source, value);
                    }
                }
            }
            Node::Text(text) => {
                check_span(source, text.span);
                for rule in text.css_rules.iter().flatten() {
                    check_span(source, rule.selector);
                    check_span(source, rule.declarations.span());
                }
            }
            Node::Comment(comment) => check_span(source, comment.span),
        }
    }
    if let Some(error) = &result.error {
        for span in error.highlights() {
            check_span(source, span);
        }
    }
});

use super::parse;
use crate::error::{ErrorKind, ParseError};
use crate::types::{Document, Element, Node, ParseResult};
use tools::Span;

fn parse_ok(source: &str) -> Document {
    let ParseResult { document, error } = parse(source);
    assert_eq!(error, None, "unexpected error for {source:?}");
    document
}

fn parse_err(source: &str) -> (Document, ParseError) {
    let ParseResult { document, error } = parse(source);
    let error = error.unwrap_or_else(|| panic!("expected an error for {source:?}"));
    (document, error)
}

fn top_element(document: &Document, index: usize) -> &Element {
    document
        .node(document.children()[index])
        .as_element()
        .expect("element")
}

fn child<'d>(document: &'d Document, element: &Element, index: usize) -> &'d Node {
    document.node(element.children[index])
}

#[test]
fn paragraph_with_attribute_and_text() {
    let document = parse_ok(r#"<p class="foo">hello there</p>"#);
    assert_eq!(document.children().len(), 1);

    let p = top_element(&document, 0);
    assert_eq!(p.name, "p");
    assert_eq!(p.open_tag, Span::new(0, 15));
    assert_eq!(p.close_tag, Some(Span::new(26, 30)));

    let class = p.attribute("class").expect("class");
    assert_eq!(class.value, "foo");
    assert_eq!(class.name_span, Span::new(3, 8));
    assert_eq!(class.value_span, Some(Span::new(9, 14)));

    let text = child(&document, p, 0).as_text().expect("text");
    assert_eq!(text.value, "hello there");
    assert_eq!(text.span, Span::new(15, 26));
    assert!(text.css_rules.is_none());
}

#[test]
fn empty_input_is_an_empty_document() {
    let document = parse_ok("");
    assert!(document.is_empty());
    assert!(document.children().is_empty());
    assert_eq!(document.doctype(), None);
}

#[test]
fn plain_text_is_one_node() {
    let document = parse_ok("just text");
    let text = document.node(document.children()[0]).as_text().expect("text");
    assert_eq!(text.value, "just text");
    assert_eq!(text.span, Span::new(0, 9));
}

#[test]
fn nested_elements_keep_source_order() {
    let document = parse_ok("<div><p>a</p><p>b</p></div>");
    let div = top_element(&document, 0);
    assert_eq!(div.children.len(), 2);
    let texts: Vec<_> = div
        .children
        .iter()
        .map(|&id| {
            let p = document.node(id).as_element().expect("p");
            child(&document, p, 0).as_text().expect("text").value.clone()
        })
        .collect();
    assert_eq!(texts, vec!["a", "b"]);
}

#[test]
fn unclosed_element_is_reported_with_partial_tree() {
    let (document, error) = parse_err("<p>hi");
    assert_eq!(
        error,
        ParseError::UnclosedTag {
            name: "p".into(),
            open_tag: Span::new(0, 3)
        }
    );
    let p = top_element(&document, 0);
    assert_eq!(p.close_tag, None);
    assert_eq!(child(&document, p, 0).as_text().expect("text").value, "hi");
}

#[test]
fn unclosed_tag_names_innermost_element() {
    let (_, error) = parse_err("<div><p>x</p><em>y");
    assert_eq!(
        error,
        ParseError::UnclosedTag {
            name: "em".into(),
            open_tag: Span::new(13, 17)
        }
    );
}

#[test]
fn whitespace_before_tag_name_is_invalid() {
    let (_, error) = parse_err("< p>");
    assert_eq!(
        error,
        ParseError::InvalidTagName {
            name: " p".into(),
            span: Span::new(1, 3)
        }
    );
}

#[test]
fn unknown_and_uppercase_tag_names_are_invalid() {
    let (_, error) = parse_err("<foo>");
    assert_eq!(error.kind(), ErrorKind::InvalidTagName);

    let (_, error) = parse_err("<P>x</P>");
    assert_eq!(
        error,
        ParseError::InvalidTagName {
            name: "P".into(),
            span: Span::new(1, 2)
        }
    );
}

#[test]
fn lone_angle_bracket_is_an_empty_invalid_name() {
    let (document, error) = parse_err("a < b");
    assert_eq!(
        error,
        ParseError::InvalidTagName {
            name: " b".into(),
            span: Span::new(3, 5)
        }
    );
    assert_eq!(document.children().len(), 1);

    let (_, error) = parse_err("abc<");
    assert_eq!(
        error,
        ParseError::InvalidTagName {
            name: String::new(),
            span: Span::empty_at(4)
        }
    );
}

#[test]
fn close_tag_must_match_innermost_element() {
    let (document, error) = parse_err("<p><b></p>");
    assert_eq!(
        error,
        ParseError::MismatchedCloseTag {
            open_name: "b".into(),
            open_tag: Span::new(3, 6),
            close_name: "p".into(),
            close_tag: Span::new(6, 9),
        }
    );
    let p = top_element(&document, 0);
    assert_eq!(p.children.len(), 1);
}

#[test]
fn close_tag_at_top_level_is_unexpected() {
    let (_, error) = parse_err("</p>");
    assert_eq!(
        error,
        ParseError::UnexpectedCloseTag {
            name: "p".into(),
            close_tag: Span::new(0, 3)
        }
    );
}

#[test]
fn close_tag_name_is_case_insensitive_and_may_have_whitespace() {
    let document = parse_ok("<p>x</P>");
    assert_eq!(top_element(&document, 0).close_tag, Some(Span::new(4, 8)));

    let document = parse_ok("<p>x</ p >");
    assert_eq!(top_element(&document, 0).close_tag, Some(Span::new(4, 10)));
}

#[test]
fn unterminated_close_tag() {
    let (_, error) = parse_err("<p></p");
    assert_eq!(
        error,
        ParseError::UnterminatedCloseTag {
            name: "p".into(),
            close_tag: Span::new(3, 6)
        }
    );
}

#[test]
fn close_tag_with_trailing_garbage_is_unterminated() {
    let (document, error) = parse_err("<p></p x>");
    assert_eq!(
        error,
        ParseError::UnterminatedCloseTag {
            name: "p".into(),
            close_tag: Span::new(3, 7)
        }
    );
    assert_eq!(top_element(&document, 0).close_tag, None);
}

#[test]
fn unterminated_open_tag() {
    let (document, error) = parse_err("<p class");
    assert_eq!(
        error,
        ParseError::UnterminatedOpenTag {
            name: "p".into(),
            open_tag: Span::new(0, 8)
        }
    );
    assert_eq!(document.len(), 1);

    let (_, error) = parse_err("<p data-x=\"1\">");
    assert_eq!(
        error,
        ParseError::UnterminatedOpenTag {
            name: "p".into(),
            open_tag: Span::new(0, 7)
        }
    );
}

#[test]
fn void_elements_take_no_children() {
    let document = parse_ok(r#"<br><img src="x.png">text"#);
    assert_eq!(document.children().len(), 3);

    let br = top_element(&document, 0);
    assert_eq!(br.name, "br");
    assert_eq!(br.open_tag, Span::new(0, 4));
    assert!(br.children.is_empty());
    assert_eq!(br.close_tag, None);

    let img = top_element(&document, 1);
    assert_eq!(img.open_tag, Span::new(4, 21));
    assert_eq!(img.attribute("src").map(|a| a.value.as_str()), Some("x.png"));

    let text = document.node(document.children()[2]).as_text().expect("text");
    assert_eq!(text.span, Span::new(21, 25));
}

#[test]
fn void_element_close_tag_is_unexpected() {
    let (_, error) = parse_err("<br></br>");
    assert_eq!(error.kind(), ErrorKind::UnexpectedCloseTag);
}

#[test]
fn boolean_attribute_has_empty_value_and_no_value_span() {
    let document = parse_ok("<input disabled>");
    let input = top_element(&document, 0);
    let disabled = input.attribute("disabled").expect("disabled");
    assert_eq!(disabled.value, "");
    assert_eq!(disabled.name_span, Span::new(7, 15));
    assert_eq!(disabled.value_span, None);
}

#[test]
fn attribute_names_are_lowercased_and_whitespace_around_equals_is_allowed() {
    let document = parse_ok(r#"<p CLASS = "a" hidden id="b"></p>"#);
    let p = top_element(&document, 0);
    let names: Vec<_> = p.attributes.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["class", "hidden", "id"]);
    assert_eq!(p.attributes[0].name_span, Span::new(3, 8));
    assert_eq!(p.attributes[0].value_span, Some(Span::new(11, 14)));
}

#[test]
fn duplicate_attribute_last_value_wins() {
    let document = parse_ok(r#"<p id="a" id="b"></p>"#);
    let p = top_element(&document, 0);
    assert_eq!(p.attributes.len(), 1);
    assert_eq!(p.attributes[0].value, "b");
}

#[test]
fn unquoted_attribute_value() {
    let (_, error) = parse_err("<p class=foo>");
    assert_eq!(error, ParseError::UnquotedAttrValue { position: 9 });

    let (_, error) = parse_err("<p class='foo'>");
    assert_eq!(error, ParseError::UnquotedAttrValue { position: 9 });
}

#[test]
fn unterminated_attribute_value() {
    let (_, error) = parse_err(r#"<p class="foo>"#);
    assert_eq!(
        error,
        ParseError::UnterminatedAttrValue {
            element: "p".into(),
            open_tag: Span::new(0, 14),
            attribute: "class".into(),
            attribute_span: Span::new(3, 8),
            value_start: 9,
        }
    );
}

#[test]
fn entities_are_decoded_in_text_and_attribute_values() {
    let document = parse_ok(r#"<p title="&quot;a&quot;">&lt;b&gt; &AMP; &nbsp;</p>"#);
    let p = top_element(&document, 0);
    assert_eq!(p.attribute("title").expect("title").value, "\"a\"");
    let text = child(&document, p, 0).as_text().expect("text");
    assert_eq!(text.value, "<b> & &nbsp;");
    assert_eq!(text.span, Span::new(25, 47));
}

#[test]
fn spans_are_byte_offsets() {
    let document = parse_ok("<p>héllo</p>");
    let p = top_element(&document, 0);
    assert_eq!(child(&document, p, 0).as_text().expect("text").span, Span::new(3, 9));
    assert_eq!(p.close_tag, Some(Span::new(9, 13)));
}

#[test]
fn comments_keep_raw_data() {
    let document = parse_ok("<!-- <p> &amp; -->x");
    let comment = document
        .node(document.children()[0])
        .as_comment()
        .expect("comment");
    assert_eq!(comment.data, " <p> &amp; ");
    assert_eq!(comment.span, Span::new(0, 18));
    assert_eq!(document.children().len(), 2);
}

#[test]
fn unterminated_comment() {
    let (document, error) = parse_err("a<!-- b");
    assert_eq!(error, ParseError::UnterminatedComment { start: 1 });
    assert_eq!(document.children().len(), 1);
}

#[test]
fn doctype_is_recognized_only_at_start() {
    let document = parse_ok("<!doctype HTML><p></p>");
    assert_eq!(document.doctype(), Some(Span::new(0, 15)));
    assert_eq!(document.children().len(), 1);

    let (_, error) = parse_err(" <!DOCTYPE html>");
    assert_eq!(
        error,
        ParseError::InvalidTagName {
            name: String::new(),
            span: Span::empty_at(2)
        }
    );
}

#[test]
fn style_content_becomes_text_with_rules() {
    let source = "<style>p { color: red; }</style>";
    let document = parse_ok(source);
    let style = top_element(&document, 0);
    assert_eq!(style.open_tag, Span::new(0, 7));
    assert_eq!(style.close_tag, Some(Span::new(24, 32)));

    let text = child(&document, style, 0).as_text().expect("text");
    assert_eq!(text.value, "p { color: red; }");
    assert_eq!(text.span, Span::new(7, 24));
    let rules = text.css_rules.as_ref().expect("rules");
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].selector, Span::new(7, 8));
    assert_eq!(rules[0].declarations.span(), Span::new(9, 24));
    let decl = &rules[0].declarations.properties[0];
    assert_eq!(decl.name, Span::new(11, 16));
    assert_eq!(decl.value, Span::new(18, 21));
}

#[test]
fn style_content_is_not_entity_decoded() {
    let document = parse_ok("<style>p{content:&amp;}</style>");
    let style = top_element(&document, 0);
    let text = child(&document, style, 0).as_text().expect("text");
    assert_eq!(text.value, "p{content:&amp;}");
}

#[test]
fn empty_style_has_no_text_child() {
    let document = parse_ok("<style></style>");
    assert!(top_element(&document, 0).children.is_empty());

    let document = parse_ok("<style> </style>");
    let style = top_element(&document, 0);
    let text = child(&document, style, 0).as_text().expect("text");
    assert_eq!(text.css_rules.as_deref(), Some(&[][..]));
}

#[test]
fn unknown_css_property_aborts_the_parse() {
    let (document, error) = parse_err("<style>p { colr: red; }</style>");
    assert_eq!(
        error,
        ParseError::InvalidCssPropertyName {
            name: "colr".into(),
            span: Span::new(11, 15)
        }
    );
    let style = top_element(&document, 0);
    let text = child(&document, style, 0).as_text().expect("text");
    assert_eq!(text.value, "p { colr");
    assert_eq!(text.span, Span::new(7, 15));
    assert_eq!(text.css_rules.as_deref(), Some(&[][..]));
}

#[test]
fn css_error_keeps_rules_parsed_before_it() {
    let source = "<style>h1{color:red} p{colr:x}</style>";
    let (document, error) = parse_err(source);
    assert_eq!(
        error,
        ParseError::InvalidCssPropertyName {
            name: "colr".into(),
            span: Span::new(23, 27)
        }
    );

    let style = top_element(&document, 0);
    assert_eq!(style.children.len(), 1);
    assert_eq!(style.close_tag, None);
    let text = child(&document, style, 0).as_text().expect("text");
    assert_eq!(text.span, Span::new(7, 27));
    let rules = text.css_rules.as_deref().expect("rules");
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].selector.slice(source), Some("h1"));
    assert_eq!(rules[0].declarations.properties.len(), 1);
}

#[test]
fn css_selector_error_names_style_element() {
    let (_, error) = parse_err("<style>{color:red}</style>");
    assert_eq!(
        error,
        ParseError::InvalidCssSelectorName {
            element: "style".into(),
            open_tag: Span::new(0, 7),
            span: Span::empty_at(7),
        }
    );
}

#[test]
fn css_errors_map_to_html_taxonomy() {
    let cases = [
        ("<style>p</style>", ErrorKind::MissingCssBlockOpener),
        ("<style>p{color red}</style>", ErrorKind::InvalidCssDeclaration),
        ("<style>p{color:red</style>", ErrorKind::InvalidCssRule),
        ("<style>p{Color:red}</style>", ErrorKind::InvalidCssPropertyName),
    ];
    for (source, kind) in cases {
        let (_, error) = parse_err(source);
        assert_eq!(error.kind(), kind, "{source}");
    }
}

#[test]
fn error_leaves_everything_before_it_in_the_tree() {
    let (document, error) = parse_err("<div><p>ok</p><foo>");
    assert_eq!(error.kind(), ErrorKind::InvalidTagName);
    let div = top_element(&document, 0);
    assert_eq!(div.children.len(), 1);
    assert_eq!(div.close_tag, None);
}

#[test]
fn node_at_finds_innermost_node() {
    let document = parse_ok("<div><p>hi</p></div>");
    let div_id = document.children()[0];
    let div = document.node(div_id).as_element().expect("div");
    let p_id = div.children[0];
    let p = document.node(p_id).as_element().expect("p");
    let text_id = p.children[0];

    assert_eq!(document.node_at(0), Some(div_id));
    assert_eq!(document.node_at(5), Some(p_id));
    assert_eq!(document.node_at(8), Some(text_id));
    assert_eq!(document.node_at(11), Some(p_id));
    assert_eq!(document.node_at(16), Some(div_id));
    assert_eq!(document.node_at(20), None);
}

#[test]
fn extent_of_unclosed_element_runs_to_last_descendant() {
    let (document, _) = parse_err("<div><p>hi");
    assert_eq!(document.extent(document.children()[0]), Span::new(0, 10));
}

#[test]
fn descendants_walk_in_document_order() {
    let document = parse_ok("<ul><li>a</li><li>b</li></ul>");
    let walk: Vec<_> = document
        .descendants()
        .map(|(_, depth, node)| match node {
            Node::Element(e) => format!("{depth}:{}", e.name),
            Node::Text(t) => format!("{depth}:{:?}", t.value),
            Node::Comment(_) => format!("{depth}:comment"),
        })
        .collect();
    assert_eq!(
        walk,
        vec!["0:ul", "1:li", "2:\"a\"", "1:li", "2:\"b\""]
    );
}

#[test]
fn results_can_cross_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ParseResult>();

    let handle = std::thread::spawn(|| parse("<p>moved</p>"));
    let result = handle.join().expect("parser thread");
    assert!(result.is_ok());
}

use super::*;

#[test]
fn test_document() {
    let i = r#"<!DOCTYPE html>
<html lang="en">
    <head>
        <meta charset="utf-8"/>
        <title>The minimal, valid HTML5 document</title>
    </head>
    <body>
        <!-- User-visible content goes in the body -->
        <p>Some paragraph</p>
        Some untagged text
    </body>
</html>"#;
    let target = DOMElement::new(
        "html",
        Some(attributes!("lang" => "en")),
        vec![
            DOMElement::new(
                "head",
                None,
                vec![
                    DOMElement::new("meta", Some(attributes!("charset" => "utf-8")), vec![]).into(),
                    DOMElement::new(
                        "title",
                        None,
                        vec!["The minimal, valid HTML5 document".into()],
                    )
                    .into(),
                ],
            )
            .into(),
            DOMElement::new(
                "body",
                None,
                vec![
                    " ".into(),
                    DOMElement::new("p", None, vec!["Some paragraph".into()]).into(),
                    "\n        Some untagged text\n    ".into(),
                ],
            )
            .into(),
        ],
    );
    let doc = document(i);
    assert_eq!(doc.document_element(), Some(&target));
    assert_eq!(doc, Document::from_contents(vec![target.into()]));
}

#[test]
fn test_void_and_implied_end_tags() {
    let doc = document("<ul><li>one<li>two<img src=a.png><li>three</ul><p>first<p>second<div>block</div>");
    let items: Vec<String> = doc
        .query_selector_all("ul li")
        .unwrap()
        .iter()
        .map(|li| li.text_content())
        .collect();
    assert_eq!(items, vec!["one", "two", "three"]);

    let second = doc.query_selector_all("li").unwrap()[1];
    assert_eq!(second.get_elements_by_name("img", false).len(), 1);

    // A block element closes the open paragraph instead of nesting in it
    assert_eq!(doc.query_selector_all("p").unwrap().len(), 2);
    assert!(doc.query_selector("p div").unwrap().is_none());
}

#[test]
fn test_nested_lists_keep_their_items() {
    let doc = document("<ul><li>outer<ul><li>inner</li></ul></li><li>after</li></ul>");
    assert_eq!(doc.query_selector_all("ul > li").unwrap().len(), 3);
    assert_eq!(doc.query_selector_all("li li").unwrap().len(), 1);
}

#[test]
fn test_parse_malformed() {
    // Stray close tags are dropped and unclosed elements closed at the end
    let doc = document("<html></closing><opening><b>bold</html>");
    let html = doc.document_element().unwrap();
    assert_eq!(html.get_elements_by_name("opening", false).len(), 1);
    assert_eq!(html.text_content(), "bold");

    let doc = document("<---></--->");
    assert_eq!(doc.descendants().count(), 0);
    assert_eq!(doc.root().text_content(), "<---></--->");

    let doc = document("<section id=open><li>never closed");
    assert_eq!(
        doc.get_element_by_id("open").map(|e| e.text_content()),
        Some("never closed".to_string())
    );
}

#[test]
fn test_queries() {
    let doc = document(
        r##"<header class="top hero">
            <canvas id="header-particles" aria-hidden="true"></canvas>
            <h1> Jane &amp; Co </h1>
            <nav><a href="#x">x</a><span><a href="#y">y</a></span></nav>
        </header>
        <main><h1>Not in header</h1><a id="x">target</a></main>"##,
    );
    let header = doc.query_selector("header").unwrap().unwrap();
    assert!(header.has_class("hero"));
    assert!(!header.has_class("her"));

    let canvas = doc.query_selector("header #header-particles").unwrap().unwrap();
    assert_eq!(canvas.name, "canvas");
    assert_eq!(canvas.get_attribute("aria-hidden"), Some("true"));

    let h1 = doc.query_selector("header h1").unwrap().unwrap();
    assert_eq!(h1.text_content().trim(), "Jane & Co");
    assert_eq!(doc.get_elements_by_name("h1").len(), 2);

    assert_eq!(doc.query_selector_all("header nav a").unwrap().len(), 2);
    assert_eq!(doc.query_selector_all("nav > a").unwrap().len(), 1);
    assert_eq!(doc.query_selector_all("a[id]").unwrap().len(), 1);
    assert!(doc.get_element_by_id("x").is_some());
    assert!(doc.get_element_by_id("y").is_none());
    assert!(doc.query_selector("main nav").unwrap().is_none());
    assert!(doc.query_selector("nav >").is_err());
}

#[test]
fn test_descendants_in_document_order() {
    let doc = document("<div id=a><p id=b><i id=c></i></p><p id=d></p></div><div id=e></div>");
    let ids: Vec<&str> = doc.descendants().filter_map(|e| e.id()).collect();
    assert_eq!(ids, vec!["a", "b", "c", "d", "e"]);
}

#[test]
fn test_whitespace_between_inline_elements() {
    let doc = document(
        "<html> <head> <title>t</title> </head>\n<body>\n  <h1><span>Luke</span>\n   <span>Withey</span></h1>\n</body></html>",
    );
    let h1 = doc.query_selector("h1").unwrap().unwrap();
    assert_eq!(h1.text_content(), "Luke Withey");

    // Inter-tag runs in html and head are dropped, a run in body collapses to one space
    let html = doc.document_element().unwrap();
    assert_eq!(html.contents.len(), 2);
    assert_eq!(html.children().next().unwrap().contents.len(), 1);
    let body = html.get_elements_by_name("body", false)[0];
    assert_eq!(body.contents[0], DOMContent::Text(" ".to_string()));
    assert_eq!(body.contents.len(), 3);
}

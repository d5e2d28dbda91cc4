use super::{ensure, select, select_one, Check, CheckResult, Violation};
use crate::page::Page;

const GROUP: &str = "Page structure";

pub const FULL_NAME: &str = "Luke Withey";
pub const ROLE_KEYWORD: &str = "Product";
pub const CANVAS_ID: &str = "header-particles";
pub const MIN_NAV_LINKS: usize = 3;

pub static CHECKS: &[Check] = &[
    Check {
        group: GROUP,
        name: "page title contains the full name",
        run: title_has_name,
    },
    Check {
        group: GROUP,
        name: "h1 contains the full name",
        run: heading_has_name,
    },
    Check {
        group: GROUP,
        name: "h2 contains job title",
        run: subheading_has_role,
    },
    Check {
        group: GROUP,
        name: "profile image is present with a src",
        run: profile_image_has_src,
    },
    Check {
        group: GROUP,
        name: "profile image has alt text",
        run: profile_image_has_alt,
    },
    Check {
        group: GROUP,
        name: "career section exists",
        run: career_exists,
    },
    Check {
        group: GROUP,
        name: "patents section exists",
        run: patents_exists,
    },
    Check {
        group: GROUP,
        name: "certificates section exists",
        run: certificates_exists,
    },
    Check {
        group: GROUP,
        name: "canvas animation element is inside the header",
        run: canvas_in_header,
    },
    Check {
        group: GROUP,
        name: "canvas has aria-hidden for accessibility",
        run: canvas_is_aria_hidden,
    },
    Check {
        group: GROUP,
        name: "nav contains at least 3 social icon links",
        run: nav_has_links,
    },
    Check {
        group: GROUP,
        name: "career section contains at least one entry",
        run: career_has_entries,
    },
    Check {
        group: GROUP,
        name: "patents section contains at least one entry",
        run: patents_have_entries,
    },
];

fn text_contains(page: &Page, selector: &str, needle: &str) -> CheckResult {
    let text = select_one(page, selector)?.text_content();
    let text = text.trim();
    ensure(
        text.contains(needle),
        &format!("`{}` text containing {:?}", selector, needle),
        || format!("{:?}", text),
    )
}

fn title_has_name(page: &Page) -> CheckResult {
    text_contains(page, "title", FULL_NAME)
}

fn heading_has_name(page: &Page) -> CheckResult {
    text_contains(page, "header h1", FULL_NAME)
}

fn subheading_has_role(page: &Page) -> CheckResult {
    text_contains(page, "header h2", ROLE_KEYWORD)
}

fn profile_image_attribute(page: &Page, attribute: &str) -> CheckResult {
    let img = select_one(page, "header img")?;
    let value = img.get_attribute(attribute);
    ensure(
        value.map_or(false, |v| !v.is_empty()),
        &format!("a non-empty {} on the header image", attribute),
        || match value {
            Some(_) => "an empty value".to_string(),
            None => "no attribute".to_string(),
        },
    )
}

fn profile_image_has_src(page: &Page) -> CheckResult {
    profile_image_attribute(page, "src")
}

fn profile_image_has_alt(page: &Page) -> CheckResult {
    profile_image_attribute(page, "alt")
}

fn section_exists(page: &Page, id: &str) -> CheckResult {
    ensure(
        page.document().get_element_by_id(id).is_some(),
        &format!("an element with id {:?}", id),
        || "none".to_string(),
    )
}

fn career_exists(page: &Page) -> CheckResult {
    section_exists(page, "career")
}

fn patents_exists(page: &Page) -> CheckResult {
    section_exists(page, "patents")
}

fn certificates_exists(page: &Page) -> CheckResult {
    section_exists(page, "certificates")
}

fn canvas_in_header(page: &Page) -> CheckResult {
    let canvas = select_one(page, &format!("header #{}", CANVAS_ID))?;
    ensure(canvas.name == "canvas", "a canvas element", || {
        format!("<{}>", canvas.name)
    })
}

fn canvas_is_aria_hidden(page: &Page) -> CheckResult {
    let canvas = select_one(page, &format!("#{}", CANVAS_ID))?;
    let hidden = canvas.get_attribute("aria-hidden");
    ensure(hidden == Some("true"), "aria-hidden=\"true\"", || {
        format!("{:?}", hidden)
    })
}

fn nav_has_links(page: &Page) -> CheckResult {
    let count = select(page, "header nav a")?.len();
    ensure(
        count >= MIN_NAV_LINKS,
        &format!("at least {} links in the header nav", MIN_NAV_LINKS),
        || format!("{}", count),
    )
}

fn has_entries(page: &Page, section: &str) -> CheckResult {
    let selector = format!("#{} li", section);
    if select(page, &selector)?.is_empty() {
        return Err(Violation::new(
            format!("at least one `{}`", selector),
            "none",
        ));
    }
    Ok(())
}

fn career_has_entries(page: &Page) -> CheckResult {
    has_entries(page, "career")
}

fn patents_have_entries(page: &Page) -> CheckResult {
    has_entries(page, "patents")
}

#[cfg(test)]
mod tests {
    use super::*;

    static HEADER: &str = r#"
        <head><title>Luke Withey | Portfolio</title></head>
        <header>
            <canvas id="header-particles" aria-hidden="true"></canvas>
            <img src="images/luke.jpg" alt="Portrait">
            <h1>
                Luke Withey
            </h1>
            <h2>Senior Product Manager</h2>
            <nav><a href="https://a">a</a><a href="https://b">b</a><a href="https://c">c</a></nav>
        </header>"#;

    fn page(markup: &str) -> Page {
        Page::from_sources(markup, "")
    }

    #[test]
    fn test_header_content() {
        let p = page(HEADER);
        assert_eq!(title_has_name(&p), Ok(()));
        assert_eq!(heading_has_name(&p), Ok(()));
        assert_eq!(subheading_has_role(&p), Ok(()));
        assert_eq!(profile_image_has_src(&p), Ok(()));
        assert_eq!(profile_image_has_alt(&p), Ok(()));
        assert_eq!(canvas_in_header(&p), Ok(()));
        assert_eq!(canvas_is_aria_hidden(&p), Ok(()));
        assert_eq!(nav_has_links(&p), Ok(()));
    }

    #[test]
    fn test_name_split_across_inline_elements() {
        let p = page(
            "<header><h1><span>Luke</span> <span>Withey</span></h1>\n\
             <h2><em>Senior</em> <strong>Product</strong> Manager</h2></header>",
        );
        assert_eq!(heading_has_name(&p), Ok(()));
        assert_eq!(subheading_has_role(&p), Ok(()));
    }

    #[test]
    fn test_heading_outside_header_does_not_count() {
        let p = page("<main><h1>Luke Withey</h1></main><header><h1>Someone</h1></header>");
        assert_eq!(
            heading_has_name(&p),
            Err(Violation::new(
                "`header h1` text containing \"Luke Withey\"",
                "\"Someone\""
            ))
        );
    }

    #[test]
    fn test_profile_image() {
        let p = page(r#"<header><img src="" ></header>"#);
        assert_eq!(
            profile_image_has_src(&p).unwrap_err().observed,
            "an empty value"
        );
        assert_eq!(profile_image_has_alt(&p).unwrap_err().observed, "no attribute");

        let p = page(r#"<img src="a.jpg" alt="outside">"#);
        assert_eq!(
            profile_image_has_src(&p),
            Err(Violation::new("an element matching `header img`", "none"))
        );
    }

    #[test]
    fn test_canvas() {
        let p = page(r#"<header><div id="header-particles" aria-hidden="false"></div></header>"#);
        assert_eq!(canvas_in_header(&p).unwrap_err().observed, "<div>");
        assert_eq!(
            canvas_is_aria_hidden(&p).unwrap_err().observed,
            "Some(\"false\")"
        );

        // Outside the header is enough for the aria check, not for placement
        let p = page(r#"<canvas id="header-particles" aria-hidden="true"></canvas><header></header>"#);
        assert!(canvas_in_header(&p).is_err());
        assert_eq!(canvas_is_aria_hidden(&p), Ok(()));
    }

    #[test]
    fn test_nav_links() {
        let p = page("<header><nav><a>a</a><a>b</a></nav></header><nav><a>c</a></nav>");
        assert_eq!(nav_has_links(&p).unwrap_err().observed, "2");
    }

    #[test]
    fn test_sections() {
        let p = page(
            r#"<section id="career"><ul><li>Job</li></ul></section>
               <section id="patents"><ul></ul></section>"#,
        );
        assert_eq!(career_exists(&p), Ok(()));
        assert_eq!(patents_exists(&p), Ok(()));
        assert!(certificates_exists(&p).is_err());
        assert_eq!(career_has_entries(&p), Ok(()));
        assert_eq!(
            patents_have_entries(&p),
            Err(Violation::new("at least one `#patents li`", "none"))
        );
    }
}

use css::{hex_colors, WidthBound};
use std::collections::HashSet;

use super::{ensure, Check, CheckResult, Violation};
use crate::page::Page;

const BREAKPOINTS: &str = "Responsive CSS breakpoints";
const ANIMATION: &str = "Header animation";

pub const MOBILE_MAX_WIDTH: u32 = 566;
pub const TABLET_MIN_WIDTH: u32 = 567;
pub const DESKTOP_MIN_WIDTH: u32 = 768;
pub const TABLET_CONTENT_WIDTH: &str = "520px";
pub const DESKTOP_CONTENT_WIDTH: &str = "640px";
pub const HEADER_KEYFRAMES: &str = "headerGradient";
pub const MIN_GRADIENT_STOPS: usize = 3;

pub static CHECKS: &[Check] = &[
    Check {
        group: BREAKPOINTS,
        name: "mobile breakpoint defined at max-width 566px",
        run: mobile_breakpoint,
    },
    Check {
        group: BREAKPOINTS,
        name: "tablet breakpoint defined at min-width 567px",
        run: tablet_breakpoint,
    },
    Check {
        group: BREAKPOINTS,
        name: "desktop breakpoint defined at min-width 768px",
        run: desktop_breakpoint,
    },
    Check {
        group: BREAKPOINTS,
        name: "tools grid is 3 columns on mobile",
        run: mobile_grid,
    },
    Check {
        group: BREAKPOINTS,
        name: "tools grid is 4 columns on tablet",
        run: tablet_grid,
    },
    Check {
        group: BREAKPOINTS,
        name: "tools grid is 5 columns on desktop",
        run: desktop_grid,
    },
    Check {
        group: BREAKPOINTS,
        name: "tablet content width is 520px",
        run: tablet_content_width,
    },
    Check {
        group: BREAKPOINTS,
        name: "desktop content width is 640px",
        run: desktop_content_width,
    },
    Check {
        group: ANIMATION,
        name: "gradient animation keyframe is defined",
        run: keyframes_defined,
    },
    Check {
        group: ANIMATION,
        name: "header uses a linear-gradient background",
        run: header_has_gradient,
    },
    Check {
        group: ANIMATION,
        name: "gradient animation is applied to the header",
        run: header_is_animated,
    },
    Check {
        group: ANIMATION,
        name: "header animation cycles through at least 3 colour stops",
        run: gradient_has_stops,
    },
];

fn breakpoint(page: &Page, bound: WidthBound, px: u32) -> CheckResult {
    let sheet = page.stylesheet();
    ensure(
        sheet.has_width(bound, px),
        &format!("a `{}: {}px` rule", bound, px),
        || {
            let found: Vec<String> = sheet
                .widths()
                .iter()
                .map(|(b, px)| format!("{}: {}px", b, px))
                .collect();
            format!("[{}]", found.join(", "))
        },
    )
}

fn mobile_breakpoint(page: &Page) -> CheckResult {
    breakpoint(page, WidthBound::Max, MOBILE_MAX_WIDTH)
}

fn tablet_breakpoint(page: &Page) -> CheckResult {
    breakpoint(page, WidthBound::Min, TABLET_MIN_WIDTH)
}

fn desktop_breakpoint(page: &Page) -> CheckResult {
    breakpoint(page, WidthBound::Min, DESKTOP_MIN_WIDTH)
}

fn grid_columns(page: &Page, columns: u32) -> CheckResult {
    let repeats = page.stylesheet().grid_repeats();
    ensure(
        repeats.contains(&columns),
        &format!("`grid-template-columns: repeat({}, ...)`", columns),
        || format!("column counts {:?}", repeats),
    )
}

fn mobile_grid(page: &Page) -> CheckResult {
    grid_columns(page, 3)
}

fn tablet_grid(page: &Page) -> CheckResult {
    grid_columns(page, 4)
}

fn desktop_grid(page: &Page) -> CheckResult {
    grid_columns(page, 5)
}

fn literal(page: &Page, text: &str) -> CheckResult {
    ensure(
        page.stylesheet().contains(text),
        &format!("{:?} in the stylesheet", text),
        || "no occurrence".to_string(),
    )
}

fn tablet_content_width(page: &Page) -> CheckResult {
    literal(page, TABLET_CONTENT_WIDTH)
}

fn desktop_content_width(page: &Page) -> CheckResult {
    literal(page, DESKTOP_CONTENT_WIDTH)
}

fn keyframes_defined(page: &Page) -> CheckResult {
    let keyframes = page.stylesheet().keyframes();
    ensure(
        keyframes.contains(&HEADER_KEYFRAMES),
        "`@keyframes headerGradient`",
        || format!("keyframes {:?}", keyframes),
    )
}

fn header_has_gradient(page: &Page) -> CheckResult {
    let blocks = page.stylesheet().blocks_for("header");
    ensure(
        blocks.iter().any(|b| b.contains("linear-gradient")),
        "a `header { ... }` rule with a linear-gradient",
        || format!("{} header rules without one", blocks.len()),
    )
}

fn header_is_animated(page: &Page) -> CheckResult {
    let blocks = page.stylesheet().blocks_for("header");
    ensure(
        blocks.iter().any(|b| {
            b.after("animation:")
                .map_or(false, |rest| rest.contains(HEADER_KEYFRAMES))
        }),
        "a `header { ... }` rule with `animation:` naming headerGradient",
        || format!("{} header rules without one", blocks.len()),
    )
}

fn gradient_has_stops(page: &Page) -> CheckResult {
    let gradient = page.stylesheet().first_linear_gradient().ok_or_else(|| {
        Violation::new("a linear-gradient(...) expression", "none")
    })?;
    let stops: HashSet<String> = hex_colors(gradient)
        .into_iter()
        .map(str::to_ascii_lowercase)
        .collect();
    ensure(
        stops.len() >= MIN_GRADIENT_STOPS,
        &format!("at least {} distinct hex colour stops", MIN_GRADIENT_STOPS),
        || format!("{} in `{}`", stops.len(), gradient),
    )
}

//! Built-in conflict groups for Tailwind-style utility classes.
//!
//! Classification works on the *base* of a token: the part left after
//! modifiers, the important marker and a leading negative sign have been
//! stripped. A base is looked up in two tables:
//!
//! 1. **Keywords**: whole-word utilities such as `flex`, `hidden` or
//!    `text-center` that map directly to a group.
//! 2. **Prefixes**: utilities of the form `<prefix>-<value>`. The longest
//!    matching prefix wins, and a rule decides the group, either fixed or
//!    by inspecting the value (`text-lg` is a font size, `text-red-500` a
//!    color).
//!
//! Group names follow the utility prefix where that is unambiguous (`p`,
//! `px`, `gap-x`) and are spelled out where one prefix feeds several
//! properties (`text-color`, `font-size`, `border-w`).

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// How the value after a prefix selects a group.
#[derive(Clone, Copy)]
enum Rule {
    /// Every value belongs to the named group.
    Fixed(&'static str),
    /// The group is chosen by looking at the value.
    By(fn(&str) -> &'static str),
}

const KEYWORD_GROUPS: &[(&str, &[&str])] = &[
    (
        "display",
        &[
            "block",
            "inline-block",
            "inline",
            "flex",
            "inline-flex",
            "table",
            "inline-table",
            "table-caption",
            "table-cell",
            "table-column",
            "table-column-group",
            "table-footer-group",
            "table-header-group",
            "table-row-group",
            "table-row",
            "flow-root",
            "grid",
            "inline-grid",
            "contents",
            "list-item",
            "hidden",
        ],
    ),
    ("position", &["static", "fixed", "absolute", "relative", "sticky"]),
    ("visibility", &["visible", "invisible", "collapse"]),
    (
        "text-decoration-line",
        &["underline", "overline", "line-through", "no-underline"],
    ),
    (
        "text-transform",
        &["uppercase", "lowercase", "capitalize", "normal-case"],
    ),
    ("font-style", &["italic", "not-italic"]),
    ("font-smoothing", &["antialiased", "subpixel-antialiased"]),
    ("text-overflow", &["truncate", "text-ellipsis", "text-clip"]),
    ("isolation", &["isolate", "isolation-auto"]),
    ("sr", &["sr-only", "not-sr-only"]),
    ("box-sizing", &["box-border", "box-content"]),
    ("container", &["container"]),
    ("border-collapse", &["border-collapse", "border-separate"]),
    ("table-layout", &["table-auto", "table-fixed"]),
    (
        "flex-direction",
        &["flex-row", "flex-row-reverse", "flex-col", "flex-col-reverse"],
    ),
    ("flex-wrap", &["flex-wrap", "flex-wrap-reverse", "flex-nowrap"]),
    ("list-style-position", &["list-inside", "list-outside"]),
    ("ring-inset", &["ring-inset"]),
    (
        "transform",
        &["transform", "transform-gpu", "transform-cpu", "transform-none"],
    ),
    ("shadow", &["shadow"]),
    ("border-w", &["border"]),
    ("border-w-x", &["border-x"]),
    ("border-w-y", &["border-y"]),
    ("border-w-t", &["border-t"]),
    ("border-w-r", &["border-r"]),
    ("border-w-b", &["border-b"]),
    ("border-w-l", &["border-l"]),
    ("border-w-s", &["border-s"]),
    ("border-w-e", &["border-e"]),
    ("rounded", &["rounded"]),
    ("rounded-t", &["rounded-t"]),
    ("rounded-r", &["rounded-r"]),
    ("rounded-b", &["rounded-b"]),
    ("rounded-l", &["rounded-l"]),
    ("rounded-tl", &["rounded-tl"]),
    ("rounded-tr", &["rounded-tr"]),
    ("rounded-br", &["rounded-br"]),
    ("rounded-bl", &["rounded-bl"]),
    ("ring-w", &["ring"]),
    ("divide-x", &["divide-x"]),
    ("divide-y", &["divide-y"]),
    ("divide-x-reverse", &["divide-x-reverse"]),
    ("divide-y-reverse", &["divide-y-reverse"]),
    ("space-x-reverse", &["space-x-reverse"]),
    ("space-y-reverse", &["space-y-reverse"]),
    (
        "outline-style",
        &[
            "outline",
            "outline-none",
            "outline-dashed",
            "outline-dotted",
            "outline-double",
            "outline-hidden",
        ],
    ),
    ("transition", &["transition"]),
    ("grow", &["grow"]),
    ("shrink", &["shrink"]),
    ("blur", &["blur"]),
    ("grayscale", &["grayscale"]),
    ("invert", &["invert"]),
    ("sepia", &["sepia"]),
    ("drop-shadow", &["drop-shadow"]),
    ("backdrop-blur", &["backdrop-blur"]),
    ("backdrop-grayscale", &["backdrop-grayscale"]),
    ("backdrop-invert", &["backdrop-invert"]),
    ("backdrop-sepia", &["backdrop-sepia"]),
    ("bg-attachment", &["bg-fixed", "bg-local", "bg-scroll"]),
    (
        "bg-repeat",
        &[
            "bg-repeat",
            "bg-no-repeat",
            "bg-repeat-x",
            "bg-repeat-y",
            "bg-repeat-round",
            "bg-repeat-space",
        ],
    ),
    ("bg-size", &["bg-auto", "bg-cover", "bg-contain"]),
    (
        "bg-position",
        &[
            "bg-bottom",
            "bg-center",
            "bg-left",
            "bg-left-bottom",
            "bg-left-top",
            "bg-right",
            "bg-right-bottom",
            "bg-right-top",
            "bg-top",
        ],
    ),
    ("bg-image", &["bg-none"]),
    (
        "border-style",
        &[
            "border-solid",
            "border-dashed",
            "border-dotted",
            "border-double",
            "border-hidden",
            "border-none",
        ],
    ),
    (
        "divide-style",
        &[
            "divide-solid",
            "divide-dashed",
            "divide-dotted",
            "divide-double",
            "divide-none",
        ],
    ),
    (
        "font-weight",
        &[
            "font-thin",
            "font-extralight",
            "font-light",
            "font-normal",
            "font-medium",
            "font-semibold",
            "font-bold",
            "font-extrabold",
            "font-black",
        ],
    ),
    (
        "text-align",
        &[
            "text-left",
            "text-center",
            "text-right",
            "text-justify",
            "text-start",
            "text-end",
        ],
    ),
    (
        "text-wrap",
        &["text-wrap", "text-nowrap", "text-balance", "text-pretty"],
    ),
    (
        "word-break",
        &["break-normal", "break-words", "break-all", "break-keep"],
    ),
    (
        "object-fit",
        &[
            "object-contain",
            "object-cover",
            "object-fill",
            "object-none",
            "object-scale-down",
        ],
    ),
    (
        "decoration-style",
        &[
            "decoration-solid",
            "decoration-double",
            "decoration-dotted",
            "decoration-dashed",
            "decoration-wavy",
        ],
    ),
    ("scroll-behavior", &["scroll-auto", "scroll-smooth"]),
];

const PREFIX_RULES: &[(&str, Rule)] = &[
    // Spacing
    ("p", Rule::Fixed("p")),
    ("px", Rule::Fixed("px")),
    ("py", Rule::Fixed("py")),
    ("pt", Rule::Fixed("pt")),
    ("pr", Rule::Fixed("pr")),
    ("pb", Rule::Fixed("pb")),
    ("pl", Rule::Fixed("pl")),
    ("ps", Rule::Fixed("ps")),
    ("pe", Rule::Fixed("pe")),
    ("m", Rule::Fixed("m")),
    ("mx", Rule::Fixed("mx")),
    ("my", Rule::Fixed("my")),
    ("mt", Rule::Fixed("mt")),
    ("mr", Rule::Fixed("mr")),
    ("mb", Rule::Fixed("mb")),
    ("ml", Rule::Fixed("ml")),
    ("ms", Rule::Fixed("ms")),
    ("me", Rule::Fixed("me")),
    ("space-x", Rule::Fixed("space-x")),
    ("space-y", Rule::Fixed("space-y")),
    ("gap", Rule::Fixed("gap")),
    ("gap-x", Rule::Fixed("gap-x")),
    ("gap-y", Rule::Fixed("gap-y")),
    ("scroll-m", Rule::Fixed("scroll-m")),
    ("scroll-p", Rule::Fixed("scroll-p")),
    // Sizing
    ("w", Rule::Fixed("w")),
    ("h", Rule::Fixed("h")),
    ("size", Rule::Fixed("size")),
    ("min-w", Rule::Fixed("min-w")),
    ("max-w", Rule::Fixed("max-w")),
    ("min-h", Rule::Fixed("min-h")),
    ("max-h", Rule::Fixed("max-h")),
    // Layout
    ("inset", Rule::Fixed("inset")),
    ("inset-x", Rule::Fixed("inset-x")),
    ("inset-y", Rule::Fixed("inset-y")),
    ("top", Rule::Fixed("top")),
    ("right", Rule::Fixed("right")),
    ("bottom", Rule::Fixed("bottom")),
    ("left", Rule::Fixed("left")),
    ("start", Rule::Fixed("start")),
    ("end", Rule::Fixed("end")),
    ("z", Rule::Fixed("z")),
    ("order", Rule::Fixed("order")),
    ("aspect", Rule::Fixed("aspect")),
    ("columns", Rule::Fixed("columns")),
    ("float", Rule::Fixed("float")),
    ("clear", Rule::Fixed("clear")),
    ("overflow", Rule::Fixed("overflow")),
    ("overflow-x", Rule::Fixed("overflow-x")),
    ("overflow-y", Rule::Fixed("overflow-y")),
    ("overscroll", Rule::Fixed("overscroll")),
    ("object", Rule::Fixed("object-position")),
    ("break-after", Rule::Fixed("break-after")),
    ("break-before", Rule::Fixed("break-before")),
    ("break-inside", Rule::Fixed("break-inside")),
    // Flexbox and grid
    ("flex", Rule::Fixed("flex")),
    ("basis", Rule::Fixed("basis")),
    ("grow", Rule::Fixed("grow")),
    ("shrink", Rule::Fixed("shrink")),
    ("grid-cols", Rule::Fixed("grid-cols")),
    ("grid-rows", Rule::Fixed("grid-rows")),
    ("grid-flow", Rule::Fixed("grid-flow")),
    ("auto-cols", Rule::Fixed("auto-cols")),
    ("auto-rows", Rule::Fixed("auto-rows")),
    ("col", Rule::Fixed("col")),
    ("col-span", Rule::Fixed("col")),
    ("col-start", Rule::Fixed("col-start")),
    ("col-end", Rule::Fixed("col-end")),
    ("row", Rule::Fixed("row")),
    ("row-span", Rule::Fixed("row")),
    ("row-start", Rule::Fixed("row-start")),
    ("row-end", Rule::Fixed("row-end")),
    ("justify", Rule::Fixed("justify-content")),
    ("justify-items", Rule::Fixed("justify-items")),
    ("justify-self", Rule::Fixed("justify-self")),
    ("items", Rule::Fixed("align-items")),
    ("content", Rule::By(content_group)),
    ("self", Rule::Fixed("align-self")),
    ("place-content", Rule::Fixed("place-content")),
    ("place-items", Rule::Fixed("place-items")),
    ("place-self", Rule::Fixed("place-self")),
    // Typography
    ("text", Rule::By(text_group)),
    ("font", Rule::By(font_group)),
    ("leading", Rule::Fixed("leading")),
    ("tracking", Rule::Fixed("tracking")),
    ("indent", Rule::Fixed("indent")),
    ("align", Rule::Fixed("vertical-align")),
    ("whitespace", Rule::Fixed("whitespace")),
    ("line-clamp", Rule::Fixed("line-clamp")),
    ("list", Rule::Fixed("list-style-type")),
    ("decoration", Rule::By(decoration_group)),
    ("underline-offset", Rule::Fixed("underline-offset")),
    ("placeholder", Rule::Fixed("placeholder-color")),
    ("caret", Rule::Fixed("caret-color")),
    ("accent", Rule::Fixed("accent-color")),
    // Backgrounds
    ("bg", Rule::By(bg_group)),
    ("bg-gradient-to", Rule::Fixed("bg-image")),
    ("bg-linear", Rule::Fixed("bg-image")),
    ("bg-radial", Rule::Fixed("bg-image")),
    ("bg-clip", Rule::Fixed("bg-clip")),
    ("bg-origin", Rule::Fixed("bg-origin")),
    ("bg-blend", Rule::Fixed("bg-blend")),
    ("from", Rule::By(gradient_from)),
    ("via", Rule::By(gradient_via)),
    ("to", Rule::By(gradient_to)),
    // Borders
    ("border", Rule::By(border_w)),
    ("border-x", Rule::By(border_w_x)),
    ("border-y", Rule::By(border_w_y)),
    ("border-t", Rule::By(border_w_t)),
    ("border-r", Rule::By(border_w_r)),
    ("border-b", Rule::By(border_w_b)),
    ("border-l", Rule::By(border_w_l)),
    ("border-s", Rule::By(border_w_s)),
    ("border-e", Rule::By(border_w_e)),
    ("border-spacing", Rule::Fixed("border-spacing")),
    ("rounded", Rule::Fixed("rounded")),
    ("rounded-t", Rule::Fixed("rounded-t")),
    ("rounded-r", Rule::Fixed("rounded-r")),
    ("rounded-b", Rule::Fixed("rounded-b")),
    ("rounded-l", Rule::Fixed("rounded-l")),
    ("rounded-s", Rule::Fixed("rounded-s")),
    ("rounded-e", Rule::Fixed("rounded-e")),
    ("rounded-tl", Rule::Fixed("rounded-tl")),
    ("rounded-tr", Rule::Fixed("rounded-tr")),
    ("rounded-br", Rule::Fixed("rounded-br")),
    ("rounded-bl", Rule::Fixed("rounded-bl")),
    ("divide-x", Rule::Fixed("divide-x")),
    ("divide-y", Rule::Fixed("divide-y")),
    ("divide", Rule::Fixed("divide-color")),
    ("outline", Rule::By(outline_w)),
    ("outline-offset", Rule::Fixed("outline-offset")),
    ("ring", Rule::By(ring_w)),
    ("ring-offset", Rule::By(ring_offset_w)),
    // Effects
    ("shadow", Rule::By(shadow_group)),
    ("opacity", Rule::Fixed("opacity")),
    ("mix-blend", Rule::Fixed("mix-blend")),
    // Filters
    ("blur", Rule::Fixed("blur")),
    ("brightness", Rule::Fixed("brightness")),
    ("contrast", Rule::Fixed("contrast")),
    ("drop-shadow", Rule::Fixed("drop-shadow")),
    ("grayscale", Rule::Fixed("grayscale")),
    ("hue-rotate", Rule::Fixed("hue-rotate")),
    ("invert", Rule::Fixed("invert")),
    ("saturate", Rule::Fixed("saturate")),
    ("sepia", Rule::Fixed("sepia")),
    ("backdrop-blur", Rule::Fixed("backdrop-blur")),
    ("backdrop-brightness", Rule::Fixed("backdrop-brightness")),
    ("backdrop-contrast", Rule::Fixed("backdrop-contrast")),
    ("backdrop-grayscale", Rule::Fixed("backdrop-grayscale")),
    ("backdrop-invert", Rule::Fixed("backdrop-invert")),
    ("backdrop-opacity", Rule::Fixed("backdrop-opacity")),
    ("backdrop-saturate", Rule::Fixed("backdrop-saturate")),
    ("backdrop-sepia", Rule::Fixed("backdrop-sepia")),
    // Transitions and animation
    ("transition", Rule::Fixed("transition")),
    ("duration", Rule::Fixed("duration")),
    ("ease", Rule::Fixed("ease")),
    ("delay", Rule::Fixed("delay")),
    ("animate", Rule::Fixed("animate")),
    // Transforms
    ("scale", Rule::Fixed("scale")),
    ("scale-x", Rule::Fixed("scale-x")),
    ("scale-y", Rule::Fixed("scale-y")),
    ("rotate", Rule::Fixed("rotate")),
    ("translate-x", Rule::Fixed("translate-x")),
    ("translate-y", Rule::Fixed("translate-y")),
    ("skew-x", Rule::Fixed("skew-x")),
    ("skew-y", Rule::Fixed("skew-y")),
    ("origin", Rule::Fixed("transform-origin")),
    // Interactivity
    ("cursor", Rule::Fixed("cursor")),
    ("pointer-events", Rule::Fixed("pointer-events")),
    ("select", Rule::Fixed("select")),
    ("resize", Rule::Fixed("resize")),
    ("appearance", Rule::Fixed("appearance")),
    ("touch", Rule::Fixed("touch")),
    ("will-change", Rule::Fixed("will-change")),
    ("snap", Rule::Fixed("snap")),
    // SVG
    ("fill", Rule::Fixed("fill")),
    ("stroke", Rule::By(stroke_w)),
];

/// Groups that override other groups when declared later.
///
/// `p-4` declared after `px-2` removes `px-2`, but `px-2` declared after
/// `p-4` keeps both since it only refines one axis.
const SUPERSEDES: &[(&str, &[&str])] = &[
    ("p", &["px", "py", "pt", "pr", "pb", "pl", "ps", "pe"]),
    ("px", &["pr", "pl"]),
    ("py", &["pt", "pb"]),
    ("m", &["mx", "my", "mt", "mr", "mb", "ml", "ms", "me"]),
    ("mx", &["mr", "ml"]),
    ("my", &["mt", "mb"]),
    ("gap", &["gap-x", "gap-y"]),
    ("size", &["w", "h"]),
    (
        "inset",
        &["inset-x", "inset-y", "top", "right", "bottom", "left", "start", "end"],
    ),
    ("inset-x", &["right", "left"]),
    ("inset-y", &["top", "bottom"]),
    ("overflow", &["overflow-x", "overflow-y"]),
    ("flex", &["basis", "grow", "shrink"]),
    ("scale", &["scale-x", "scale-y"]),
    ("font-size", &["leading"]),
    (
        "rounded",
        &[
            "rounded-t",
            "rounded-r",
            "rounded-b",
            "rounded-l",
            "rounded-s",
            "rounded-e",
            "rounded-tl",
            "rounded-tr",
            "rounded-br",
            "rounded-bl",
        ],
    ),
    ("rounded-t", &["rounded-tl", "rounded-tr"]),
    ("rounded-r", &["rounded-tr", "rounded-br"]),
    ("rounded-b", &["rounded-br", "rounded-bl"]),
    ("rounded-l", &["rounded-tl", "rounded-bl"]),
    (
        "border-w",
        &[
            "border-w-x",
            "border-w-y",
            "border-w-t",
            "border-w-r",
            "border-w-b",
            "border-w-l",
            "border-w-s",
            "border-w-e",
        ],
    ),
    ("border-w-x", &["border-w-r", "border-w-l"]),
    ("border-w-y", &["border-w-t", "border-w-b"]),
    (
        "border-color",
        &[
            "border-color-x",
            "border-color-y",
            "border-color-t",
            "border-color-r",
            "border-color-b",
            "border-color-l",
            "border-color-s",
            "border-color-e",
        ],
    ),
    ("border-color-x", &["border-color-r", "border-color-l"]),
    ("border-color-y", &["border-color-t", "border-color-b"]),
];

static KEYWORDS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for (group, words) in KEYWORD_GROUPS {
        for word in *words {
            map.insert(*word, *group);
        }
    }
    map
});

static PREFIXES: Lazy<HashMap<&'static str, Rule>> =
    Lazy::new(|| PREFIX_RULES.iter().copied().collect());

static SUPERSEDED: Lazy<HashMap<&'static str, &'static [&'static str]>> =
    Lazy::new(|| SUPERSEDES.iter().copied().collect());

/// Looks up the built-in group of a token base (no modifiers, no `!`, no
/// leading `-`).
pub(crate) fn builtin_group(base: &str) -> Option<&'static str> {
    if let Some(group) = KEYWORDS.get(base) {
        return Some(group);
    }

    // Walk candidate prefixes from longest to shortest: every `-` in the
    // base is a possible split point.
    let mut split = base.len();
    while let Some(pos) = base[..split].rfind('-') {
        let (prefix, value) = (&base[..pos], &base[pos + 1..]);
        if !prefix.is_empty() && !value.is_empty() {
            if let Some(rule) = PREFIXES.get(prefix) {
                return Some(match rule {
                    Rule::Fixed(group) => group,
                    Rule::By(pick) => pick(value),
                });
            }
        }
        split = pos;
    }
    None
}

/// Groups removed by a later token of `group`.
pub(crate) fn superseded_by(group: &str) -> &'static [&'static str] {
    SUPERSEDED.get(group).copied().unwrap_or(&[])
}

/// Returns the inside of an arbitrary value (`[...]`), if the value is one.
fn arbitrary(value: &str) -> Option<&str> {
    value.strip_prefix('[')?.strip_suffix(']')
}

fn is_number(value: &str) -> bool {
    value.parse::<f64>().is_ok()
}

fn is_tshirt_size(value: &str) -> bool {
    matches!(value, "xs" | "sm" | "md" | "lg" | "xl" | "base")
        || value
            .strip_suffix("xl")
            .or_else(|| value.strip_suffix("xs"))
            .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
}

const LENGTH_UNITS: &[&str] = &[
    "px", "rem", "em", "%", "vh", "vw", "dvh", "dvw", "svh", "lvh", "ch", "ex", "pt", "pc",
    "in", "cm", "mm", "vmin", "vmax",
];

fn is_arbitrary_length(inner: &str) -> bool {
    if let Some((hint, _)) = inner.split_once(':') {
        return matches!(hint, "length" | "size" | "number" | "percentage");
    }
    if inner.starts_with("calc(")
        || inner.starts_with("min(")
        || inner.starts_with("max(")
        || inner.starts_with("clamp(")
        || inner == "0"
    {
        return true;
    }
    LENGTH_UNITS.iter().any(|unit| {
        inner
            .strip_suffix(unit)
            .is_some_and(|n| !n.is_empty() && is_number(n))
    })
}

fn is_arbitrary_color(inner: &str) -> bool {
    if let Some((hint, _)) = inner.split_once(':') {
        return hint == "color";
    }
    inner.starts_with('#')
        || ["rgb(", "rgba(", "hsl(", "hsla(", "oklch(", "oklab(", "color("]
            .iter()
            .any(|f| inner.starts_with(f))
}

fn text_group(value: &str) -> &'static str {
    // `text-sm/6` sets a line height along with the size.
    let size = value.rsplit_once('/').map_or(value, |(size, _)| size);
    if is_font_size(value) || is_font_size(size) {
        "font-size"
    } else {
        "text-color"
    }
}

fn is_font_size(value: &str) -> bool {
    match arbitrary(value) {
        Some(inner) => is_arbitrary_length(inner),
        None => is_tshirt_size(value),
    }
}

fn font_group(value: &str) -> &'static str {
    match arbitrary(value) {
        Some(inner) if is_number(inner) || inner.starts_with("number:") => "font-weight",
        _ if is_number(value) => "font-weight",
        _ => "font-family",
    }
}

fn bg_group(value: &str) -> &'static str {
    match arbitrary(value) {
        Some(inner) if inner.starts_with("url(") || inner.starts_with("url:") => "bg-image",
        Some(inner) if inner.contains("gradient(") || inner.starts_with("image:") => "bg-image",
        Some(inner) if inner.starts_with("position:") => "bg-position",
        Some(inner) if is_arbitrary_length(inner) => "bg-size",
        _ => "bg-color",
    }
}

fn content_group(value: &str) -> &'static str {
    match value {
        "normal" | "center" | "start" | "end" | "between" | "around" | "evenly" | "baseline"
        | "stretch" => "align-content",
        _ => "content",
    }
}

fn decoration_group(value: &str) -> &'static str {
    width_or_color(value, "decoration-thickness", "decoration-color")
}

fn shadow_group(value: &str) -> &'static str {
    if is_tshirt_size(value) || matches!(value, "inner" | "none") {
        return "shadow";
    }
    match arbitrary(value) {
        Some(inner) if !is_arbitrary_color(inner) => "shadow",
        _ => "shadow-color",
    }
}

fn border_w(value: &str) -> &'static str {
    width_or_color(value, "border-w", "border-color")
}

fn border_w_x(value: &str) -> &'static str {
    width_or_color(value, "border-w-x", "border-color-x")
}

fn border_w_y(value: &str) -> &'static str {
    width_or_color(value, "border-w-y", "border-color-y")
}

fn border_w_t(value: &str) -> &'static str {
    width_or_color(value, "border-w-t", "border-color-t")
}

fn border_w_r(value: &str) -> &'static str {
    width_or_color(value, "border-w-r", "border-color-r")
}

fn border_w_b(value: &str) -> &'static str {
    width_or_color(value, "border-w-b", "border-color-b")
}

fn border_w_l(value: &str) -> &'static str {
    width_or_color(value, "border-w-l", "border-color-l")
}

fn border_w_s(value: &str) -> &'static str {
    width_or_color(value, "border-w-s", "border-color-s")
}

fn border_w_e(value: &str) -> &'static str {
    width_or_color(value, "border-w-e", "border-color-e")
}

fn outline_w(value: &str) -> &'static str {
    width_or_color(value, "outline-w", "outline-color")
}

fn ring_w(value: &str) -> &'static str {
    width_or_color(value, "ring-w", "ring-color")
}

fn ring_offset_w(value: &str) -> &'static str {
    width_or_color(value, "ring-offset-w", "ring-offset-color")
}

fn stroke_w(value: &str) -> &'static str {
    width_or_color(value, "stroke-w", "stroke")
}

fn gradient_from(value: &str) -> &'static str {
    gradient_group(value, "gradient-from-pos", "gradient-from")
}

fn gradient_via(value: &str) -> &'static str {
    gradient_group(value, "gradient-via-pos", "gradient-via")
}

fn gradient_to(value: &str) -> &'static str {
    gradient_group(value, "gradient-to-pos", "gradient-to")
}

fn width_or_color(value: &str, width: &'static str, color: &'static str) -> &'static str {
    if is_number(value) || value == "px" || value == "auto" || value == "from-font" {
        return width;
    }
    match arbitrary(value) {
        Some(inner) if is_arbitrary_length(inner) => width,
        _ => color,
    }
}

fn gradient_group(value: &str, position: &'static str, color: &'static str) -> &'static str {
    let is_percentage = value
        .strip_suffix('%')
        .is_some_and(|n| !n.is_empty() && is_number(n));
    match arbitrary(value) {
        _ if is_percentage => position,
        Some(inner) if inner.starts_with("percentage:") || inner.ends_with('%') => position,
        _ => color,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_map_directly() {
        assert_eq!(builtin_group("flex"), Some("display"));
        assert_eq!(builtin_group("hidden"), Some("display"));
        assert_eq!(builtin_group("absolute"), Some("position"));
        assert_eq!(builtin_group("text-center"), Some("text-align"));
        assert_eq!(builtin_group("flex-col"), Some("flex-direction"));
    }

    #[test]
    fn longest_prefix_wins() {
        assert_eq!(builtin_group("px-2"), Some("px"));
        assert_eq!(builtin_group("p-2"), Some("p"));
        assert_eq!(builtin_group("gap-x-4"), Some("gap-x"));
        assert_eq!(builtin_group("ring-offset-2"), Some("ring-offset-w"));
        assert_eq!(builtin_group("rounded-tl-lg"), Some("rounded-tl"));
        assert_eq!(builtin_group("rounded-lg"), Some("rounded"));
        assert_eq!(builtin_group("bg-gradient-to-r"), Some("bg-image"));
    }

    #[test]
    fn text_prefix_is_split_by_value() {
        assert_eq!(builtin_group("text-lg"), Some("font-size"));
        assert_eq!(builtin_group("text-2xl"), Some("font-size"));
        assert_eq!(builtin_group("text-[14px]"), Some("font-size"));
        assert_eq!(builtin_group("text-red-500"), Some("text-color"));
        assert_eq!(builtin_group("text-primary"), Some("text-color"));
        assert_eq!(builtin_group("text-[#fff]"), Some("text-color"));
    }

    #[test]
    fn text_size_with_line_height_is_font_size() {
        assert_eq!(builtin_group("text-sm/6"), Some("font-size"));
        assert_eq!(builtin_group("text-2xl/7"), Some("font-size"));
        assert_eq!(builtin_group("text-[14px]/[20px]"), Some("font-size"));
        assert_eq!(builtin_group("text-red-500/50"), Some("text-color"));
    }

    #[test]
    fn border_prefix_is_split_by_value() {
        assert_eq!(builtin_group("border"), Some("border-w"));
        assert_eq!(builtin_group("border-2"), Some("border-w"));
        assert_eq!(builtin_group("border-t-4"), Some("border-w-t"));
        assert_eq!(builtin_group("border-red-500"), Some("border-color"));
        assert_eq!(builtin_group("border-x-gray-200"), Some("border-color-x"));
        assert_eq!(builtin_group("border-dashed"), Some("border-style"));
    }

    #[test]
    fn background_prefix_is_split_by_value() {
        assert_eq!(builtin_group("bg-red-500"), Some("bg-color"));
        assert_eq!(builtin_group("bg-red-500/50"), Some("bg-color"));
        assert_eq!(builtin_group("bg-cover"), Some("bg-size"));
        assert_eq!(builtin_group("bg-[url(/img.png)]"), Some("bg-image"));
        assert_eq!(builtin_group("bg-clip-text"), Some("bg-clip"));
    }

    #[test]
    fn font_and_shadow_values() {
        assert_eq!(builtin_group("font-bold"), Some("font-weight"));
        assert_eq!(builtin_group("font-mono"), Some("font-family"));
        assert_eq!(builtin_group("shadow-lg"), Some("shadow"));
        assert_eq!(builtin_group("shadow-red-500"), Some("shadow-color"));
    }

    #[test]
    fn unknown_bases_have_no_group() {
        assert_eq!(builtin_group("card"), None);
        assert_eq!(builtin_group("js-hook-target"), None);
        assert_eq!(builtin_group(""), None);
    }

    #[test]
    fn shorthand_groups_supersede_axes() {
        assert!(superseded_by("p").contains(&"px"));
        assert!(superseded_by("px").contains(&"pl"));
        assert!(superseded_by("font-size").contains(&"leading"));
        assert!(superseded_by("pl").is_empty());
    }
}

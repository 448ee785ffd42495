//! Visual fallback patch
//!
//! Runs once when the page is ready. Without backdrop blur the glass panels
//! get an opaque gradient instead, and the body is tagged so stylesheets can
//! react. Wide viewports additionally get a pointer-tracking background.

use crate::dom::Document;

/// Marker class of elements styled with backdrop blur
pub const GLASS_CLASS: &str = "glass";

/// Added to the body when backdrop blur is unavailable
pub const FALLBACK_CLASS: &str = "no-backdrop-filter";

/// Parallax is only installed on viewports wider than this
pub const PARALLAX_MIN_WIDTH: f64 = 768.0;

/// Pixels of background shift per pixel of pointer distance from centre
pub const PARALLAX_FACTOR: f64 = 0.01;

const BLUR_PROBE: &str = "blur(12px)";

// inline overrides, applied in this order
const FALLBACK_STYLES: [(&str, &str); 3] = [
    ("background-color", "rgba(30, 30, 35, 0.85)"),
    ("border-color", "rgba(255, 255, 255, 0.2)"),
    (
        "background",
        "linear-gradient(to bottom, rgba(40, 40, 45, 0.85), rgba(25, 25, 30, 0.85))",
    ),
];

/// Inner size of the window, in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// What the host environment can do
pub trait Capabilities {
    /// Whether `property: value` is a supported declaration
    fn supports(&self, property: &str, value: &str) -> bool;

    fn viewport(&self) -> Viewport;
}

/// Capabilities fixed up front
#[derive(Debug, Clone)]
pub struct StaticCapabilities {
    pub supported: Vec<String>,
    pub viewport: Viewport,
}

impl StaticCapabilities {
    /// An environment supporting none of the probed properties
    pub const fn without_support(viewport: Viewport) -> Self {
        Self {
            supported: Vec::new(),
            viewport,
        }
    }

    #[must_use]
    pub fn with_support(mut self, property: &str) -> Self {
        self.supported.push(property.to_owned());
        self
    }
}

impl Capabilities for StaticCapabilities {
    fn supports(&self, property: &str, _value: &str) -> bool {
        self.supported.iter().any(|p| p == property)
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}

/// Standard or vendor-prefixed backdrop blur
pub fn backdrop_filter_supported<C: Capabilities + ?Sized>(caps: &C) -> bool {
    caps.supports("backdrop-filter", BLUR_PROBE) || caps.supports("-webkit-backdrop-filter", BLUR_PROBE)
}

/// What `install` did
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackReport {
    pub blur_supported: bool,
    /// Glass panels that received inline overrides
    pub patched: usize,
    /// Installed pointer handler, if the viewport was wide enough
    pub parallax: Option<Parallax>,
}

/// Run the patch against `doc`
pub fn install<C: Capabilities + ?Sized>(caps: &C, doc: &mut Document) -> FallbackReport {
    let blur_supported = backdrop_filter_supported(caps);
    let mut patched = 0;

    if blur_supported {
        tracing::debug!("backdrop blur supported, no fallback needed");
    } else {
        for element in doc.elements_with_class_mut(GLASS_CLASS) {
            for (property, value) in FALLBACK_STYLES {
                element.set_style(property, value);
            }
            patched += 1;
        }
        doc.body_mut().add_class(FALLBACK_CLASS);

        tracing::info!(patched, "backdrop blur unsupported, fallback styles applied");
    }

    let viewport = caps.viewport();
    let parallax = (viewport.width > PARALLAX_MIN_WIDTH).then_some(Parallax);

    FallbackReport {
        blur_supported,
        patched,
        parallax,
    }
}

/// Pointer-tracking background shift
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parallax;

impl Parallax {
    /// Background offset for a pointer at (`x`, `y`)
    pub fn offset(x: f64, y: f64, viewport: Viewport) -> (f64, f64) {
        (
            (x - viewport.width / 2.0) * PARALLAX_FACTOR,
            (y - viewport.height / 2.0) * PARALLAX_FACTOR,
        )
    }

    /// Move the body background for a pointer event
    pub fn on_pointer_move(self, doc: &mut Document, x: f64, y: f64, viewport: Viewport) {
        let (dx, dy) = Self::offset(x, y, viewport);
        let position = format!("{}px {}px", css_number(dx), css_number(dy));
        doc.body_mut().set_style("background-position", &position);
    }
}

fn css_number(value: f64) -> f64 {
    // -0 + 0 is +0, which prints as "0"
    value + 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Element;

    const WIDE: Viewport = Viewport {
        width: 1200.0,
        height: 800.0,
    };

    const NARROW: Viewport = Viewport {
        width: 768.0,
        height: 1024.0,
    };

    fn page() -> Document {
        Document::new()
            .with_element(Element::new("div").with_class(GLASS_CLASS))
            .with_element(Element::new("form").with_class("panel"))
            .with_element(Element::new("section").with_class(GLASS_CLASS).with_class("gallery"))
    }

    #[test]
    fn either_property_counts_as_support() {
        let none = StaticCapabilities::without_support(WIDE);
        assert!(!backdrop_filter_supported(&none));
        assert!(backdrop_filter_supported(&none.clone().with_support("backdrop-filter")));
        assert!(backdrop_filter_supported(&none.with_support("-webkit-backdrop-filter")));
    }

    #[test]
    fn unsupported_blur_patches_every_glass_element() {
        let mut doc = page();
        let report = install(&StaticCapabilities::without_support(NARROW), &mut doc);

        assert!(!report.blur_supported);
        assert_eq!(report.patched, 2);
        assert!(doc.body().has_class(FALLBACK_CLASS));

        for element in doc.elements().iter().filter(|e| e.has_class(GLASS_CLASS)) {
            assert_eq!(element.style("background-color"), Some("rgba(30, 30, 35, 0.85)"));
            assert_eq!(element.style("border-color"), Some("rgba(255, 255, 255, 0.2)"));
            assert_eq!(
                element.style("background"),
                Some("linear-gradient(to bottom, rgba(40, 40, 45, 0.85), rgba(25, 25, 30, 0.85))")
            );
        }
        assert_eq!(doc.elements()[1].style("background"), None);
    }

    #[test]
    fn supported_blur_leaves_document_alone() {
        let mut doc = page();
        let caps = StaticCapabilities::without_support(NARROW).with_support("-webkit-backdrop-filter");

        let report = install(&caps, &mut doc);

        assert_eq!(report.patched, 0);
        assert!(report.blur_supported);
        assert!(!doc.body().has_class(FALLBACK_CLASS));
        assert!(doc.elements().iter().all(|e| e.style("background").is_none()));
    }

    #[test]
    fn parallax_needs_a_wide_viewport() {
        let caps = StaticCapabilities::without_support(WIDE).with_support("backdrop-filter");
        assert_eq!(install(&caps, &mut Document::new()).parallax, Some(Parallax));

        let caps = StaticCapabilities::without_support(NARROW).with_support("backdrop-filter");
        assert_eq!(install(&caps, &mut Document::new()).parallax, None);
    }

    #[test]
    fn pointer_moves_background() {
        let mut doc = Document::new();

        Parallax.on_pointer_move(&mut doc, 1000.0, 100.0, WIDE);
        assert_eq!(doc.body().style("background-position"), Some("4px -3px"));

        Parallax.on_pointer_move(&mut doc, 600.0, 400.0, WIDE);
        assert_eq!(doc.body().style("background-position"), Some("0px 0px"));

        Parallax.on_pointer_move(&mut doc, 650.0, 0.0, WIDE);
        assert_eq!(doc.body().style("background-position"), Some("0.5px -4px"));
    }
}

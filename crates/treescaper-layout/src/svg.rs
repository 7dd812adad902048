use crate::model::{Bounds, MeasuredNode, Point, Rect};
use crate::params::LayoutParameters;
use crate::render::{Surface, Theme, draw_tree};
use crate::text::{TextMeasurer, TextStyle};
use std::fmt::Write as _;
use treescaper_core::config::Rgb;

#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    /// Root `<svg id="...">`.
    pub diagram_id: Option<String>,
    /// Extra space around the tree's bounding box in the viewBox.
    pub padding: f64,
    /// Use this viewBox instead of the tree's bounds (e.g. the window area).
    pub viewport: Option<Bounds>,
    /// Accessible `<title>` of the document.
    pub title: Option<String>,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            diagram_id: None,
            padding: 8.0,
            viewport: None,
            title: None,
        }
    }
}

/// A [`Surface`] that accumulates SVG elements.
#[derive(Debug, Default)]
pub struct SvgSurface {
    body: String,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps the drawn elements in a root `<svg>` with the given viewBox and background.
    pub fn finish(
        self,
        view_box: &Bounds,
        background: Rgb,
        diagram_id: &str,
        title: Option<&str>,
    ) -> String {
        let w = view_box.width().max(1.0);
        let h = view_box.height().max(1.0);
        let mut out = String::with_capacity(self.body.len() + 256);
        let _ = write!(
            &mut out,
            r#"<svg id="{id}" width="{w}" height="{h}" xmlns="http://www.w3.org/2000/svg" viewBox="{min_x} {min_y} {w} {h}" role="graphics-document document" aria-roledescription="tree">"#,
            id = escape_xml(diagram_id),
            min_x = fmt(view_box.min_x),
            min_y = fmt(view_box.min_y),
            w = fmt(w),
            h = fmt(h),
        );
        if let Some(title) = title.filter(|t| !t.is_empty()) {
            let _ = write!(&mut out, "<title>{}</title>", escape_xml(title));
        }
        let _ = write!(
            &mut out,
            r#"<rect x="{x}" y="{y}" width="{w}" height="{h}" fill="{fill}"/>"#,
            x = fmt(view_box.min_x),
            y = fmt(view_box.min_y),
            w = fmt(w),
            h = fmt(h),
            fill = rgb(background),
        );
        out.push_str(&self.body);
        out.push_str("</svg>");
        out
    }
}

impl Surface for SvgSurface {
    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        let _ = write!(
            &mut self.body,
            r#"<rect x="{x}" y="{y}" width="{w}" height="{h}" fill="{fill}"/>"#,
            x = fmt(rect.x),
            y = fmt(rect.y),
            w = fmt(rect.width),
            h = fmt(rect.height),
            fill = rgb(color),
        );
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgb, thickness: f64) {
        let _ = write!(
            &mut self.body,
            r#"<rect x="{x}" y="{y}" width="{w}" height="{h}" fill="none" stroke="{stroke}" stroke-width="{sw}"/>"#,
            x = fmt(rect.x),
            y = fmt(rect.y),
            w = fmt(rect.width),
            h = fmt(rect.height),
            stroke = rgb(color),
            sw = fmt(thickness),
        );
    }

    fn line(&mut self, from: Point, to: Point, color: Rgb, thickness: f64) {
        let _ = write!(
            &mut self.body,
            r#"<line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="{stroke}" stroke-width="{sw}"/>"#,
            x1 = fmt(from.x),
            y1 = fmt(from.y),
            x2 = fmt(to.x),
            y2 = fmt(to.y),
            stroke = rgb(color),
            sw = fmt(thickness),
        );
    }

    fn text(&mut self, text: &str, center: Point, style: &TextStyle, color: Rgb) {
        let family = style.font_family.as_deref().unwrap_or("sans-serif");
        let _ = write!(
            &mut self.body,
            r#"<text x="{x}" y="{y}" fill="{fill}" font-family="{family}" font-size="{size}" text-anchor="middle" dominant-baseline="central">{text}</text>"#,
            x = fmt(center.x),
            y = fmt(center.y),
            fill = rgb(color),
            family = escape_xml(family),
            size = fmt(style.font_size),
            text = escape_xml(text),
        );
    }
}

/// Renders a positioned tree to a standalone SVG document.
pub fn render_svg(
    tree: &MeasuredNode,
    params: &LayoutParameters,
    theme: &Theme,
    measurer: &dyn TextMeasurer,
    options: &SvgRenderOptions,
) -> String {
    let mut surface = SvgSurface::new();
    draw_tree(tree, params, theme, measurer, &mut surface);

    let view_box = match &options.viewport {
        Some(vp) => vp.clone(),
        None => tree
            .bounds()
            .map(|b| b.padded(options.padding.max(0.0)))
            .unwrap_or(Bounds {
                min_x: 0.0,
                min_y: 0.0,
                max_x: 100.0,
                max_y: 100.0,
            }),
    };
    let diagram_id = options.diagram_id.as_deref().unwrap_or("treescaper");
    surface.finish(
        &view_box,
        theme.background,
        diagram_id,
        options.title.as_deref(),
    )
}

fn rgb(c: Rgb) -> String {
    format!("rgb({},{},{})", c[0], c[1], c[2])
}

fn fmt(v: f64) -> String {
    // Round-trippable decimals without `-0` or tiny float noise.
    if !v.is_finite() {
        return "0".to_string();
    }

    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        v = nearest;
    }
    let s = v.to_string();
    if s == "-0" { "0".to_string() } else { s }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fmt_trims_noise_and_negative_zero() {
        assert_eq!(fmt(10.0), "10");
        assert_eq!(fmt(-0.0), "0");
        assert_eq!(fmt(2.5), "2.5");
        assert_eq!(fmt(3.0000000001), "3");
        assert_eq!(fmt(f64::NAN), "0");
    }

    #[test]
    fn empty_title_is_omitted() {
        let bounds = Bounds {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 1.0,
            max_y: 1.0,
        };
        let out = SvgSurface::new().finish(&bounds, [0, 0, 0], "t", Some(""));
        assert!(!out.contains("<title>"));
    }

    #[test]
    fn text_is_escaped() {
        let mut s = SvgSurface::new();
        s.text(
            "a<b & \"c\"",
            Point::new(0.0, 0.0),
            &TextStyle::default(),
            [0, 0, 0],
        );
        let out = s.finish(
            &Bounds {
                min_x: 0.0,
                min_y: 0.0,
                max_x: 10.0,
                max_y: 10.0,
            },
            [255, 255, 255],
            "t",
            Some("Q&A"),
        );
        assert!(out.contains("a&lt;b &amp; &quot;c&quot;"));
        assert!(out.contains("<title>Q&amp;A</title>"));
        assert!(out.starts_with(r#"<svg id="t""#));
        assert!(out.ends_with("</svg>"));
    }
}

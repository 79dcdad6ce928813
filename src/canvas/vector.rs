use glam::Vec2;
use svg::node::element::{
    Circle, Definitions, Group, Line, RadialGradient as SvgGradient, Rectangle, Stop, Text,
};
use svg::{Document, Node};

use super::{Canvas2d, Fill, RadialGradient, Rgba};

/// Canvas that accumulates an [`svg::Document`].
///
/// Gradients go into one `<defs>` block and every drawing call appends to a
/// single `<g>`, so document order is draw order.
#[derive(Debug, Clone)]
pub struct SvgCanvas {
    width: f32,
    height: f32,
    defs: Definitions,
    body: Group,
    gradients: usize,
}

fn paint(color: Rgba) -> String {
    let [r, g, b] = color.rgb.0;
    format!("rgb({r},{g},{b})")
}

fn stop(offset: f32, color: Rgba) -> Stop {
    Stop::new()
        .set("offset", offset)
        .set("stop-color", paint(color))
        .set("stop-opacity", color.alpha)
}

impl SvgCanvas {
    /// Blank document of the given size.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            defs: Definitions::new(),
            body: Group::new(),
            gradients: 0,
        }
    }

    fn gradient(&mut self, g: &RadialGradient) -> String {
        let id = format!("g{}", self.gradients);
        self.gradients += 1;
        self.defs.append(
            SvgGradient::new()
                .set("id", id.as_str())
                .set("gradientUnits", "userSpaceOnUse")
                .set("cx", g.center.x)
                .set("cy", g.center.y)
                .set("r", g.radius)
                .set("fx", g.focus.x)
                .set("fy", g.focus.y)
                .add(stop(0.0, g.inner))
                .add(stop(1.0, g.outer)),
        );
        format!("url(#{id})")
    }

    /// The document drawn so far.
    #[must_use]
    pub fn document(&self) -> Document {
        Document::new()
            .set("width", self.width)
            .set("height", self.height)
            .set("viewBox", (0.0_f32, 0.0_f32, self.width, self.height))
            .add(self.defs.clone())
            .add(self.body.clone())
    }
}

impl Canvas2d for SvgCanvas {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba) {
        self.body.append(
            Rectangle::new()
                .set("x", origin.x)
                .set("y", origin.y)
                .set("width", size.x)
                .set("height", size.y)
                .set("fill", paint(color))
                .set("fill-opacity", color.alpha),
        );
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        self.body.append(
            Line::new()
                .set("x1", from.x)
                .set("y1", from.y)
                .set("x2", to.x)
                .set("y2", to.y)
                .set("stroke", paint(color))
                .set("stroke-opacity", color.alpha)
                .set("stroke-width", width),
        );
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, fill: Fill) {
        let (fill, opacity) = match fill {
            Fill::Solid(color) => (paint(color), color.alpha),
            Fill::Radial(g) => (self.gradient(&g), 1.0),
        };
        self.body.append(
            Circle::new()
                .set("cx", center.x)
                .set("cy", center.y)
                .set("r", radius)
                .set("fill", fill)
                .set("fill-opacity", opacity),
        );
    }

    fn stroke_circle(
        &mut self,
        center: Vec2,
        radius: f32,
        width: f32,
        color: Rgba,
    ) {
        self.body.append(
            Circle::new()
                .set("cx", center.x)
                .set("cy", center.y)
                .set("r", radius)
                .set("fill", "none")
                .set("stroke", paint(color))
                .set("stroke-opacity", color.alpha)
                .set("stroke-width", width),
        );
    }

    fn fill_text(&mut self, text: &str, at: Vec2, font: &str, color: Rgba) {
        self.body.append(
            Text::new(text)
                .set("x", at.x)
                .set("y", at.y)
                .set("style", format!("font: {font}"))
                .set("fill", paint(color))
                .set("fill-opacity", color.alpha),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    #[test]
    fn document_contains_shapes_and_gradients() {
        let mut svg = SvgCanvas::new(200.0, 100.0);
        svg.fill_rect(Vec2::ZERO, Vec2::new(200.0, 100.0), Rgba::BLACK);
        let red = Rgba::opaque(Rgb::new(255, 0, 0));
        svg.fill_circle(
            Vec2::new(50.0, 50.0),
            4.0,
            Fill::Radial(RadialGradient {
                focus: Vec2::new(48.0, 48.0),
                center: Vec2::new(50.0, 50.0),
                radius: 4.0,
                inner: Rgba::opaque(Rgb::new(255, 200, 200)),
                outer: red,
            }),
        );
        svg.fill_text("A<B", Vec2::new(10.0, 20.0), "14px sans-serif", red);
        let doc = svg.document().to_string();
        assert!(doc.contains("<svg"));
        assert!(doc.contains("viewBox=\"0 0 200 100\""));
        assert!(doc.contains("<radialGradient"));
        assert!(doc.contains("id=\"g0\""));
        assert!(doc.contains("fill=\"url(#g0)\""));
        assert!(doc.contains("A&lt;B"));
        assert!(doc.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn draw_order_is_document_order() {
        let mut svg = SvgCanvas::new(10.0, 10.0);
        svg.fill_rect(Vec2::ZERO, Vec2::splat(10.0), Rgba::BLACK);
        svg.stroke_line(Vec2::ZERO, Vec2::splat(10.0), 1.0, Rgba::BLACK);
        svg.stroke_circle(Vec2::splat(5.0), 2.0, 0.5, Rgba::BLACK);
        let doc = svg.document().to_string();
        let rect = doc.find("<rect").unwrap();
        let line = doc.find("<line").unwrap();
        let circle = doc.find("<circle").unwrap();
        assert!(rect < line && line < circle);
    }
}

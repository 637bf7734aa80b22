use std::fmt::Write;

use super::{DrawCommand, LabelKind, Series, Surface, TextAlign};

const GRID_STROKE: &str = "#b7c7d4";
const BAR_FILL: &str = "rgba(84,209,0,.5)";
const LOW_STROKE: &str = "#71ffa5";
const HIGH_STROKE: &str = "#fff";
const LABEL_FILL: &str = "#b7c7d4";

/// Replays draw commands into a standalone SVG document.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    body: String,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, body: String::new() }
    }

    pub fn finish(self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n{body}</svg>\n",
            w = self.width,
            h = self.height,
            body = self.body,
        )
    }
}

fn stroke(series: Series) -> &'static str {
    match series {
        Series::High => HIGH_STROKE,
        Series::Low => LOW_STROKE,
    }
}

fn anchor(align: TextAlign) -> &'static str {
    match align {
        TextAlign::Left => "start",
        TextAlign::Center => "middle",
        TextAlign::Right => "end",
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

impl Surface for SvgSurface {
    fn draw(&mut self, command: &DrawCommand) {
        // writing into a String cannot fail
        let _ = match command {
            DrawCommand::Gridline { x, top, bottom } => writeln!(
                self.body,
                "  <line x1=\"{x:.1}\" y1=\"{top:.1}\" x2=\"{x:.1}\" y2=\"{bottom:.1}\" stroke=\"{GRID_STROKE}\" stroke-opacity=\"0.25\" stroke-dasharray=\"4 6\"/>"
            ),
            DrawCommand::Bar { x, y, width, height } => writeln!(
                self.body,
                "  <rect x=\"{x:.1}\" y=\"{y:.1}\" width=\"{width:.1}\" height=\"{height:.1}\" fill=\"{BAR_FILL}\"/>"
            ),
            DrawCommand::LineSegment { series, from, to } => writeln!(
                self.body,
                "  <line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"{}\" stroke-width=\"2.5\"/>",
                from.x,
                from.y,
                to.x,
                to.y,
                stroke(*series)
            ),
            DrawCommand::Marker { series, center, radius } => writeln!(
                self.body,
                "  <circle cx=\"{:.1}\" cy=\"{:.1}\" r=\"{radius}\" fill=\"{}\"/>",
                center.x,
                center.y,
                stroke(*series)
            ),
            DrawCommand::Label { kind, text, at, align } => writeln!(
                self.body,
                "  <text class=\"{}\" x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"{}\" fill=\"{LABEL_FILL}\" font-size=\"12\" font-family=\"Inter,system-ui\">{}</text>",
                match kind {
                    LabelKind::Weekday => "weekday",
                    LabelKind::Tick => "tick",
                    LabelKind::Legend => "legend",
                },
                at.x,
                at.y,
                anchor(*align),
                escape(text)
            ),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::Point;

    #[test]
    fn replays_every_command_as_an_element() {
        let mut surface = SvgSurface::new(200.0, 100.0);
        surface.replay(&[
            DrawCommand::Gridline { x: 10.0, top: 0.0, bottom: 90.0 },
            DrawCommand::Bar { x: 5.0, y: 50.0, width: 10.0, height: 40.0 },
            DrawCommand::LineSegment {
                series: Series::High,
                from: Point::new(10.0, 20.0),
                to: Point::new(30.0, 25.0),
            },
            DrawCommand::Marker { series: Series::Low, center: Point::new(10.0, 60.0), radius: 3.5 },
        ]);

        let svg = surface.finish();
        assert!(svg.starts_with("<svg"));
        assert_eq!(svg.matches("<line").count(), 2);
        assert!(svg.contains("stroke-dasharray=\"4 6\""));
        assert!(svg.contains(&format!("fill=\"{BAR_FILL}\"")));
        assert!(svg.contains(&format!("fill=\"{LOW_STROKE}\"")));
    }

    #[test]
    fn label_text_is_escaped() {
        let mut surface = SvgSurface::new(10.0, 10.0);
        surface.draw(&DrawCommand::Label {
            kind: LabelKind::Legend,
            text: "<Rain & Snow>".into(),
            at: Point::new(1.0, 1.0),
            align: TextAlign::Left,
        });

        let svg = surface.finish();
        assert!(svg.contains("&lt;Rain &amp; Snow&gt;"));
        assert!(svg.contains("text-anchor=\"start\""));
    }
}

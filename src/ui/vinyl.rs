//! The spinning record, drawn on the landing splash and the player bar.
use iced::widget::canvas::{self, Path, Stroke};
use iced::{Color, Point, Rectangle};

/// Canvas program for a vinyl record with grooves and a center label
#[derive(Debug, Clone, Copy)]
pub struct VinylRecord {
    /// True while the reveal cycle is running
    pub spinning: bool,
}

impl<Message> canvas::Program<Message> for VinylRecord {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &iced::Theme,
        bounds: Rectangle,
        _cursor: iced::mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        let center = frame.center();
        let radius = bounds.width.min(bounds.height) / 2.0 - 2.0;

        if radius <= 0.0 {
            return vec![frame.into_geometry()];
        }

        // Record body
        frame.fill(
            &Path::circle(center, radius),
            Color::from_rgb8(0x06, 0x06, 0x06),
        );

        // Grooves
        for step in 1..=4 {
            frame.stroke(
                &Path::circle(center, radius * (1.0 - step as f32 * 0.12)),
                Stroke::default()
                    .with_color(Color::from_rgba(1.0, 1.0, 1.0, 0.05))
                    .with_width(1.0),
            );
        }

        // Center label
        let label_radius = radius * 0.28;
        frame.fill(
            &Path::circle(center, label_radius),
            Color::from_rgb8(0x4a, 0x0f, 0x10),
        );
        frame.stroke(
            &Path::circle(center, label_radius),
            Stroke::default().with_color(Color::BLACK).with_width(2.0),
        );

        // Spindle hole, brighter while playing
        let spindle_alpha = if self.spinning { 0.6 } else { 0.3 };
        frame.fill(
            &Path::circle(center, 2.0),
            Color::from_rgba(1.0, 1.0, 1.0, spindle_alpha),
        );

        // A light glint; parked at a different angle when idle
        let angle: f32 = if self.spinning { 0.8 } else { 2.4 };
        let glint = Point::new(
            center.x + angle.cos() * radius * 0.7,
            center.y - angle.sin() * radius * 0.7,
        );
        frame.fill(&Path::circle(glint, 1.5), Color::from_rgba(1.0, 1.0, 1.0, 0.15));

        vec![frame.into_geometry()]
    }
}

//! Scatter layout generation for the revealed poster.
//!
//! When the reveal animation finishes, the twelve frames burst out of the
//! grid into a loose 3D arrangement. Each frame gets its own displacement,
//! depth, rotation and scale, drawn once per session so the arrangement
//! stays put across redraws.

use rand::Rng;

/// Placement parameters for one scattered frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterOffset {
    /// Horizontal displacement in poster pixels (-90..=90)
    pub x: f32,
    /// Vertical displacement in poster pixels (-90..=90)
    pub y: f32,
    /// Depth displacement; larger values stack closer to the viewer (50..=200)
    pub z: f32,
    /// Rotation about the X axis in degrees (-20..=20)
    pub rx: f32,
    /// Rotation about the Y axis in degrees (-20..=20)
    pub ry: f32,
    /// Rotation about the Z axis in degrees (-40..=40)
    pub rz: f32,
    /// Scale factor (0.9..=1.3)
    pub s: f32,
    /// Float-in stagger in seconds, ordered by slot index
    pub delay: f32,
}

/// Generate scatter offsets for `n` slots.
///
/// Called exactly once, when the session is constructed. The offsets live
/// in the session state afterwards; regenerating on every redraw would make
/// the arrangement jump frame to frame.
pub fn generate(n: usize) -> Vec<ScatterOffset> {
    let mut rng = rand::thread_rng();

    (0..n)
        .map(|i| ScatterOffset {
            x: rng.gen_range(-90.0..=90.0),
            y: rng.gen_range(-90.0..=90.0),
            z: rng.gen_range(50.0..=200.0),
            rx: rng.gen_range(-20.0..=20.0),
            ry: rng.gen_range(-20.0..=20.0),
            rz: rng.gen_range(-40.0..=40.0),
            s: rng.gen_range(0.9..=1.3),
            delay: i as f32 * 0.2,
        })
        .collect()
}

//! Procedural wound shape fields
//!
//! A shape field is a membership predicate over grid indices. Each archetype
//! is a tagged variant carrying only the numeric parameters drawn at
//! generation time, so evaluation is pure: identical parameters give
//! identical membership, and every archetype can be tested in isolation.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::GRID_SIZE;

/// A filled circle in grid space
#[derive(Debug, Clone, Copy)]
pub struct Spot {
    pub cx: f32,
    pub cy: f32,
    pub radius: f32,
}

impl Spot {
    #[inline]
    fn contains(&self, gx: f32, gy: f32) -> bool {
        let dx = gx - self.cx;
        let dy = gy - self.cy;
        dx * dx + dy * dy <= self.radius * self.radius
    }
}

/// A thick oriented segment (rotated rectangle) in grid space
#[derive(Debug, Clone, Copy)]
pub struct Slash {
    pub cx: f32,
    pub cy: f32,
    pub angle: f32,
    pub half_len: f32,
    pub half_width: f32,
}

impl Slash {
    /// Membership test in the segment's local frame
    fn contains(&self, gx: f32, gy: f32) -> bool {
        let dx = gx - self.cx;
        let dy = gy - self.cy;
        let (s, c) = self.angle.sin_cos();
        let along = dx * c + dy * s;
        let across = -dx * s + dy * c;
        along.abs() <= self.half_len && across.abs() <= self.half_width
    }
}

/// One of the five wound shape archetypes
#[derive(Debug, Clone)]
pub enum ShapeField {
    /// Union of a few large overlapping circles near the grid center
    Blob { spots: Vec<Spot> },
    /// Single rotated ellipse
    Oval {
        cx: f32,
        cy: f32,
        rx: f32,
        ry: f32,
        rot: f32,
    },
    /// Radial star: alternating inner/outer radius via a triangular profile
    Star {
        cx: f32,
        cy: f32,
        points: u32,
        inner: f32,
        outer: f32,
        rot: f32,
    },
    /// Thick main cut plus up to two branch cuts
    Gash { cuts: Vec<Slash> },
    /// Scattered small circles
    MultiSpot { spots: Vec<Spot> },
}

impl ShapeField {
    /// Draw a fresh randomized shape field, one archetype chosen uniformly
    pub fn random(rng: &mut Pcg32) -> Self {
        match rng.random_range(0..5) {
            0 => Self::random_blob(rng),
            1 => Self::random_oval(rng),
            2 => Self::random_star(rng),
            3 => Self::random_gash(rng),
            _ => Self::random_multi_spot(rng),
        }
    }

    fn random_blob(rng: &mut Pcg32) -> Self {
        let center = GRID_SIZE as f32 / 2.0;
        let count = rng.random_range(3..=6);
        let spots = (0..count)
            .map(|_| Spot {
                cx: center + rng.random_range(-14.0..14.0),
                cy: center + rng.random_range(-14.0..14.0),
                radius: rng.random_range(10.0..22.0),
            })
            .collect();
        ShapeField::Blob { spots }
    }

    fn random_oval(rng: &mut Pcg32) -> Self {
        let center = GRID_SIZE as f32 / 2.0;
        ShapeField::Oval {
            cx: center + rng.random_range(-6.0..6.0),
            cy: center + rng.random_range(-6.0..6.0),
            rx: rng.random_range(20.0..40.0),
            ry: rng.random_range(12.0..28.0),
            rot: rng.random_range(0.0..std::f32::consts::TAU),
        }
    }

    fn random_star(rng: &mut Pcg32) -> Self {
        let center = GRID_SIZE as f32 / 2.0;
        let outer = rng.random_range(26.0..44.0);
        ShapeField::Star {
            cx: center + rng.random_range(-4.0..4.0),
            cy: center + rng.random_range(-4.0..4.0),
            points: rng.random_range(5..=8),
            inner: outer * rng.random_range(0.35..0.55),
            outer,
            rot: rng.random_range(0.0..std::f32::consts::TAU),
        }
    }

    fn random_gash(rng: &mut Pcg32) -> Self {
        let center = GRID_SIZE as f32 / 2.0;
        let main = Slash {
            cx: center + rng.random_range(-6.0..6.0),
            cy: center + rng.random_range(-6.0..6.0),
            angle: rng.random_range(0.0..std::f32::consts::TAU),
            half_len: rng.random_range(22.0..40.0),
            half_width: rng.random_range(4.0..8.0),
        };

        let mut cuts = vec![main];
        let branches = rng.random_range(0..=2);
        let (s, c) = main.angle.sin_cos();
        for _ in 0..branches {
            // Branch roots somewhere along the main cut's axis
            let t = rng.random_range(-0.7..0.7) * main.half_len;
            let sign = if rng.random_range(0..2) == 0 { 1.0 } else { -1.0 };
            cuts.push(Slash {
                cx: main.cx + c * t,
                cy: main.cy + s * t,
                angle: main.angle + sign * rng.random_range(0.5..1.2),
                half_len: rng.random_range(10.0..20.0),
                half_width: rng.random_range(3.0..6.0),
            });
        }
        ShapeField::Gash { cuts }
    }

    fn random_multi_spot(rng: &mut Pcg32) -> Self {
        let center = GRID_SIZE as f32 / 2.0;
        let count = rng.random_range(4..=8);
        let spots = (0..count)
            .map(|_| Spot {
                cx: center + rng.random_range(-30.0..30.0),
                cy: center + rng.random_range(-30.0..30.0),
                radius: rng.random_range(5.0..10.0),
            })
            .collect();
        ShapeField::MultiSpot { spots }
    }

    /// Membership test at a grid index (evaluated at the cell center)
    pub fn contains(&self, gx: f32, gy: f32) -> bool {
        match self {
            ShapeField::Blob { spots } | ShapeField::MultiSpot { spots } => {
                spots.iter().any(|s| s.contains(gx, gy))
            }
            ShapeField::Oval { cx, cy, rx, ry, rot } => {
                let dx = gx - cx;
                let dy = gy - cy;
                let (s, c) = rot.sin_cos();
                // Rotate into the ellipse frame, then unit-circle test
                let u = (dx * c + dy * s) / rx;
                let v = (-dx * s + dy * c) / ry;
                u * u + v * v <= 1.0
            }
            ShapeField::Star {
                cx,
                cy,
                points,
                inner,
                outer,
                rot,
            } => {
                let dx = gx - cx;
                let dy = gy - cy;
                let dist = (dx * dx + dy * dy).sqrt();
                if dist > *outer {
                    return false;
                }
                let ang = dy.atan2(dx) + rot;
                // Triangular profile: inner radius at phase 0, outer at phase 0.5
                let phase = (ang * *points as f32 / std::f32::consts::TAU).rem_euclid(1.0);
                let tri = 1.0 - (phase * 2.0 - 1.0).abs();
                dist <= inner + (outer - inner) * tri
            }
            ShapeField::Gash { cuts } => cuts.iter().any(|cut| cut.contains(gx, gy)),
        }
    }
}

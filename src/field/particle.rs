/// Particle state, motion, and rendering.

use crate::core::config;
use crate::core::types::*;
use crate::platform::renderer::Renderer;
use rand::Rng;

/// A moving point in surface pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    /// Displacement in pixels per frame.
    pub velocity: Vec2,
    pub radius: f64,
}

impl Particle {
    /// Spawn a particle uniformly inside `size` with a random drift and radius.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, size: Size) -> Self {
        let w = size.width.max(0) as f64;
        let h = size.height.max(0) as f64;

        Self {
            position: Vec2::new(rng.random_range(0.0..=w), rng.random_range(0.0..=h)),
            velocity: Vec2::new(
                rng.random_range(-config::MAX_SPEED..=config::MAX_SPEED),
                rng.random_range(-config::MAX_SPEED..=config::MAX_SPEED),
            ),
            radius: rng.random_range(config::RADIUS_MIN..=config::RADIUS_MAX),
        }
    }

    /// Advance one frame, bouncing off the surface edges.
    pub fn update(&mut self, size: Size) {
        let w = size.width.max(0) as f64;
        let h = size.height.max(0) as f64;
        bounce_axis(&mut self.position.x, &mut self.velocity.x, w);
        bounce_axis(&mut self.position.y, &mut self.velocity.y, h);
    }
}

/// Move along one axis; leaving `[0, limit]` flips the velocity and clamps.
fn bounce_axis(pos: &mut f64, vel: &mut f64, limit: f64) {
    *pos += *vel;
    if *pos < 0.0 || *pos > limit {
        *vel = -*vel;
    }
    *pos = pos.clamp(0.0, limit);
}

pub struct ParticleRenderer;

impl ParticleRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render a particle as a filled dot over a soft glow.
    pub fn render(&self, renderer: &dyn Renderer, particle: &Particle) {
        let Vec2 { x, y } = particle.position;

        renderer.draw_glow(
            x,
            y,
            particle.radius,
            Color::from_hex(config::PARTICLE_COLOR, config::GLOW_ALPHA),
            config::GLOW_BLUR,
        );
        renderer.fill_circle(
            x,
            y,
            particle.radius,
            Color::from_hex(config::PARTICLE_COLOR, config::PARTICLE_ALPHA),
        );
    }
}

impl Default for ParticleRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::recording::{DrawCall, RecordingRenderer};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn particle(x: f64, y: f64, vx: f64, vy: f64) -> Particle {
        Particle {
            position: Vec2::new(x, y),
            velocity: Vec2::new(vx, vy),
            radius: 2.0,
        }
    }

    #[test]
    fn test_spawn_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let size = Size::new(800, 600);

        for _ in 0..500 {
            let p = Particle::spawn(&mut rng, size);
            assert!((0.0..=800.0).contains(&p.position.x));
            assert!((0.0..=600.0).contains(&p.position.y));
            assert!(p.velocity.x.abs() <= 0.25);
            assert!(p.velocity.y.abs() <= 0.25);
            assert!((1.0..=3.0).contains(&p.radius));
        }
    }

    #[test]
    fn test_spawn_is_deterministic_for_seed() {
        let size = Size::new(640, 480);
        let a = Particle::spawn(&mut StdRng::seed_from_u64(42), size);
        let b = Particle::spawn(&mut StdRng::seed_from_u64(42), size);
        assert_eq!(a, b);
    }

    #[test]
    fn test_free_motion() {
        let mut p = particle(10.0, 20.0, 0.25, -0.25);
        p.update(Size::new(100, 100));
        assert_eq!(p.position, Vec2::new(10.25, 19.75));
        assert_eq!(p.velocity, Vec2::new(0.25, -0.25));
    }

    #[test]
    fn test_reflects_at_low_edge() {
        let mut p = particle(0.1, 50.0, -0.2, 0.0);
        p.update(Size::new(100, 100));
        assert_eq!(p.position.x, 0.0);
        assert_eq!(p.velocity.x, 0.2);
        assert_eq!(p.velocity.y, 0.0);
    }

    #[test]
    fn test_reflects_at_high_edge() {
        let mut p = particle(50.0, 99.9, 0.0, 0.25);
        p.update(Size::new(100, 100));
        assert_eq!(p.position.y, 100.0);
        assert_eq!(p.velocity.y, -0.25);
    }

    #[test]
    fn test_landing_on_edge_does_not_reflect() {
        let mut p = particle(99.75, 50.0, 0.25, 0.0);
        p.update(Size::new(100, 100));
        assert_eq!(p.position.x, 100.0);
        assert_eq!(p.velocity.x, 0.25);
    }

    #[test]
    fn test_clamps_after_shrink() {
        // Position left over from a larger surface is pulled back inside.
        let mut p = particle(500.0, 500.0, 0.1, -0.1);
        p.update(Size::new(100, 100));
        assert_eq!(p.position, Vec2::new(100.0, 100.0));
        assert_eq!(p.velocity, Vec2::new(-0.1, 0.1));
    }

    #[test]
    fn test_render_draws_glow_then_dot() {
        let renderer = RecordingRenderer::new();
        ParticleRenderer::new().render(&renderer, &particle(5.0, 6.0, 0.0, 0.0));

        let calls = renderer.calls();
        assert_eq!(calls.len(), 2);
        assert!(matches!(calls[0], DrawCall::Glow { x, y, .. } if x == 5.0 && y == 6.0));
        assert!(matches!(calls[1], DrawCall::Circle { radius, alpha, .. } if radius == 2.0 && alpha == 0.6));
    }
}

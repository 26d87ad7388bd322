/// Proximity links between nearby particles.

use crate::core::config;
use crate::core::types::*;
use crate::field::particle::Particle;
use crate::platform::renderer::Renderer;

/// A connection between two particles closer than the link distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    pub opacity: f64,
}

/// Opacity of a link at `distance`, or `None` when out of range.
///
/// Range is half-open: `[0, LINK_DISTANCE)`. Opacity fades linearly from
/// `LINK_MAX_OPACITY` at zero distance to nothing at the limit.
pub fn link_opacity(distance: f64) -> Option<f64> {
    if !(0.0..config::LINK_DISTANCE).contains(&distance) {
        return None;
    }
    Some((config::LINK_DISTANCE - distance) / config::LINK_DISTANCE * config::LINK_MAX_OPACITY)
}

/// Every unordered pair `(i, j)`, `i < j`, that is within link range.
///
/// Quadratic in the population; the population cap keeps this bounded.
pub fn find_links(particles: &[Particle]) -> impl Iterator<Item = Link> + '_ {
    particles.iter().enumerate().flat_map(move |(i, p)| {
        particles[i + 1..]
            .iter()
            .enumerate()
            .filter_map(move |(k, q)| {
                let distance = p.position.distance(q.position);
                link_opacity(distance).map(|opacity| Link {
                    a: i,
                    b: i + 1 + k,
                    opacity,
                })
            })
    })
}

pub struct LinkRenderer;

impl LinkRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Stroke every in-range link; returns how many were drawn.
    pub fn render(&self, renderer: &dyn Renderer, particles: &[Particle]) -> usize {
        let mut drawn = 0;
        for link in find_links(particles) {
            renderer.draw_line(
                particles[link.a].position,
                particles[link.b].position,
                Color::from_hex(config::LINK_COLOR, link.opacity),
                config::LINK_WIDTH,
            );
            drawn += 1;
        }
        drawn
    }
}

impl Default for LinkRenderer {
    fn default() -> Self {
        Self::new()
    }
}

// Floating particle field drawn behind the dashboard
//
// Positions are kept in unit space (0.0..1.0) so the field survives
// terminal resizes without reseeding.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::{buffer::Buffer, layout::Rect, style::Color};

const GLYPHS: [char; 4] = ['·', '•', '∘', '⋅'];

/// How many particles the dashboard starts with
pub const DEFAULT_COUNT: usize = 40;

#[derive(Debug, Clone)]
struct Particle {
    x: f32,
    y: f32,
    dx: f32,
    dy: f32,
    glyph: char,
}

pub struct ParticleField {
    particles: Vec<Particle>,
    rng: StdRng,
}

impl ParticleField {
    pub fn new(count: usize) -> Self {
        Self::with_rng(count, StdRng::from_entropy())
    }

    #[cfg(test)]
    pub fn seeded(count: usize, seed: u64) -> Self {
        Self::with_rng(count, StdRng::seed_from_u64(seed))
    }

    fn with_rng(count: usize, mut rng: StdRng) -> Self {
        let particles = (0..count).map(|_| spawn(&mut rng)).collect();
        Self { particles, rng }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Advance one tick. Particles drifting off an edge respawn elsewhere.
    pub fn step(&mut self) {
        for p in &mut self.particles {
            p.x += p.dx;
            p.y += p.dy;
            if !(0.0..1.0).contains(&p.x) || !(0.0..1.0).contains(&p.y) {
                *p = spawn(&mut self.rng);
            }
        }
    }

    /// Paint onto empty cells of `area` only, leaving drawn content alone
    pub fn render(&self, buf: &mut Buffer, area: Rect, color: Color) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        for (x, y, glyph) in self.cells(area) {
            if let Some(cell) = buf.cell_mut((x, y)) {
                if cell.symbol() == " " {
                    cell.set_char(glyph).set_fg(color);
                }
            }
        }
    }

    fn cells(&self, area: Rect) -> impl Iterator<Item = (u16, u16, char)> + '_ {
        self.particles.iter().map(move |p| {
            let x = area.x + ((p.x * area.width as f32) as u16).min(area.width - 1);
            let y = area.y + ((p.y * area.height as f32) as u16).min(area.height - 1);
            (x, y, p.glyph)
        })
    }
}

fn spawn(rng: &mut StdRng) -> Particle {
    Particle {
        x: rng.gen_range(0.0..1.0),
        y: rng.gen_range(0.0..1.0),
        dx: rng.gen_range(-0.004..0.004),
        dy: rng.gen_range(-0.012..-0.002),
        glyph: GLYPHS[rng.gen_range(0..GLYPHS.len())],
    }
}

use crate::theme::hue_color;
use crossterm::style::Color;
use rand::prelude::SliceRandom;
use rand::Rng;

/// Confetti characters
pub const CONFETTI_CHARS: &[char] = &['*', '✦', '✧', '◆', '◇', '○', '●', '■', '□', '▲', '▽'];

/// Frames the confetti keeps falling (~4 seconds at 30 FPS)
const DURATION_FRAMES: u32 = 120;

const PARTICLE_COUNT: usize = 80;

/// A single particle in the celebration
#[derive(Clone)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub char: char,
    pub color: Color,
    pub lifetime: f32,
}

impl Particle {
    pub fn is_visible(&self, width: u16, height: u16) -> bool {
        self.x >= 0.0
            && self.x < width as f32
            && self.y >= 0.0
            && self.y < height as f32
            && self.lifetime > 0.0
    }
}

/// Confetti shower played over the board when the picture is complete
#[derive(Default)]
pub struct Celebration {
    particles: Vec<Particle>,
    frame: u32,
    width: u16,
    height: u16,
}

impl Celebration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new shower across a `width` x `height` screen
    pub fn start(&mut self, width: u16, height: u16) {
        let mut rng = rand::thread_rng();
        self.width = width;
        self.height = height;
        self.frame = 0;
        self.particles = (0..PARTICLE_COUNT)
            .map(|_| Particle {
                x: rng.gen_range(0.0..width.max(1) as f32),
                y: rng.gen_range(-(height.max(1) as f32)..1.0),
                vx: rng.gen_range(-0.3..0.3),
                vy: rng.gen_range(0.2..0.6),
                char: *CONFETTI_CHARS.choose(&mut rng).unwrap_or(&'*'),
                color: hue_color(rng.gen_range(0.0..1.0)),
                lifetime: rng.gen_range(60.0..DURATION_FRAMES as f32),
            })
            .collect();
    }

    pub fn stop(&mut self) {
        self.particles.clear();
    }

    /// Advance one frame
    pub fn update(&mut self) {
        if !self.is_active() {
            return;
        }
        self.frame += 1;
        for p in &mut self.particles {
            p.x += p.vx;
            p.y += p.vy;
            p.vy = (p.vy + 0.01).min(1.0);
            p.lifetime -= 1.0;
        }
        self.particles.retain(|p| p.lifetime > 0.0 && p.y < self.height as f32);
        if self.frame >= DURATION_FRAMES {
            self.particles.clear();
        }
    }

    pub fn is_active(&self) -> bool {
        !self.particles.is_empty()
    }

    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        let (w, h) = (self.width, self.height);
        self.particles.iter().filter(move |p| p.is_visible(w, h))
    }

    /// Hue that drifts over the animation, for the victory border
    pub fn rainbow_offset(&self) -> f32 {
        (self.frame as f32 * 0.02) % 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_by_default() {
        let c = Celebration::new();
        assert!(!c.is_active());
        assert_eq!(c.particles().count(), 0);
    }

    #[test]
    fn test_runs_out() {
        let mut c = Celebration::new();
        c.start(80, 24);
        assert!(c.is_active());
        for _ in 0..DURATION_FRAMES {
            c.update();
        }
        assert!(!c.is_active());
    }

    #[test]
    fn test_visible_particles_stay_on_screen() {
        let mut c = Celebration::new();
        c.start(40, 20);
        for _ in 0..30 {
            c.update();
            for p in c.particles() {
                assert!(p.x >= 0.0 && p.x < 40.0);
                assert!(p.y >= 0.0 && p.y < 20.0);
            }
        }
    }

    #[test]
    fn test_stop() {
        let mut c = Celebration::new();
        c.start(40, 20);
        c.stop();
        assert!(!c.is_active());
    }
}

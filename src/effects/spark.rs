//! Fire-spark emitter: spawns short-lived particles from the bottom edge of a
//! host box while the pointer is inside, and lets them burn out under gravity
//! once it leaves. The emitter itself is a pure state machine advanced one
//! frame at a time; the page layer samples a seeded run into CSS tracks.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt::Write as _;

pub const SPARK_COLORS: [&str; 4] = ["#FF5A00", "#FF8C00", "#FFD200", "#FFAA00"];

const SPARKS_PER_TICK: usize = 3;
const GRAVITY: f32 = 0.05;
/// Sparks rise from just above the bottom edge.
const EMIT_MARGIN: f32 = 5.0;
const FRAMES_PER_SECOND: f32 = 60.0;

#[derive(Debug, Clone)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    vx: f32,
    vy: f32,
    /// 1.0 at spawn, fading linearly to 0 over `max_life` frames.
    pub life: f32,
    max_life: f32,
    pub size: f32,
    pub color: &'static str,
}

impl Particle {
    fn spawn<R: Rng>(rng: &mut R, x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            vx: (rng.random::<f32>() - 0.5) * 4.0,
            vy: -rng.random::<f32>() * 3.0 - 1.0,
            life: 1.0,
            max_life: 30.0 + rng.random::<f32>() * 20.0,
            size: rng.random::<f32>() * 3.0 + 1.0,
            color: SPARK_COLORS[rng.random_range(0..SPARK_COLORS.len())],
        }
    }

    fn advance(&mut self) {
        self.x += self.vx;
        self.y += self.vy;
        self.vy += GRAVITY;
        self.life = (self.life - 1.0 / self.max_life).max(0.0);
    }

    pub fn radius(&self) -> f32 {
        self.size * self.life
    }

    pub fn alpha(&self) -> f32 {
        self.life * 0.8
    }

    fn lifetime_frames(&self) -> usize {
        self.max_life.ceil() as usize
    }
}

pub struct SparkEmitter<R: Rng> {
    width: f32,
    height: f32,
    particles: Vec<Particle>,
    active: bool,
    rng: R,
}

impl<R: Rng> SparkEmitter<R> {
    pub fn new(width: f32, height: f32, rng: R) -> Self {
        Self {
            width,
            height,
            particles: Vec::new(),
            active: false,
            rng,
        }
    }

    /// Pointer entered the host: start spawning on subsequent frames.
    pub fn pointer_enter(&mut self) {
        self.active = true;
    }

    /// Pointer left: stop spawning, existing sparks finish on their own.
    pub fn pointer_leave(&mut self) {
        self.active = false;
    }

    /// Advance one frame: move and fade live particles, drop the dead ones,
    /// then emit fresh sparks from the bottom edge while active.
    pub fn step(&mut self) -> &[Particle] {
        for particle in &mut self.particles {
            particle.advance();
        }
        self.particles.retain(|particle| particle.life > 0.0);

        if self.active {
            for _ in 0..SPARKS_PER_TICK {
                let x = self.rng.random::<f32>() * self.width;
                let particle = Particle::spawn(&mut self.rng, x, self.height - EMIT_MARGIN);
                self.particles.push(particle);
            }
        }

        &self.particles
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// The frame loop stops rescheduling once drained and inactive. Dropping
    /// the emitter is the detach: no further frames run.
    pub fn is_idle(&self) -> bool {
        self.particles.is_empty() && !self.active
    }
}

/// Markup plus keyframes for a precomputed spark burst, shown on hover over a
/// `.spark-host` element.
#[derive(Debug)]
pub struct SparkOverlay {
    pub markup: String,
    pub css: String,
}

pub const OVERLAY_STYLE_ID: &str = "spark-overlay";

/// Container/hover rules; registered once per document.
pub const OVERLAY_CSS: &str = "\
.spark-host { position: relative; }\n\
.spark-overlay { position: absolute; inset: 0; overflow: hidden; pointer-events: none; opacity: 0; transition: opacity 200ms ease; }\n\
.spark-host:hover .spark-overlay { opacity: 1; }\n\
.spark-overlay span { position: absolute; bottom: 0; border-radius: 50%; }";

/// Run a seeded emitter for one spawn tick, then follow each spark of the
/// burst to extinction and turn its track into a looping keyframes rule. The
/// result is a fixed overlay the server can render once per page.
pub fn hover_overlay(name: &str, width: f32, height: f32, seed: u64) -> SparkOverlay {
    let mut emitter = SparkEmitter::new(width, height, StdRng::seed_from_u64(seed));
    emitter.pointer_enter();
    emitter.step();
    emitter.pointer_leave();

    let mut markup = String::from(r#"<span class="spark-overlay" aria-hidden="true">"#);
    let mut css = String::new();

    for (index, spark) in emitter.particles().to_vec().into_iter().enumerate() {
        let track = format!("{name}-p{index}");
        let frames = spark.lifetime_frames();
        let duration = frames as f32 / FRAMES_PER_SECOND;

        let _ = write!(
            markup,
            r#"<span style="left: {x:.1}px; width: {d:.1}px; height: {d:.1}px; background: {color}; animation: {track} {duration:.2}s linear infinite;"></span>"#,
            x = spark.x,
            d = spark.size * 2.0,
            color = spark.color,
        );

        css.push_str(&keyframes_for(&track, spark, frames));
        css.push('\n');
    }

    markup.push_str("</span>");
    SparkOverlay { markup, css }
}

/// Sample the particle's flight at five offsets and emit one keyframes rule.
/// The scale factor tracks the shrinking draw radius.
fn keyframes_for(track: &str, mut spark: Particle, frames: usize) -> String {
    let (x0, y0) = (spark.x, spark.y);
    let size = spark.size;
    let mut samples = Vec::with_capacity(5);
    samples.push((0u32, 0.0f32, 0.0f32, spark.radius() / size, spark.alpha()));

    for frame in 1..=frames {
        spark.advance();
        let quarter = frames.max(4) / 4;
        if frame % quarter == 0 || frame == frames {
            let percent = (frame as f32 / frames as f32 * 100.0).min(100.0) as u32;
            samples.push((
                percent,
                spark.x - x0,
                spark.y - y0,
                spark.radius() / size,
                spark.alpha(),
            ));
        }
    }

    let mut rule = format!("@keyframes {track} {{");
    let mut last_percent = u32::MAX;
    for (percent, dx, dy, scale, alpha) in samples {
        if percent == last_percent {
            continue;
        }
        last_percent = percent;
        let _ = write!(
            rule,
            " {percent}% {{ transform: translate({dx:.1}px, {dy:.1}px) scale({scale:.2}); opacity: {alpha:.2}; }}"
        );
    }
    rule.push_str(" }");
    rule
}

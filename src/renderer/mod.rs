//! Layered frame compositor
//!
//! Every frame is built on two surfaces in a fixed order: background and
//! grid, particles, entities on both the main and the bloom surface, the
//! additive bloom composite, HUD text, then scanlines. Presentation to the
//! screen lives in `present` (wasm only).

pub mod canvas;
pub mod color;
pub mod font;
pub mod pixels;
#[cfg(target_arch = "wasm32")]
pub mod present;
pub mod sprites;

pub use canvas::{Canvas, Paint};
pub use pixels::PixelBuffer;
#[cfg(target_arch = "wasm32")]
pub use present::Presenter;
pub use sprites::{NoSprites, Sprite, SpriteBank, SpriteKind, SpriteSource};

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::Rect;
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::GameState;
use color::{colors, with_alpha};

/// HUD label positions
const SCORE_ORIGIN: Vec2 = Vec2::new(8.0, 10.0);
const LEVEL_ORIGIN: Vec2 = Vec2::new(BOARD_WIDTH - 120.0, 10.0);
/// Extra radius of a particle's soft halo
const PARTICLE_GLOW: f32 = 3.0;
/// Bloom highlight grows bullets by this much on every side
const BULLET_BLOOM_INFLATE: f32 = 1.0;

/// Per-kind paint, resolved once per frame
#[derive(Debug, Clone, Copy)]
struct Looks<'a> {
    alien: Paint<'a>,
    alien_bloom: Paint<'a>,
    ship: Paint<'a>,
    ship_bloom: Paint<'a>,
    bullet: Paint<'a>,
}

impl<'a> Looks<'a> {
    fn resolve(sprites: &'a dyn SpriteSource) -> Self {
        let alien = sprites.sprite(SpriteKind::Alien);
        let ship = sprites.sprite(SpriteKind::Ship);
        let bullet = sprites.sprite(SpriteKind::Bullet);
        Self {
            alien: Paint::sprite_or(alien, 1.0, colors::ALIEN_FALLBACK),
            alien_bloom: Paint::sprite_or(
                alien,
                colors::ALIEN_BLOOM_ALPHA,
                colors::ALIEN_BLOOM_FALLBACK,
            ),
            ship: Paint::sprite_or(ship, 1.0, colors::SHIP_FALLBACK),
            ship_bloom: Paint::sprite_or(ship, colors::SHIP_BLOOM_ALPHA, colors::SHIP_FALLBACK),
            bullet: Paint::sprite_or(bullet, 1.0, colors::BULLET_FALLBACK),
        }
    }
}

/// Draw one full frame of `state` onto `main`, using `bloom` as the glow layer.
///
/// `shake` translates everything on the main surface; the bloom layer is drawn
/// untranslated and picks the offset up when it is composited.
pub fn compose_frame<C: Canvas>(
    main: &mut C,
    bloom: &mut C,
    state: &GameState,
    sprites: &dyn SpriteSource,
    settings: &Settings,
    shake: Vec2,
) {
    let (width, height) = main.size();
    let (width, height) = (width as f32, height as f32);
    main.set_translation(shake);

    // Background
    main.clear(colors::BACKGROUND);
    if settings.grid_alpha > 0.0 {
        let line = with_alpha(colors::GRID_LINE, settings.grid_alpha);
        for col in 0..=COLUMNS {
            main.fill_rect(Rect::new(col as f32 * TILE_SIZE, 0.0, 1.0, height), line);
        }
        for row in 0..=ROWS {
            main.fill_rect(Rect::new(0.0, row as f32 * TILE_SIZE, width, 1.0), line);
        }
    }

    if settings.particles {
        for p in &state.particles.particles {
            main.fill_glow(
                p.pos,
                p.size,
                p.size + PARTICLE_GLOW,
                with_alpha(p.color, p.alpha),
            );
        }
    }

    bloom.set_translation(Vec2::ZERO);
    bloom.clear(colors::TRANSPARENT);

    let looks = Looks::resolve(sprites);

    for alien in state.wave.live() {
        main.paint(alien.rect(), looks.alien);
        bloom.paint(alien.rect(), looks.alien_bloom);
    }

    let ship = state.ship.rect();
    main.paint(ship, looks.ship);
    bloom.paint(ship, looks.ship_bloom);

    for bullet in &state.bullets.bullets {
        main.paint(bullet.rect(), looks.bullet);
        bloom.fill_rect(
            bullet.rect().inflate(BULLET_BLOOM_INFLATE),
            colors::BULLET_BLOOM,
        );
    }

    if settings.effective_bloom() {
        main.composite_additive(bloom, settings.bloom_blur_px, settings.bloom_strength);
    }

    main.draw_text(
        &format!("SCORE: {}", state.score()),
        SCORE_ORIGIN,
        colors::HUD_TEXT,
    );
    main.draw_text(
        &format!("LEVEL: {}", state.level()),
        LEVEL_ORIGIN,
        colors::HUD_TEXT,
    );

    if settings.scanlines && settings.scanline_alpha > 0.0 {
        let shade = with_alpha(colors::SCANLINE, settings.scanline_alpha);
        let step = settings.scanline_step.max(1) as usize;
        for y in (0..height as u32).step_by(step) {
            main.fill_rect(Rect::new(0.0, y as f32, width, 1.0), shade);
        }
    }
}

/// Owns the two software surfaces and the shake sampler
pub struct Renderer {
    main: PixelBuffer,
    bloom: PixelBuffer,
    settings: Settings,
    rng: Pcg32,
}

impl Renderer {
    pub fn new(settings: Settings, seed: u64) -> Self {
        let (w, h) = (BOARD_WIDTH as u32, BOARD_HEIGHT as u32);
        Self {
            main: PixelBuffer::new(w, h),
            bloom: PixelBuffer::new(w, h),
            settings,
            // Separate stream from the simulation so rendering never perturbs gameplay
            rng: Pcg32::seed_from_u64(seed ^ 0x5EED_B100),
        }
    }

    /// Composite a new frame and return it
    pub fn render(&mut self, state: &GameState, sprites: &dyn SpriteSource) -> &PixelBuffer {
        let shake = if self.settings.effective_screen_shake() {
            state.shake.current_offset(&mut self.rng)
        } else {
            Vec2::ZERO
        };
        compose_frame(
            &mut self.main,
            &mut self.bloom,
            state,
            sprites,
            &self.settings,
            shake,
        );
        &self.main
    }

    /// Most recently composited frame
    pub fn frame(&self) -> &PixelBuffer {
        &self.main
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::particles::Particle;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Translate(Vec2),
        Clear([f32; 4]),
        Rect(Rect, [f32; 4]),
        Glow(Vec2, f32, f32),
        Sprite(Rect, f32),
        Text(String),
        Composite(u32, f32),
    }

    /// Canvas that remembers what was asked of it
    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op>,
    }

    impl Canvas for Recorder {
        fn size(&self) -> (u32, u32) {
            (BOARD_WIDTH as u32, BOARD_HEIGHT as u32)
        }
        fn set_translation(&mut self, offset: Vec2) {
            self.ops.push(Op::Translate(offset));
        }
        fn clear(&mut self, color: [f32; 4]) {
            self.ops.push(Op::Clear(color));
        }
        fn fill_rect(&mut self, rect: Rect, color: [f32; 4]) {
            self.ops.push(Op::Rect(rect, color));
        }
        fn fill_glow(&mut self, center: Vec2, radius: f32, glow_radius: f32, _color: [f32; 4]) {
            self.ops.push(Op::Glow(center, radius, glow_radius));
        }
        fn draw_sprite(&mut self, _sprite: &Sprite, rect: Rect, alpha: f32) {
            self.ops.push(Op::Sprite(rect, alpha));
        }
        fn draw_text(&mut self, text: &str, _origin: Vec2, _color: [f32; 4]) {
            self.ops.push(Op::Text(text.to_string()));
        }
        fn composite_additive(&mut self, _layer: &Self, blur_px: u32, strength: f32) {
            self.ops.push(Op::Composite(blur_px, strength));
        }
    }

    fn compose(state: &GameState, sprites: &dyn SpriteSource, settings: &Settings) -> (Recorder, Recorder) {
        let mut main = Recorder::default();
        let mut bloom = Recorder::default();
        compose_frame(&mut main, &mut bloom, state, sprites, settings, Vec2::new(1.0, -1.0));
        (main, bloom)
    }

    fn state_with_everything() -> GameState {
        let mut state = GameState::new(4);
        state.fire();
        state.particles.particles.push(Particle {
            pos: Vec2::new(100.0, 100.0),
            vel: Vec2::ZERO,
            alpha: 0.5,
            size: 2.0,
            decay: 0.92,
            color: [1.0; 4],
        });
        state
    }

    fn position(ops: &[Op], pred: impl Fn(&Op) -> bool) -> usize {
        ops.iter().position(pred).unwrap_or(usize::MAX)
    }

    #[test]
    fn test_main_surface_order() {
        let state = state_with_everything();
        let (main, _) = compose(&state, &NoSprites, &Settings::default());
        let ops = &main.ops;

        assert_eq!(ops[0], Op::Translate(Vec2::new(1.0, -1.0)));
        assert_eq!(ops[1], Op::Clear(colors::BACKGROUND));

        let glow = position(ops, |op| matches!(op, Op::Glow(..)));
        let alien = position(ops, |op| matches!(op, Op::Rect(_, c) if *c == colors::ALIEN_FALLBACK));
        let ship = position(ops, |op| matches!(op, Op::Rect(_, c) if *c == colors::SHIP_FALLBACK));
        let bullet = position(ops, |op| matches!(op, Op::Rect(_, c) if *c == colors::BULLET_FALLBACK));
        let composite = position(ops, |op| matches!(op, Op::Composite(..)));
        let score = position(ops, |op| *op == Op::Text("SCORE: 0".into()));
        let level = position(ops, |op| *op == Op::Text("LEVEL: 1".into()));
        let last_scanline = ops.len() - 1;

        assert!(2 < glow);
        assert!(glow < alien);
        assert!(alien < ship);
        assert!(ship < bullet);
        assert!(bullet < composite);
        assert!(composite < score);
        assert!(score < level);
        assert!(level < last_scanline);
        assert!(matches!(ops[last_scanline], Op::Rect(r, c) if r.size.y == 1.0 && c[3] == 0.06));
    }

    #[test]
    fn test_bloom_surface_contents() {
        let state = state_with_everything();
        let (_, bloom) = compose(&state, &NoSprites, &Settings::default());
        let ops = &bloom.ops;

        assert_eq!(ops[0], Op::Translate(Vec2::ZERO));
        assert_eq!(ops[1], Op::Clear(colors::TRANSPARENT));
        let aliens = ops
            .iter()
            .filter(|op| matches!(op, Op::Rect(_, c) if *c == colors::ALIEN_BLOOM_FALLBACK))
            .count();
        assert_eq!(aliens, 6);
        assert!(ops.contains(&Op::Rect(state.ship.rect(), colors::SHIP_FALLBACK)));

        let bullet = state.bullets.bullets[0].rect();
        assert!(ops.contains(&Op::Rect(bullet.inflate(1.0), colors::BULLET_BLOOM)));
        // Nothing but entities lands on the glow layer
        assert!(!ops.iter().any(|op| matches!(op, Op::Text(_) | Op::Glow(..))));
    }

    #[test]
    fn test_sprites_replace_fallbacks_per_kind() {
        let mut bank = SpriteBank::default();
        bank.insert(SpriteKind::Alien, Sprite::from_mask(&["#"], [255; 4]));
        let state = state_with_everything();
        let (main, bloom) = compose(&state, &bank, &Settings::default());

        let main_sprites = main.ops.iter().filter(|op| matches!(op, Op::Sprite(_, a) if *a == 1.0)).count();
        assert_eq!(main_sprites, 6);
        let bloom_sprites = bloom
            .ops
            .iter()
            .filter(|op| matches!(op, Op::Sprite(_, a) if *a == colors::ALIEN_BLOOM_ALPHA))
            .count();
        assert_eq!(bloom_sprites, 6);
        // Ship and bullet still have no image
        assert!(main.ops.iter().any(|op| matches!(op, Op::Rect(_, c) if *c == colors::SHIP_FALLBACK)));
        assert!(main.ops.iter().any(|op| matches!(op, Op::Rect(_, c) if *c == colors::BULLET_FALLBACK)));
    }

    #[test]
    fn test_dead_aliens_are_not_drawn() {
        let mut state = GameState::new(4);
        state.wave.kill(0);
        state.wave.kill(1);
        let (main, _) = compose(&state, &NoSprites, &Settings::default());
        let aliens = main
            .ops
            .iter()
            .filter(|op| matches!(op, Op::Rect(_, c) if *c == colors::ALIEN_FALLBACK))
            .count();
        assert_eq!(aliens, 4);
    }

    #[test]
    fn test_particles_use_alpha_and_halo() {
        let state = state_with_everything();
        let (main, _) = compose(&state, &NoSprites, &Settings::default());
        assert!(main.ops.contains(&Op::Glow(Vec2::new(100.0, 100.0), 2.0, 5.0)));
    }

    #[test]
    fn test_settings_disable_layers() {
        let settings = Settings {
            bloom: false,
            scanlines: false,
            particles: false,
            ..Default::default()
        };
        let state = state_with_everything();
        let (main, _) = compose(&state, &NoSprites, &settings);
        assert!(!main.ops.iter().any(|op| matches!(op, Op::Composite(..) | Op::Glow(..))));
        assert!(matches!(main.ops.last(), Some(Op::Text(t)) if t == "LEVEL: 1"));
    }

    #[test]
    fn test_scanline_count() {
        let state = GameState::new(4);
        let (main, _) = compose(&state, &NoSprites, &Settings::default());
        let scanlines = main
            .ops
            .iter()
            .filter(|op| matches!(op, Op::Rect(_, c) if *c == with_alpha(colors::SCANLINE, 0.06)))
            .count();
        assert_eq!(scanlines, BOARD_HEIGHT as usize / 2);
    }

    #[test]
    fn test_render_produces_board_sized_frame() {
        let state = GameState::new(4);
        let mut renderer = Renderer::new(Settings::default(), 4);
        let frame = renderer.render(&state, &NoSprites);
        assert_eq!(frame.width(), BOARD_WIDTH as u32);
        assert_eq!(frame.height(), BOARD_HEIGHT as u32);
        // Odd row, away from grid lines, HUD and glow: plain background
        assert_eq!(frame.pixel(5, 5), Some([0x0D, 0x0D, 0x0D, 0xFF]));
        // Alien fallback color shows up in the middle of the first alien
        let alien = state.wave.aliens[0].rect().center();
        let px = frame.pixel(alien.x as i32 + 3, alien.y as i32 + 3);
        assert!(px.is_some_and(|p| p[1] > 200));
    }

    #[test]
    fn test_no_shake_offset_without_pulse() {
        let state = GameState::new(4);
        let mut renderer = Renderer::new(Settings::default(), 4);
        let a = renderer.render(&state, &NoSprites).as_bytes().to_vec();
        let b = renderer.render(&state, &NoSprites).as_bytes().to_vec();
        assert_eq!(a, b);
    }
}

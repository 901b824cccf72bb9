//! Rendering system.
//!
//! Draws the current [`Arena`] through a letterboxed [`Camera2D`] that maps
//! the fixed 1000×600 arena onto whatever window size we have, then the HUD
//! and the game-over overlay on top. Rendering only reads simulation state;
//! the random jitter it uses comes from its own RNG.
//!
//! Rotated body parts use `draw_rectangle_pro` with the rotation pivot as
//! the rectangle position, see [`Pose`].

use bevy_ecs::prelude::*;
use fastrand::Rng;
use raylib::prelude::*;

use crate::components::fighter::{
    AttackKind, Fighter, FighterState, HIT_TICKS, KO_TICKS, MAX_CHARGE,
};
use crate::components::particle::PARTICLE_RADIUS;
use crate::components::punchingbag::{BAG_HIT_TICKS, PunchingBag};
use crate::components::tint::Tint;
use crate::events::matchover::PendingGameOver;
use crate::resources::arena::Arena;
use crate::resources::audio::AudioSettings;
use crate::resources::commentary::Commentary;
use crate::resources::faces::FaceTextures;
use crate::resources::gamesettings::{ARENA_HEIGHT, ARENA_WIDTH, FLOOR_MARGIN};
use crate::resources::gamestate::{GameState, GameStates};
use crate::resources::worldtime::WorldTime;

const HEAD_SIZE: f32 = 50.0;
const BAG_FACE_SIZE: f32 = 50.0;
const HEALTH_BAR_WIDTH: f32 = 360.0;
const HEALTH_BAR_HEIGHT: f32 = 24.0;
const COMMENTARY_WRAP: usize = 60;

const BACKGROUND: Tint = Tint::new(17, 17, 17, 255);
const PRACTICE_BACKGROUND: Tint = Tint::new(34, 34, 34, 255);
const GRID: Tint = Tint::new(68, 68, 68, 255);
const ROPE: Tint = Tint::new(239, 68, 68, 255);
const POST: Tint = Tint::new(102, 102, 102, 255);
const CHAIN: Tint = Tint::new(85, 85, 85, 255);
const STRAP: Tint = Tint::new(34, 34, 34, 255);
const HEAD_PLACEHOLDER: Tint = Tint::new(221, 221, 221, 255);
const HUD_TEXT: Tint = Tint::new(229, 231, 235, 255);
const HUD_DIM: Tint = Tint::new(156, 163, 175, 255);
const HEALTH_BACK: Tint = Tint::new(55, 65, 81, 255);
const HEALTH_LOW: Tint = Tint::new(249, 115, 22, 255);
const GOLD: Tint = Tint::new(250, 204, 21, 255);

fn rgba(t: Tint) -> Color {
    Color::new(t.r, t.g, t.b, t.a)
}

/// Rigid transform for a group of arena rectangles: scale and rotate about
/// `local`, then place `local` at `world`.
#[derive(Debug, Clone, Copy)]
struct Pose {
    local: Vector2,
    world: Vector2,
    degrees: f32,
    scale: (f32, f32),
}

impl Pose {
    fn new(local: Vector2, world: Vector2, radians: f32) -> Self {
        Self {
            local,
            world,
            degrees: radians.to_degrees(),
            scale: (1.0, 1.0),
        }
    }

    fn scaled(mut self, sx: f32, sy: f32) -> Self {
        self.scale = (sx, sy);
        self
    }

    fn rect(&self, d: &mut impl RaylibDraw, x: f32, y: f32, w: f32, h: f32, color: Tint) {
        let (sx, sy) = self.scale;
        d.draw_rectangle_pro(
            Rectangle::new(self.world.x, self.world.y, w * sx, h * sy),
            Vector2::new((self.local.x - x) * sx, (self.local.y - y) * sy),
            self.degrees,
            rgba(color),
        );
    }

    fn texture(&self, d: &mut impl RaylibDraw, tex: &Texture2D, x: f32, y: f32, size: f32) {
        let (sx, sy) = self.scale;
        let source = Rectangle::new(0.0, 0.0, tex.width() as f32, tex.height() as f32);
        d.draw_texture_pro(
            tex,
            source,
            Rectangle::new(self.world.x, self.world.y, size * sx, size * sy),
            Vector2::new((self.local.x - x) * sx, (self.local.y - y) * sy),
            self.degrees,
            Color::WHITE,
        );
    }

    /// Where a local point ends up after the transform.
    fn point(&self, x: f32, y: f32) -> Vector2 {
        let (sx, sy) = self.scale;
        let (dx, dy) = ((x - self.local.x) * sx, (y - self.local.y) * sy);
        let (sin, cos) = self.degrees.to_radians().sin_cos();
        Vector2::new(
            self.world.x + dx * cos - dy * sin,
            self.world.y + dx * sin + dy * cos,
        )
    }
}

/// Pixel width of `text` in raylib's default font.
///
/// Zero before the window (and with it the default font) exists, and for
/// text raylib cannot take because of an interior NUL.
pub fn text_width(text: &str, size: i32) -> i32 {
    if text.is_empty() {
        return 0;
    }
    let Ok(c_text) = std::ffi::CString::new(text) else {
        return 0;
    };
    unsafe { raylib::ffi::MeasureText(c_text.as_ptr(), size) }
}

fn text_centered(d: &mut impl RaylibDraw, text: &str, cx: f32, y: f32, size: i32, color: Tint) {
    let x = cx as i32 - text_width(text, size) / 2;
    d.draw_text(text, x, y as i32, size, rgba(color));
}

/// Greedy word wrap at `width` characters. Words longer than a line get a
/// line of their own.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Letterbox camera for the arena, nudged by the screen shake offset.
fn arena_camera(screen_w: f32, screen_h: f32, shake: (f32, f32)) -> Camera2D {
    let zoom = (screen_w / ARENA_WIDTH).min(screen_h / ARENA_HEIGHT);
    Camera2D {
        offset: Vector2 {
            x: (screen_w - ARENA_WIDTH * zoom) * 0.5,
            y: (screen_h - ARENA_HEIGHT * zoom) * 0.5,
        },
        target: Vector2 {
            x: -shake.0,
            y: -shake.1,
        },
        rotation: 0.0,
        zoom,
    }
}

fn draw_ring(d: &mut impl RaylibDraw) {
    d.draw_rectangle(0, 0, ARENA_WIDTH as i32, ARENA_HEIGHT as i32, rgba(BACKGROUND));
    let floor_top = (ARENA_HEIGHT - FLOOR_MARGIN) as i32;
    d.draw_rectangle_gradient_v(
        0,
        floor_top,
        ARENA_WIDTH as i32,
        FLOOR_MARGIN as i32,
        Color::new(68, 68, 68, 255),
        Color::new(17, 17, 17, 255),
    );
    for i in 0..3 {
        let y = ARENA_HEIGHT - 150.0 - i as f32 * 40.0;
        d.draw_line_ex(
            Vector2::new(0.0, y),
            Vector2::new(ARENA_WIDTH, y),
            4.0,
            rgba(ROPE),
        );
    }
    d.draw_rectangle(0, (ARENA_HEIGHT - 300.0) as i32, 15, 250, rgba(POST));
    d.draw_rectangle((ARENA_WIDTH - 15.0) as i32, (ARENA_HEIGHT - 300.0) as i32, 15, 250, rgba(POST));
}

fn draw_gym(d: &mut impl RaylibDraw) {
    d.draw_rectangle(0, 0, ARENA_WIDTH as i32, ARENA_HEIGHT as i32, rgba(PRACTICE_BACKGROUND));
    let floor_top = ARENA_HEIGHT - FLOOR_MARGIN;
    d.draw_rectangle(0, floor_top as i32, ARENA_WIDTH as i32, FLOOR_MARGIN as i32, Color::new(51, 51, 51, 255));
    let mut x = 0.0;
    while x < ARENA_WIDTH {
        d.draw_line_ex(Vector2::new(x, 0.0), Vector2::new(x, floor_top), 1.0, rgba(GRID));
        x += 100.0;
    }
}

fn draw_fighter(d: &mut impl RaylibDraw, f: &Fighter, faces: &FaceTextures, rng: &mut Rng) {
    let facing = f.facing.sign();
    let is_idle = f.state == FighterState::Idle && f.vx == 0.0 && !f.is_jumping;
    let bob = if is_idle { f.bob_phase.sin() * 4.0 } else { 0.0 };

    let (mut recoil, mut jitter, mut tilt) = (0.0, 0.0, 0.0);
    match f.state {
        FighterState::Hit => {
            recoil = -facing * f.state_timer as f32 * 2.5;
            jitter = (rng.f32() - 0.5) * 6.0;
            tilt = -facing * f.state_timer as f32 * 0.06;
        }
        FighterState::Ko => {
            let fall = (KO_TICKS.saturating_sub(f.state_timer) as f32 / 30.0).min(1.0);
            tilt = facing * std::f32::consts::FRAC_PI_2 * fall;
        }
        _ => {}
    }

    let base = Vector2::new(f.x + f.width / 2.0, f.y + f.height);
    let pose = Pose::new(base, Vector2::new(base.x + recoil + jitter, base.y), tilt);
    let color = f.config.color;
    let (x, y) = (f.x, f.y + bob);

    if f.state == FighterState::Charging && f.charge_power > 20.0 {
        let glow = if f.charge_power >= MAX_CHARGE {
            Tint::WHITE
        } else {
            color
        };
        let spread = f.charge_power / 8.0;
        pose.rect(
            d,
            x - spread,
            y - spread,
            f.width + spread * 2.0,
            f.height + spread * 2.0,
            glow.fade(0.25 * f.charge_power / MAX_CHARGE),
        );
    }

    let torso_scale = if is_idle {
        1.0 + f.bob_phase.sin() * 0.02
    } else {
        1.0
    };
    pose.rect(d, x + 10.0, y + 60.0, 40.0, 60.0 * torso_scale, color);
    pose.rect(d, x + 10.0, f.y + 120.0, 15.0, 60.0, color);
    pose.rect(d, x + 35.0, f.y + 120.0, 15.0, 60.0, color);

    let scale = f.attack_scale();
    match f.state {
        FighterState::Punch => {
            let px = if facing > 0.0 { x + 50.0 } else { x - 30.0 * scale };
            pose.rect(d, px, y + 70.0, 40.0 * scale, 15.0, color);
        }
        FighterState::Kick => {
            let kx = if facing > 0.0 { x + 50.0 } else { x - 30.0 * scale };
            pose.rect(d, kx, y + 130.0, 45.0 * scale, 20.0, color);
        }
        FighterState::Charging => {
            let wind_up = f.charge_power / MAX_CHARGE * 20.0;
            match f.charge_type {
                Some(AttackKind::Kick) => {
                    pose.rect(d, x - wind_up * facing, y + 130.0, 20.0, 20.0, color)
                }
                _ => pose.rect(d, x - wind_up * facing, y + 70.0, 20.0, 15.0, color),
            }
        }
        FighterState::Hit | FighterState::Ko => {
            pose.rect(d, x - 15.0 * facing, y + 80.0, 20.0, 30.0, color);
            pose.rect(d, x + 45.0 * facing, y + 85.0, 20.0, 30.0, color);
        }
        FighterState::Idle => {
            let arm_bob = (f.bob_phase + 0.5).sin() * 2.0;
            pose.rect(d, x - 5.0, y + 70.0 + arm_bob, 15.0, 40.0, color);
            pose.rect(d, x + 50.0, y + 70.0 + arm_bob, 15.0, 40.0, color);
        }
    }

    let head_x = x + 5.0;
    let head_y = y + if f.state == FighterState::Hit { 10.0 } else { -2.0 };
    match faces.ready(f.config.face.as_ref()) {
        Some(tex) => {
            pose.texture(d, tex, head_x, head_y, HEAD_SIZE);
            let edge = 2.0;
            pose.rect(d, head_x, head_y, HEAD_SIZE, edge, Tint::WHITE);
            pose.rect(d, head_x, head_y + HEAD_SIZE - edge, HEAD_SIZE, edge, Tint::WHITE);
            pose.rect(d, head_x, head_y, edge, HEAD_SIZE, Tint::WHITE);
            pose.rect(d, head_x + HEAD_SIZE - edge, head_y, edge, HEAD_SIZE, Tint::WHITE);
        }
        None => pose.rect(d, head_x, head_y, HEAD_SIZE, HEAD_SIZE, HEAD_PLACEHOLDER),
    }

    if f.state == FighterState::Hit {
        let red = Tint::new(255, 0, 0, 255).fade(f.state_timer as f32 / HIT_TICKS as f32);
        pose.rect(d, x, y, f.width, f.height, red);
    }
}

fn draw_bag(d: &mut impl RaylibDraw, bag: &PunchingBag, faces: &FaceTextures, rng: &mut Rng) {
    let (x, y) = bag.position();
    let jitter = if bag.hit_timer > 0 {
        (rng.f32() - 0.5) * bag.hit_timer as f32
    } else {
        0.0
    };
    let center = Vector2::new(x + bag.width / 2.0, y + bag.height / 2.0);

    d.draw_line_ex(
        Vector2::new(bag.pivot_x, bag.pivot_y),
        Vector2::new(center.x + jitter, y + 20.0),
        4.0,
        rgba(CHAIN),
    );

    let mut pose = Pose::new(center, Vector2::new(center.x + jitter, center.y), -bag.angle);
    if bag.hit_timer > 0 {
        pose = pose.scaled(1.03, 0.97);
    }

    let color = bag.config.color;
    pose.rect(d, x, y, bag.width, bag.height, color);
    pose.rect(d, x + bag.width * 0.6, y, bag.width * 0.4, bag.height, Tint::new(0, 0, 0, 60));
    pose.rect(d, x, y + 20.0, bag.width, 10.0, STRAP);
    pose.rect(d, x, y + bag.height - 30.0, bag.width, 10.0, STRAP);

    let face_x = x + (bag.width - BAG_FACE_SIZE) / 2.0;
    let face_y = y + 40.0;
    let face_center = pose.point(face_x + BAG_FACE_SIZE / 2.0, face_y + BAG_FACE_SIZE / 2.0);
    match faces.ready(bag.config.face.as_ref()) {
        Some(tex) => {
            pose.texture(d, tex, face_x, face_y, BAG_FACE_SIZE);
            d.draw_circle_lines(
                face_center.x as i32,
                face_center.y as i32,
                BAG_FACE_SIZE / 2.0,
                Color::WHITE,
            );
        }
        None => d.draw_circle_v(face_center, BAG_FACE_SIZE / 2.0, rgba(Tint::WHITE.fade(0.2))),
    }

    if bag.hit_timer > 0 {
        let flash = Tint::WHITE.fade(bag.hit_timer as f32 / (BAG_HIT_TICKS as f32 * 1.5));
        pose.rect(d, x, y, bag.width, bag.height, flash);
    }

    let label = pose.point(x + bag.width / 2.0, y + bag.height + 30.0);
    text_centered(d, &bag.config.name.to_uppercase(), label.x, label.y - 7.0, 14, Tint::WHITE);
}

fn draw_health_bar(d: &mut impl RaylibDraw, f: &Fighter, x: f32, y: f32, right_aligned: bool) {
    d.draw_rectangle_v(
        Vector2::new(x, y),
        Vector2::new(HEALTH_BAR_WIDTH, HEALTH_BAR_HEIGHT),
        rgba(HEALTH_BACK),
    );
    let ratio = (f.health as f32 / f.max_health.max(1) as f32).clamp(0.0, 1.0);
    let fill = HEALTH_BAR_WIDTH * ratio;
    let fill_x = if right_aligned {
        x + HEALTH_BAR_WIDTH - fill
    } else {
        x
    };
    let color = if ratio < 0.25 { HEALTH_LOW } else { f.config.color };
    d.draw_rectangle_v(
        Vector2::new(fill_x, y),
        Vector2::new(fill, HEALTH_BAR_HEIGHT),
        rgba(color),
    );
    d.draw_rectangle_lines_ex(
        Rectangle::new(x, y, HEALTH_BAR_WIDTH, HEALTH_BAR_HEIGHT),
        2.0,
        Color::WHITE,
    );
}

fn draw_hud(d: &mut impl RaylibDraw, arena: &Arena, muted: bool) {
    match arena {
        Arena::Versus(m) => {
            d.draw_text(&m.p1.config.name.to_uppercase(), 20, 16, 20, rgba(HUD_TEXT));
            draw_health_bar(d, &m.p1, 20.0, 42.0, false);
            let p2_name = m.p2.config.name.to_uppercase();
            let p2_x = ARENA_WIDTH as i32 - 20 - text_width(&p2_name, 20);
            d.draw_text(&p2_name, p2_x, 16, 20, rgba(HUD_TEXT));
            draw_health_bar(d, &m.p2, ARENA_WIDTH - 20.0 - HEALTH_BAR_WIDTH, 42.0, true);
            text_centered(d, "VS", ARENA_WIDTH / 2.0, 40.0, 28, GOLD);

            let hint_y = ARENA_HEIGHT as i32 - 22;
            d.draw_text("Q/E MOVE  W JUMP  S PUNCH  D KICK", 20, hint_y, 10, rgba(HUD_DIM));
            let p2_hint = "I/P MOVE  O JUMP  J PUNCH  K KICK";
            let p2_hint_x = ARENA_WIDTH as i32 - 20 - text_width(p2_hint, 10);
            d.draw_text(p2_hint, p2_hint_x, hint_y, 10, rgba(HUD_DIM));
        }
        Arena::Practice(p) => {
            text_centered(d, "TRAINING ROOM", ARENA_WIDTH / 2.0, 16.0, 28, GOLD);
            text_centered(
                d,
                &format!("{} VS {}", p.fighter.config.name, p.bag.config.name).to_uppercase(),
                ARENA_WIDTH / 2.0,
                52.0,
                16,
                HUD_TEXT,
            );
            d.draw_text(
                "Q/E MOVE  W JUMP  S PUNCH  D KICK  (HOLD TO CHARGE)  ESC LEAVE",
                20,
                ARENA_HEIGHT as i32 - 22,
                10,
                rgba(HUD_DIM),
            );
        }
    }
    if muted {
        text_centered(d, "MUTED (M)", ARENA_WIDTH / 2.0, ARENA_HEIGHT - 44.0, 12, rgba(HUD_DIM));
    }
}

fn draw_game_over(
    d: &mut impl RaylibDraw,
    pending: &PendingGameOver,
    commentary: Option<&Commentary>,
    elapsed: f32,
) {
    d.draw_rectangle(0, 0, ARENA_WIDTH as i32, ARENA_HEIGHT as i32, Color::new(0, 0, 0, 190));

    let winner = pending
        .outcome
        .as_ref()
        .map(|o| o.winner_name.to_uppercase())
        .unwrap_or_default();
    text_centered(d, "K.O.!", ARENA_WIDTH / 2.0, 120.0, 64, ROPE);
    text_centered(d, &format!("{} WINS!", winner), ARENA_WIDTH / 2.0, 200.0, 36, GOLD);

    match commentary.and_then(|c| c.text.as_deref()) {
        Some(text) => {
            for (i, line) in wrap_text(text, COMMENTARY_WRAP).iter().enumerate() {
                text_centered(d, line, ARENA_WIDTH / 2.0, 270.0 + i as f32 * 26.0, 20, rgba(HUD_TEXT));
            }
        }
        None => {
            let dots = ".".repeat((elapsed * 2.0) as usize % 4);
            text_centered(
                d,
                &format!("The commentator is catching their breath{}", dots),
                ARENA_WIDTH / 2.0,
                270.0,
                20,
                HUD_DIM,
            );
        }
    }

    text_centered(
        d,
        "ENTER: REMATCH    ESC: QUIT",
        ARENA_WIDTH / 2.0,
        ARENA_HEIGHT - 90.0,
        20,
        HUD_TEXT,
    );
}

/// Draw one frame.
#[allow(clippy::too_many_arguments)]
pub fn render_system(
    mut rl: NonSendMut<RaylibHandle>,
    th: NonSend<RaylibThread>,
    faces: NonSend<FaceTextures>,
    arena: Option<Res<Arena>>,
    state: Res<GameState>,
    pending: Res<PendingGameOver>,
    commentary: Option<Res<Commentary>>,
    audio: Res<AudioSettings>,
    time: Res<WorldTime>,
    mut rng: Local<Rng>,
) {
    let screen_w = rl.get_screen_width() as f32;
    let screen_h = rl.get_screen_height() as f32;
    let shake = arena
        .as_ref()
        .map(|a| a.shake().offset(&mut rng))
        .unwrap_or((0.0, 0.0));

    let mut d = rl.begin_drawing(&th);
    d.clear_background(Color::BLACK);

    let Some(arena) = arena else {
        return;
    };

    {
        let mut d2 = d.begin_mode2D(arena_camera(screen_w, screen_h, shake));
        match &*arena {
            Arena::Versus(m) => {
                draw_ring(&mut d2);
                draw_fighter(&mut d2, &m.p1, &faces, &mut rng);
                draw_fighter(&mut d2, &m.p2, &faces, &mut rng);
            }
            Arena::Practice(p) => {
                draw_gym(&mut d2);
                draw_fighter(&mut d2, &p.fighter, &faces, &mut rng);
                draw_bag(&mut d2, &p.bag, &faces, &mut rng);
            }
        }
        for particle in arena.particles() {
            d2.draw_circle_v(
                Vector2::new(particle.x, particle.y),
                PARTICLE_RADIUS,
                rgba(particle.color.fade(particle.life)),
            );
        }
    }

    let mut hud = d.begin_mode2D(arena_camera(screen_w, screen_h, (0.0, 0.0)));
    draw_hud(&mut hud, &arena, audio.muted);
    if *state.get() == GameStates::GameOver {
        draw_game_over(&mut hud, &pending, commentary.as_deref(), time.elapsed);
    }
}

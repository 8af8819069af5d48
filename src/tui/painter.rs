//! [`Renderer`] that paints the game into a half-block [`PixelBuf`].
//!
//! The port calls are collected into a retained [`Scene`] and painted in
//! `end_frame`. Keeping the scene around means a terminal resize can repaint
//! the last frame at the new size even while the game itself is idle or over.

use skyhop::{GameOver, Rect, RunState, Renderer};

use super::pixels::*;

#[derive(Debug, Clone)]
struct Scene {
    state: RunState,
    obstacles: Vec<(Rect, Rect)>,
    sprite: Rect,
    rotation: f64,
    score: u32,
    game_over: Option<GameOver>,
}

pub struct Painter {
    buf: PixelBuf,
    world_w: f64,
    world_h: f64,
    scene: Scene,
    frame: u64,
    scroll: f64,
}

impl Painter {
    pub fn new(world_w: f64, world_h: f64, cols: u16, rows: u16) -> Self {
        Self {
            buf: PixelBuf::new(cols as usize, rows as usize * 2),
            world_w,
            world_h,
            scene: Scene {
                state: RunState::Idle,
                obstacles: Vec::new(),
                sprite: Rect::default(),
                rotation: 0.0,
                score: 0,
                game_over: None,
            },
            frame: 0,
            scroll: 0.0,
        }
    }

    pub fn buf(&self) -> &PixelBuf {
        &self.buf
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.buf.resize(cols as usize, rows as usize * 2);
        self.repaint();
    }

    // World units to pixels. The world is stretched to fill the terminal.
    fn sx(&self) -> f64 {
        self.buf.width() as f64 / self.world_w
    }

    fn sy(&self) -> f64 {
        self.buf.height() as f64 / self.world_h
    }

    /// Size of one "design pixel", so details keep their proportions on big
    /// terminals.
    fn scale(&self) -> f64 {
        (self.buf.height() as f64 / 48.0).max(1.0)
    }

    fn to_px(&self, r: Rect) -> (i32, i32, i32, i32) {
        let (sx, sy) = (self.sx(), self.sy());
        let x0 = (r.x * sx).round() as i32;
        let y0 = (r.y * sy).round() as i32;
        let x1 = (r.right() * sx).round() as i32;
        let y1 = (r.bottom() * sy).round() as i32;
        (x0, y0, (x1 - x0).max(1), (y1 - y0).max(0))
    }

    fn repaint(&mut self) {
        self.draw_sky();
        self.draw_hills();
        for i in 0..self.scene.obstacles.len() {
            let (upper, lower) = self.scene.obstacles[i];
            self.draw_pipe_pair(upper, lower);
        }
        self.draw_ground_strip();
        self.draw_bird();

        match (self.scene.state, self.scene.game_over) {
            (RunState::Idle, _) => self.draw_title(),
            (RunState::Ended, Some(summary)) => self.draw_game_over(&summary),
            _ => {}
        }
        let cx = self.buf.width() as i32 / 2;
        draw_number(&mut self.buf, cx, 2, self.scene.score, WHITE);
    }

    fn draw_sky(&mut self) {
        let h = self.buf.height();
        for y in 0..h {
            let t = (y * 256 / h.max(1)) as u16;
            let c = Rgb::lerp(SKY_TOP, SKY_BOT, t);
            for x in 0..self.buf.width() {
                self.buf.set(x as i32, y as i32, c);
            }
        }
    }

    fn draw_hills(&mut self) {
        let base = self.buf.height() as i32;
        let s = self.scale();
        let layers = [(0.2, 0.04, 6.0, 1.7, 4.0, HILL_FAR), (0.4, 0.06, 4.0, 2.3, 2.0, HILL_NEAR)];
        for (parallax, freq, amp, harmonic, lift, color) in layers {
            for x in 0..self.buf.width() as i32 {
                let fx = (x as f64 + self.scroll * parallax) * freq;
                let h = (fx.sin() * amp + (fx * harmonic).sin() * amp / 2.0) * s;
                let top = base - h as i32 - (lift * s) as i32;
                for y in top..base {
                    self.buf.set(x, y, color);
                }
            }
        }
    }

    /// Thin strip marking the bottom boundary.
    fn draw_ground_strip(&mut self) {
        let y = self.buf.height() as i32 - 1;
        for x in 0..self.buf.width() as i32 {
            let alt = ((x as f64 + self.scroll) as i32 / 3) % 2 == 0;
            self.buf.set(x, y, if alt { GRASS } else { DIRT });
        }
    }

    fn draw_pipe_pair(&mut self, upper: Rect, lower: Rect) {
        let s = self.scale();
        let cap_extra = (1.0 * s).max(1.0) as i32;
        let cap_h = (2.0 * s).max(2.0) as i32;

        let (px, _, pw, upper_h) = self.to_px(upper);
        let (_, lower_y, _, _) = self.to_px(lower);
        let sky_h = self.buf.height() as i32;

        // Bodies
        for x in 0..pw {
            let c = pipe_shade(x, pw);
            for y in 0..(upper_h - cap_h) {
                self.buf.set(px + x, y, c);
            }
            for y in (lower_y + cap_h)..sky_h {
                self.buf.set(px + x, y, c);
            }
        }

        // Caps
        for x in -cap_extra..(pw + cap_extra) {
            let c = pipe_shade(x + cap_extra, pw + cap_extra * 2);
            for y in (upper_h - cap_h)..upper_h {
                self.buf.set(px + x, y, c);
            }
            for y in lower_y..(lower_y + cap_h) {
                self.buf.set(px + x, y, c);
            }
            self.buf.set(px + x, upper_h - cap_h, CAP_DARK);
            self.buf.set(px + x, upper_h - 1, CAP_DARK);
            self.buf.set(px + x, lower_y, CAP_DARK);
            self.buf.set(px + x, lower_y + cap_h - 1, CAP_DARK);
        }
    }

    fn draw_bird(&mut self) {
        let (x, y, w, h) = self.to_px(self.scene.sprite);
        let s = self.scale();
        // Nose up when climbing, down when falling.
        let tilt = (self.scene.rotation / 45.0).clamp(-1.0, 1.0).round() as i32;

        let beak_w = (w / 4).max(1);
        let body_w = (w - beak_w).max(1);
        let h = h.max(2);

        self.buf.fill_rect(x, y, body_w, h, BIRD_Y);
        self.buf
            .fill_rect(x + 1, y, body_w - 2, 1.max((s * 0.8) as i32), BIRD_HI);

        let wing_y_off = if self.frame % 8 < 4 { 0 } else { 1 };
        self.buf.fill_rect(
            x + 1,
            y + h / 2 + wing_y_off - tilt,
            (body_w / 2).max(1),
            (h / 3).max(1),
            BIRD_WING,
        );

        let ex = x + body_w - (body_w / 3).max(1) - 1;
        let ey = y + (h / 4).max(0);
        let eye_r = (0.8 * s).max(1.0) as i32;
        self.buf.fill_rect(ex, ey, eye_r + 1, eye_r + 1, BIRD_EYE);
        self.buf.set(ex + eye_r, ey + eye_r, BIRD_PUPIL);

        let beak_y = y + h / 2 + tilt;
        self.buf
            .fill_rect(x + body_w, beak_y - 1, beak_w, (h / 3).max(1), BIRD_BEAK);
    }

    fn draw_title(&mut self) {
        let cx = self.buf.width() as i32 / 2;
        let cy = self.buf.height() as i32 / 4;
        let s = self.scale();

        // "SKYHOP" in big blocky letters
        let text = "SKYHOP";
        let char_w = (4.0 * s) as i32;
        let char_h = (6.0 * s) as i32;
        let sx = cx - text.len() as i32 * char_w / 2;
        for i in 0..text.len() as i32 {
            let bx = sx + i * char_w;
            self.buf.fill_rect(bx, cy, char_w - 1, char_h, BIRD_Y);
            self.buf.fill_rect(bx, cy, char_w - 1, 1, BIRD_HI);
        }

        let sub_y = cy + char_h + 4;
        let msg = "SPACE TO FLAP";
        let msg_x = cx - msg.len() as i32 * 4 / 2;
        for (i, ch) in msg.chars().enumerate() {
            if ch != ' ' {
                self.buf.fill_rect(msg_x + i as i32 * 4, sub_y, 3, 3, WHITE);
            }
        }
    }

    fn draw_game_over(&mut self, summary: &GameOver) {
        let cx = self.buf.width() as i32 / 2;
        let cy = self.buf.height() as i32 / 2;
        let s = self.scale();
        let panel_w = (40.0 * s).max(30.0) as i32;
        let panel_h = (20.0 * s).max(18.0) as i32;

        self.buf.dim();

        let px = cx - panel_w / 2;
        let py = cy - panel_h / 2;
        self.buf
            .fill_rect(px - 1, py - 1, panel_w + 2, panel_h + 2, SHADOW);
        self.buf.fill_rect(px, py, panel_w, panel_h, DIRT);
        self.buf
            .fill_rect(px + 1, py + 1, panel_w - 2, panel_h - 2, PANEL);

        draw_number(&mut self.buf, cx, py + 4, summary.score, WHITE);
        draw_number(&mut self.buf, cx, py + 11, summary.best, BIRD_Y);
        if summary.new_best {
            // Little badge next to the best score.
            self.buf.fill_rect(px + 3, py + 11, 3, 5, BIRD_BEAK);
        }
    }
}

impl Renderer for Painter {
    fn begin_frame(&mut self, state: RunState) {
        if state == RunState::Running {
            self.frame += 1;
            self.scroll += 1.0;
        }
        if state != RunState::Ended {
            self.scene.game_over = None;
        }
        self.scene.state = state;
        self.scene.obstacles.clear();
    }

    fn draw_obstacle_pair(&mut self, upper: Rect, lower: Rect) {
        self.scene.obstacles.push((upper, lower));
    }

    fn place_sprite(&mut self, sprite: Rect, rotation: f64) {
        self.scene.sprite = sprite;
        self.scene.rotation = rotation;
    }

    fn update_score(&mut self, score: u32) {
        self.scene.score = score;
    }

    fn end_frame(&mut self) {
        self.repaint();
    }

    fn game_over(&mut self, summary: &GameOver) {
        self.scene.game_over = Some(*summary);
        self.repaint();
    }
}

fn pipe_shade(x: i32, total_w: i32) -> Rgb {
    if total_w <= 1 {
        return PIPE_M;
    }
    let t = (x as f64 / (total_w - 1) as f64 * 256.0) as u16;
    if t < 64 {
        Rgb::lerp(PIPE_L, PIPE_M, (t * 4).min(256))
    } else if t < 100 {
        Rgb::lerp(PIPE_M, PIPE_HI, ((t - 64) * 7).min(256))
    } else if t < 160 {
        Rgb::lerp(PIPE_HI, PIPE_R, ((t - 100) * 4).min(256))
    } else {
        Rgb::lerp(PIPE_R, PIPE_L, ((t - 160) * 3).min(256))
    }
}

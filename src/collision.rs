//! Axis-aligned overlap tests between the player's hitbox and obstacles.

use crate::config::HitboxConfig;
use crate::obstacle::{Obstacle, ObstacleId};

/// Axis-aligned rectangle in world units, `y` growing downward.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of the given size centred on `(cx, cy)`.
    pub fn centered(cx: f64, cy: f64, width: f64, height: f64) -> Self {
        Self::new(cx - width / 2.0, cy - height / 2.0, width, height)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Strict intersection on both axes: rectangles that only share an edge
    /// don't overlap, and neither does an empty rectangle.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Full sprite footprint for a flight position.
pub fn sprite_rect(hitbox: &HitboxConfig, player_x: f64, position: f64) -> Rect {
    Rect::centered(player_x, position, hitbox.sprite_width, hitbox.sprite_height)
}

/// The forgiving collision box, smaller than the sprite it sits in.
pub fn hitbox_rect(hitbox: &HitboxConfig, player_x: f64, position: f64) -> Rect {
    Rect::centered(
        player_x + hitbox.offset_x,
        position + hitbox.offset_y,
        hitbox.width,
        hitbox.height,
    )
}

/// First live obstacle whose upper or lower segment overlaps `hitbox`.
pub fn first_collision<'a>(
    hitbox: &Rect,
    obstacles: impl IntoIterator<Item = &'a Obstacle>,
    obstacle_width: f64,
    screen_height: f64,
) -> Option<ObstacleId> {
    obstacles.into_iter().find_map(|obstacle| {
        let (upper, lower) = obstacle.rects(obstacle_width, screen_height);
        (hitbox.overlaps(&upper) || hitbox.overlaps(&lower)).then_some(obstacle.id)
    })
}

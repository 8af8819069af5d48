//! Vertical flight physics for the player sprite.

use crate::config::FlightConfig;

/// Vertical position (sprite centre, y grows downward) and velocity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FlightState {
    pub position: f64,
    pub velocity: f64,
}

#[derive(Debug, Clone)]
pub struct FlightModel {
    state: FlightState,
    start_position: f64,
    gravity: f64,
    jump_impulse: f64,
    screen_height: f64,
    rotation_factor: f64,
    max_rotation: f64,
}

impl FlightModel {
    /// Starts at `config.start_position`, or mid-screen when unset.
    pub fn new(config: &FlightConfig, screen_height: f64) -> Self {
        let start_position = config.start_position.unwrap_or(screen_height / 2.0);
        Self {
            state: FlightState {
                position: start_position,
                velocity: 0.0,
            },
            start_position,
            gravity: config.gravity,
            jump_impulse: config.jump_impulse,
            screen_height,
            rotation_factor: config.rotation_factor,
            max_rotation: config.max_rotation,
        }
    }

    pub fn state(&self) -> FlightState {
        self.state
    }

    /// Back to the start position, at rest.
    pub fn reset(&mut self) {
        self.state = FlightState {
            position: self.start_position,
            velocity: 0.0,
        };
    }

    /// Integrate one (possibly fractional) frame. Velocity first, then
    /// position with the updated velocity.
    pub fn apply_gravity(&mut self, delta: f64) {
        self.state.velocity += self.gravity * delta;
        self.state.position += self.state.velocity * delta;
    }

    /// Overwrites the velocity; jumps don't stack.
    pub fn jump(&mut self) {
        self.state.velocity = self.jump_impulse;
    }

    pub fn is_out_of_bounds(&self) -> bool {
        self.state.position < 0.0 || self.state.position > self.screen_height
    }

    /// Sprite tilt in degrees, nose down for positive (falling) velocity.
    pub fn rotation(&self) -> f64 {
        (self.state.velocity * self.rotation_factor).clamp(-self.max_rotation, self.max_rotation)
    }
}

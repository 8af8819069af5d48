//! Obstacle pairs and the stream that spawns, scrolls, scores and retires them.

use std::collections::VecDeque;

use log::debug;
use rand::Rng;

use crate::collision::Rect;
use crate::config::{ObstacleConfig, Placement, SpeedScaling};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObstacleId(pub u64);

/// An upper and lower segment with a gap between them, moving together.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub id: ObstacleId,
    pub upper_height: f64,
    pub lower_height: f64,
    /// Left edge.
    pub x: f64,
    /// Set once the obstacle has been credited to the score.
    pub scored: bool,
}

impl Obstacle {
    /// Occupied rectangles: the upper one hangs from the top of the screen,
    /// the lower one stands on the bottom.
    pub fn rects(&self, width: f64, screen_height: f64) -> (Rect, Rect) {
        (
            Rect::new(self.x, 0.0, width, self.upper_height),
            Rect::new(
                self.x,
                screen_height - self.lower_height,
                width,
                self.lower_height,
            ),
        )
    }
}

#[derive(Debug, Clone)]
pub struct ObstacleStream {
    gap: f64,
    width: f64,
    speed: f64,
    placement: Placement,
    speed_scaling: Option<SpeedScaling>,
    obstacles: VecDeque<Obstacle>,
    next_id: u64,
}

impl ObstacleStream {
    pub fn new(config: &ObstacleConfig) -> Self {
        Self {
            gap: config.gap,
            width: config.width,
            speed: config.speed,
            placement: config.placement,
            speed_scaling: config.speed_scaling,
            obstacles: VecDeque::new(),
            next_id: 0,
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn gap(&self) -> f64 {
        self.gap
    }

    /// Range the upper segment height is drawn from. Collapses to its lower
    /// bound when the configuration leaves no room.
    pub fn upper_height_range(&self, screen_height: f64) -> (f64, f64) {
        let available = screen_height - self.gap;
        let (min, max) = match self.placement {
            Placement::Margins { top, bottom } => (top, available - bottom),
            Placement::Fraction { min, max } => (min * available, max * available),
        };
        (min, max.max(min))
    }

    /// Append a new obstacle just beyond the right edge.
    pub fn spawn<R: Rng>(&mut self, screen_width: f64, screen_height: f64, rng: &mut R) -> ObstacleId {
        let (min, max) = self.upper_height_range(screen_height);
        let upper_height = if max > min {
            rng.gen_range(min..=max)
        } else {
            min
        };

        let lower_height = screen_height - upper_height - self.gap;
        debug_assert!(
            upper_height >= 0.0 && lower_height >= 0.0,
            "obstacle segments must fit on screen, got {upper_height} and {lower_height}"
        );

        let id = ObstacleId(self.next_id);
        self.next_id += 1;
        self.obstacles.push_back(Obstacle {
            id,
            upper_height,
            lower_height,
            x: screen_width,
            scored: false,
        });
        debug!("spawned obstacle {} with upper height {upper_height:.1}", id.0);
        id
    }

    /// Speed multiplier shared by every obstacle for the current world width.
    pub fn speed_scale(&self, screen_width: f64) -> f64 {
        match self.speed_scaling {
            Some(scaling) => (screen_width / scaling.reference_width).max(scaling.min_scale),
            None => 1.0,
        }
    }

    /// Scroll every obstacle left, returning how many newly passed
    /// `scoring_x`. An obstacle is credited before it can be retired, so
    /// nothing leaves the screen uncounted.
    pub fn advance(&mut self, delta: f64, screen_width: f64, scoring_x: f64) -> u32 {
        let step = self.speed * self.speed_scale(screen_width) * delta;
        let width = self.width;
        let mut points = 0;

        debug_assert!(
            self.obstacles
                .iter()
                .zip(self.obstacles.iter().skip(1))
                .all(|(older, newer)| older.id < newer.id && older.x <= newer.x),
            "obstacles out of spawn order"
        );

        self.obstacles.retain_mut(|obstacle| {
            obstacle.x -= step;
            let right = obstacle.x + width;
            if !obstacle.scored && right < scoring_x {
                obstacle.scored = true;
                points += 1;
            }
            right > 0.0
        });
        points
    }

    /// Oldest first.
    pub fn live_obstacles(&self) -> impl ExactSizeIterator<Item = &Obstacle> + '_ {
        self.obstacles.iter()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const WIDTH: f64 = 800.0;
    const HEIGHT: f64 = 400.0;
    const PLAYER_X: f64 = 150.0;

    fn stream() -> ObstacleStream {
        ObstacleStream::new(&ObstacleConfig::default())
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    #[test]
    fn test_spawn_appends_at_right_edge() {
        let mut stream = stream();
        let id = stream.spawn(WIDTH, HEIGHT, &mut rng());

        assert_eq!(stream.len(), 1);
        let obstacle = stream.live_obstacles().next().unwrap();
        assert_eq!(obstacle.id, id);
        assert_eq!(obstacle.x, WIDTH);
        assert!(!obstacle.scored);
        let total = obstacle.upper_height + stream.gap() + obstacle.lower_height;
        assert!((total - HEIGHT).abs() < 1e-9);
    }

    #[test]
    fn test_lower_height_and_travel_scenario() {
        let mut stream = stream();
        stream.obstacles.push_back(Obstacle {
            id: ObstacleId(0),
            upper_height: 100.0,
            lower_height: HEIGHT - 100.0 - stream.gap(),
            x: WIDTH,
            scored: false,
        });
        assert_eq!(stream.obstacles[0].lower_height, 150.0);

        for _ in 0..50 {
            stream.advance(1.0, WIDTH, PLAYER_X);
        }
        assert_eq!(stream.obstacles[0].x, WIDTH - 150.0);
    }

    #[test]
    fn test_margin_placement_range() {
        let stream = stream();
        assert_eq!(stream.upper_height_range(HEIGHT), (50.0, 150.0));

        let mut rng = rng();
        let mut stream = stream;
        for _ in 0..200 {
            stream.spawn(WIDTH, HEIGHT, &mut rng);
        }
        for obstacle in stream.live_obstacles() {
            assert!((50.0..=150.0).contains(&obstacle.upper_height));
            assert!((100.0..=200.0).contains(&obstacle.lower_height));
        }
    }

    #[test]
    fn test_fraction_placement_range() {
        let config = ObstacleConfig {
            gap: 180.0,
            placement: Placement::Fraction { min: 0.2, max: 0.8 },
            ..ObstacleConfig::default()
        };
        let stream = ObstacleStream::new(&config);
        let (min, max) = stream.upper_height_range(HEIGHT);
        assert!((min - 44.0).abs() < 1e-9);
        assert!((max - 176.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_range_collapses() {
        let config = ObstacleConfig {
            gap: 300.0,
            ..ObstacleConfig::default()
        };
        let mut stream = ObstacleStream::new(&config);
        assert_eq!(stream.upper_height_range(HEIGHT), (50.0, 50.0));

        stream.spawn(WIDTH, HEIGHT, &mut rng());
        let obstacle = stream.live_obstacles().next().unwrap();
        assert_eq!(obstacle.upper_height, 50.0);
        assert_eq!(obstacle.lower_height, 50.0);
    }

    #[test]
    fn test_ids_increase_in_spawn_order() {
        let mut stream = stream();
        let mut rng = rng();
        let ids: Vec<_> = (0..5).map(|_| stream.spawn(WIDTH, HEIGHT, &mut rng)).collect();
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));

        let live: Vec<_> = stream.live_obstacles().map(|o| o.id).collect();
        assert_eq!(live, ids);
    }

    #[test]
    fn test_scores_exactly_once_after_threshold() {
        let mut stream = stream();
        stream.spawn(WIDTH, HEIGHT, &mut rng());

        let mut total = 0;
        let mut flips = 0;
        let mut was_scored = false;
        for _ in 0..400 {
            let points = stream.advance(1.0, WIDTH, PLAYER_X);
            total += points;

            if let Some(obstacle) = stream.live_obstacles().next() {
                if obstacle.scored {
                    assert!(obstacle.x + stream.width() < PLAYER_X);
                    if !was_scored {
                        flips += 1;
                    }
                } else {
                    assert!(!was_scored, "scored flag reverted");
                    assert!(obstacle.x + stream.width() >= PLAYER_X);
                }
                was_scored = obstacle.scored;
            }
        }
        assert_eq!(total, 1);
        assert_eq!(flips, 1);
        assert!(stream.is_empty());
    }

    #[test]
    fn test_scoring_happens_before_removal() {
        let mut stream = stream();
        stream.spawn(WIDTH, HEIGHT, &mut rng());
        stream.obstacles[0].x = 100.0;

        // One huge step takes the obstacle straight from ahead of the player
        // to fully off screen.
        let points = stream.advance(100.0, WIDTH, PLAYER_X);
        assert_eq!(points, 1);
        assert!(stream.is_empty());
    }

    #[test]
    fn test_removal_only_when_fully_off_screen() {
        let mut stream = stream();
        stream.spawn(WIDTH, HEIGHT, &mut rng());
        stream.obstacles[0].x = -stream.width() + 3.0 + 0.5;

        stream.advance(1.0, WIDTH, PLAYER_X);
        assert_eq!(stream.len(), 1);
        stream.advance(1.0, WIDTH, PLAYER_X);
        assert!(stream.is_empty());
    }

    #[test]
    fn test_oldest_retired_first_and_others_keep_moving() {
        let mut stream = stream();
        let mut rng = rng();
        let first = stream.spawn(WIDTH, HEIGHT, &mut rng);
        for _ in 0..100 {
            stream.advance(1.0, WIDTH, PLAYER_X);
        }
        let second = stream.spawn(WIDTH, HEIGHT, &mut rng);

        let mut points = 0;
        while stream.live_obstacles().any(|o| o.id == first) {
            points += stream.advance(1.0, WIDTH, PLAYER_X);
        }
        assert_eq!(points, 1);
        let remaining: Vec<_> = stream.live_obstacles().map(|o| o.id).collect();
        assert_eq!(remaining, vec![second]);
    }

    #[test]
    fn test_speed_scaling() {
        let config = ObstacleConfig {
            speed_scaling: Some(SpeedScaling {
                reference_width: 400.0,
                min_scale: 0.8,
            }),
            ..ObstacleConfig::default()
        };
        let mut stream = ObstacleStream::new(&config);
        assert_eq!(stream.speed_scale(800.0), 2.0);
        assert_eq!(stream.speed_scale(200.0), 0.8);
        assert_eq!(stream.speed_scale(400.0), 1.0);

        stream.spawn(800.0, HEIGHT, &mut rng());
        stream.advance(1.0, 800.0, PLAYER_X);
        assert_eq!(stream.obstacles[0].x, 794.0);
    }

    #[test]
    fn test_fractional_delta() {
        let mut stream = stream();
        stream.spawn(WIDTH, HEIGHT, &mut rng());
        stream.advance(0.5, WIDTH, PLAYER_X);
        assert_eq!(stream.obstacles[0].x, WIDTH - 1.5);
    }

    #[test]
    fn test_clear() {
        let mut stream = stream();
        let mut rng = rng();
        stream.spawn(WIDTH, HEIGHT, &mut rng);
        stream.spawn(WIDTH, HEIGHT, &mut rng);
        stream.clear();
        assert!(stream.is_empty());
    }
}

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::chain::Chain;
use crate::collision::{head_reaches, self_collision};
use crate::config::{ConfigError, SimConfig};
use crate::growth::{feed, random_spot};
use crate::segment::Segment;
use crate::torus::{Point, Torus};

/// Turn keys held during a tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Steering {
    pub left: bool,
    pub right: bool,
}

impl Steering {
    pub fn delta(&self, turn_rate: f64) -> f64 {
        (self.right as i8 - self.left as i8) as f64 * turn_rate
    }
}

#[derive(Debug, PartialEq)]
pub enum StepResult {
    Ongoing,
    Nommed(u32), // new score
    Collision { index: usize, final_score: u32 },
}

/// The whole simulated world: body, apple, heading and score.
#[derive(Debug)]
pub struct Simulation<R = StdRng> {
    config: SimConfig,
    torus: Torus,
    chain: Chain,
    apple: Segment,
    heading: f64,
    score: u32,
    safe_index: usize,
    ticks: u64,
    rng: R,
}

impl Simulation<StdRng> {
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> Simulation<R> {
    pub fn with_rng(config: SimConfig, mut rng: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let torus = Torus::new(config.width, config.height);
        let chain = Chain::straight(
            &torus,
            Point::new(config.width / 2.0, config.height / 2.0),
            config.initial_length,
            config.segment_radius,
            config.clip_radius,
        );
        let apple = Segment::new(
            random_spot(&torus, &mut rng),
            config.apple_radius,
            config.apple_radius,
        );
        let safe_index = config.safe_index();

        Ok(Simulation {
            config,
            torus,
            chain,
            apple,
            heading: 0.0,
            score: 0,
            safe_index,
            ticks: 0,
            rng,
        })
    }

    /// Advances the world by one fixed step.
    pub fn tick(&mut self, steering: Steering) -> StepResult {
        self.ticks += 1;
        self.heading += steering.delta(self.config.turn_rate);
        self.chain.advance(&self.torus, self.heading, self.config.step);
        debug_assert!(self.torus.contains(self.chain.head().pos));
        debug_assert!(self.chain.spacing_error(&self.torus) < 1e-6);

        let nommed = head_reaches(&self.chain, &self.apple, &self.torus);
        if nommed {
            feed(
                &mut self.chain,
                &mut self.apple,
                &self.torus,
                &mut self.rng,
                self.config.segments_per_apple,
            );
            self.score += 1;
            debug!(
                "Apple eaten on tick {}: score {}, length {}, next apple at ({:.1}, {:.1})",
                self.ticks,
                self.score,
                self.chain.len(),
                self.apple.pos.x,
                self.apple.pos.y
            );
        }

        if let Some(index) = self.self_collision() {
            info!(
                "Head hit segment {} on tick {}, final score {}",
                index, self.ticks, self.score
            );
            return StepResult::Collision {
                index,
                final_score: self.score,
            };
        }

        if nommed {
            StepResult::Nommed(self.score)
        } else {
            StepResult::Ongoing
        }
    }

    pub fn self_collision(&self) -> Option<usize> {
        self_collision(&self.chain, &self.torus, self.safe_index)
    }

    pub fn torus(&self) -> &Torus {
        &self.torus
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    pub fn segments(&self) -> &[Segment] {
        self.chain.segments()
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn apple(&self) -> &Segment {
        &self.apple
    }

    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn safe_index(&self) -> usize {
        self.safe_index
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    const EPS: f64 = 1e-6;

    // Every apple lands on the origin.
    fn pinned(config: SimConfig) -> Simulation<StepRng> {
        Simulation::with_rng(config, StepRng::new(0, 0)).expect("valid config")
    }

    #[test]
    fn test_steering_delta() {
        let none = Steering::default();
        let left = Steering {
            left: true,
            right: false,
        };
        let right = Steering {
            left: false,
            right: true,
        };
        let both = Steering {
            left: true,
            right: true,
        };
        assert_eq!(none.delta(0.08), 0.0);
        assert_eq!(left.delta(0.08), -0.08);
        assert_eq!(right.delta(0.08), 0.08);
        assert_eq!(both.delta(0.08), 0.0);
    }

    #[test]
    fn test_new_simulation_layout() {
        let sim = pinned(SimConfig::default());
        assert_eq!(sim.len(), 48);
        assert_eq!(sim.segments()[0].pos, Point::new(320.0, 240.0));
        assert_eq!(sim.apple().pos, Point::new(0.0, 0.0));
        assert_eq!(sim.apple().radius, 8.0);
        assert_eq!(sim.score(), 0);
        assert_eq!(sim.safe_index(), 6);
        assert_eq!(sim.self_collision(), None);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = SimConfig {
            height: -480.0,
            ..SimConfig::default()
        };
        assert!(Simulation::new(config).is_err());
    }

    #[test]
    fn test_one_straight_tick() {
        let mut sim = pinned(SimConfig::default());
        assert_eq!(sim.tick(Steering::default()), StepResult::Ongoing);
        assert_eq!(sim.segments()[0].pos, Point::new(323.0, 240.0));
        assert_eq!(sim.ticks(), 1);
    }

    #[test]
    fn test_head_wraps_across_right_edge() {
        let mut sim = pinned(SimConfig::default());
        sim.chain = Chain::straight(&sim.torus, Point::new(638.0, 240.0), 48, 5.0, 1.5);
        sim.tick(Steering::default());
        assert_eq!(sim.segments()[0].pos, Point::new(1.0, 240.0));
        assert!(sim.chain().spacing_error(sim.torus()) < EPS);
    }

    #[test]
    fn test_steering_turns_before_moving() {
        let mut sim = pinned(SimConfig::default());
        sim.tick(Steering {
            left: false,
            right: true,
        });
        assert!((sim.heading() - 0.08).abs() < 1e-12);
        let head = sim.segments()[0].pos;
        assert!((head.x - (320.0 + 3.0 * 0.08f64.cos())).abs() < EPS);
        assert!((head.y - (240.0 + 3.0 * 0.08f64.sin())).abs() < EPS);
    }

    #[test]
    fn test_eating_grows_once() {
        let mut sim = pinned(SimConfig::default());
        sim.apple.pos = Point::new(323.0, 240.0);

        assert_eq!(sim.tick(Steering::default()), StepResult::Nommed(1));
        assert_eq!(sim.len(), 96);
        assert_eq!(sim.score(), 1);
        assert_eq!(sim.apple().pos, Point::new(0.0, 0.0));

        // relocated apple is far away, nothing more happens
        assert_eq!(sim.tick(Steering::default()), StepResult::Ongoing);
        assert_eq!(sim.len(), 96);
        assert_eq!(sim.score(), 1);
    }

    #[test]
    fn test_growth_count_follows_config() {
        let mut sim = pinned(SimConfig {
            segments_per_apple: 5,
            ..SimConfig::default()
        });
        sim.apple.pos = Point::new(323.0, 240.0);
        sim.tick(Steering::default());
        assert_eq!(sim.len(), 53);
    }

    #[test]
    fn test_straight_run_never_self_collides() {
        let mut sim = pinned(SimConfig {
            initial_length: 20,
            ..SimConfig::default()
        });
        // keep clear of the apple at the origin
        sim.apple.pos = Point::new(100.0, 100.0);
        for _ in 0..50 {
            assert_eq!(sim.tick(Steering::default()), StepResult::Ongoing);
        }
    }

    #[test]
    fn test_forced_overlap_terminates() {
        let mut sim = pinned(SimConfig::default());
        let head = sim.segments()[0].pos;
        let mut segments = sim.segments().to_vec();
        segments[10].pos = Point::new(head.x + 1.0, head.y + 1.0);
        sim.chain = Chain::from_segments(segments);
        assert_eq!(sim.self_collision(), Some(10));
    }

    #[test]
    fn test_circling_body_bites_itself() {
        let mut sim = pinned(SimConfig {
            initial_length: 120,
            ..SimConfig::default()
        });
        sim.apple.pos = Point::new(600.0, 50.0);
        let hard_right = Steering {
            left: false,
            right: true,
        };

        let mut outcome = StepResult::Ongoing;
        for _ in 0..400 {
            outcome = sim.tick(hard_right);
            if outcome != StepResult::Ongoing {
                break;
            }
        }
        match outcome {
            StepResult::Collision { index, final_score } => {
                assert!(index >= sim.safe_index());
                assert_eq!(final_score, 0);
            }
            other => panic!("expected a collision, got {:?}", other),
        }
    }

    #[test]
    fn test_invariants_hold_under_random_steering() {
        let mut sim = Simulation::new(SimConfig {
            seed: Some(11),
            ..SimConfig::default()
        })
        .expect("valid config");
        let mut driver = StdRng::seed_from_u64(99);

        for _ in 0..600 {
            let len_before = sim.len();
            let score_before = sim.score();
            let steering = Steering {
                left: driver.gen_bool(0.3),
                right: driver.gen_bool(0.3),
            };
            sim.tick(steering);

            assert!(sim.len() >= len_before);
            assert!(sim.score() >= score_before);
            if sim.score() > score_before {
                assert_eq!(sim.len(), len_before + 48);
            }
            for segment in sim.segments() {
                assert!(sim.torus().contains(segment.pos));
            }
            assert!(sim.torus().contains(sim.apple().pos));
            // freshly grown tail copies are still coincident until next tick
            if sim.score() == score_before {
                assert!(sim.chain().spacing_error(sim.torus()) < EPS);
            }
        }
    }
}

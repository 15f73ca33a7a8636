use std::time::{Duration, Instant};

use crate::sim::Steering;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Turn {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum Hold {
    #[default]
    Released,
    Held,
    Until(Instant),
}

impl Hold {
    fn is_held(&self, now: Instant) -> bool {
        match self {
            Hold::Released => false,
            Hold::Held => true,
            Hold::Until(deadline) => now < *deadline,
        }
    }
}

/// Tracks which turn keys are down.
///
/// Terminals that report key releases give exact held state. Everywhere else
/// a press (or auto-repeat) counts as held for `window`.
#[derive(Clone, Debug)]
pub struct HeldKeys {
    releases_reported: bool,
    window: Duration,
    left: Hold,
    right: Hold,
}

impl HeldKeys {
    pub fn new(releases_reported: bool, window: Duration) -> Self {
        HeldKeys {
            releases_reported,
            window,
            left: Hold::Released,
            right: Hold::Released,
        }
    }

    fn slot(&mut self, turn: Turn) -> &mut Hold {
        match turn {
            Turn::Left => &mut self.left,
            Turn::Right => &mut self.right,
        }
    }

    pub fn press(&mut self, turn: Turn, now: Instant) {
        let hold = if self.releases_reported {
            Hold::Held
        } else {
            Hold::Until(now + self.window)
        };
        *self.slot(turn) = hold;
    }

    pub fn release(&mut self, turn: Turn) {
        *self.slot(turn) = Hold::Released;
    }

    pub fn clear(&mut self) {
        self.left = Hold::Released;
        self.right = Hold::Released;
    }

    pub fn steering(&self, now: Instant) -> Steering {
        Steering {
            left: self.left.is_held(now),
            right: self.right.is_held(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reported_releases_hold_until_released() {
        let start = Instant::now();
        let mut keys = HeldKeys::new(true, Duration::from_millis(100));
        keys.press(Turn::Left, start);

        let later = start + Duration::from_secs(5);
        assert_eq!(
            keys.steering(later),
            Steering {
                left: true,
                right: false
            }
        );

        keys.release(Turn::Left);
        assert_eq!(keys.steering(later), Steering::default());
    }

    #[test]
    fn test_timed_hold_expires() {
        let start = Instant::now();
        let mut keys = HeldKeys::new(false, Duration::from_millis(100));
        keys.press(Turn::Right, start);

        assert!(keys.steering(start + Duration::from_millis(50)).right);
        assert!(!keys.steering(start + Duration::from_millis(100)).right);
    }

    #[test]
    fn test_repeat_extends_timed_hold() {
        let start = Instant::now();
        let mut keys = HeldKeys::new(false, Duration::from_millis(100));
        keys.press(Turn::Right, start);
        keys.press(Turn::Right, start + Duration::from_millis(80));

        assert!(keys.steering(start + Duration::from_millis(150)).right);
    }

    #[test]
    fn test_both_keys_and_clear() {
        let start = Instant::now();
        let mut keys = HeldKeys::new(true, Duration::from_millis(100));
        keys.press(Turn::Left, start);
        keys.press(Turn::Right, start);
        let steering = keys.steering(start);
        assert!(steering.left && steering.right);
        assert_eq!(steering.delta(0.08), 0.0);

        keys.clear();
        assert_eq!(keys.steering(start), Steering::default());
    }
}

use rand::Rng;

use crate::chain::Chain;
use crate::segment::Segment;
use crate::torus::{Point, Torus};

/// Uniform position on [0, width) x [0, height).
pub fn random_spot<R: Rng + ?Sized>(torus: &Torus, rng: &mut R) -> Point {
    Point {
        x: rng.gen_range(0.0..torus.width),
        y: rng.gen_range(0.0..torus.height),
    }
}

/// The head reached the apple: move the apple somewhere new and lengthen the
/// body by `count` tail copies.
pub fn feed<R: Rng + ?Sized>(
    chain: &mut Chain,
    apple: &mut Segment,
    torus: &Torus,
    rng: &mut R,
    count: usize,
) {
    apple.pos = random_spot(torus, rng);
    chain.grow(count);
}

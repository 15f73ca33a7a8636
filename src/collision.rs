use crate::chain::Chain;
use crate::segment::Segment;
use crate::torus::Torus;

/// First body index that is not structurally pressed against the head.
///
/// Segments sit `2 * clip_radius` apart, so everything closer than
/// `2 * radius` along a straight body always overlaps the head.
pub fn min_safe_index(radius: f64, clip_radius: f64) -> usize {
    (2.0 * radius / clip_radius).floor() as usize
}

pub fn head_reaches(chain: &Chain, target: &Segment, torus: &Torus) -> bool {
    chain.head().is_touching(target, torus)
}

/// Index of the first body segment at or past `safe_index` that the head
/// overlaps, if any.
pub fn self_collision(chain: &Chain, torus: &Torus, safe_index: usize) -> Option<usize> {
    let head = chain.head();
    chain
        .segments()
        .iter()
        .enumerate()
        .skip(safe_index.max(1))
        .find(|(_, segment)| head.is_touching(segment, torus))
        .map(|(i, _)| i)
}

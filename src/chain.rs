use crate::segment::Segment;
use crate::torus::{Point, Torus};

/// Ordered body segments, index 0 is the head. Only ever grows.
#[derive(Clone, Debug, PartialEq)]
pub struct Chain {
    segments: Vec<Segment>,
}

impl Chain {
    /// Lays `count` segments out in a straight line trailing left of `head`,
    /// each exactly tangent to the one before it.
    pub fn straight(
        torus: &Torus,
        head: Point,
        count: usize,
        radius: f64,
        clip_radius: f64,
    ) -> Self {
        let segments = (0..count.max(1))
            .map(|i| {
                let pos = Point {
                    x: (head.x - clip_radius * 2.0 * i as f64).rem_euclid(torus.width),
                    y: head.y,
                };
                Segment::new(torus.wrap_once(pos), radius, clip_radius)
            })
            .collect();
        Chain { segments }
    }

    #[cfg(test)]
    pub(crate) fn from_segments(segments: Vec<Segment>) -> Self {
        assert!(!segments.is_empty(), "a chain needs a head");
        Chain { segments }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn head(&self) -> &Segment {
        &self.segments[0]
    }

    pub fn tail(&self) -> &Segment {
        &self.segments[self.segments.len() - 1]
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// One tick of follow-the-leader motion.
    ///
    /// Trailing segments first step toward where their predecessor is now
    /// (tail first, so nobody reads a position that already moved), then the
    /// head steps along `heading`, then spacing is snapped back to exact
    /// tangency from the head outward.
    pub fn advance(&mut self, torus: &Torus, heading: f64, step: f64) {
        for i in (1..self.segments.len()).rev() {
            let leader = self.segments[i - 1].pos;
            self.segments[i].bring_towards(leader, torus, step);
        }

        self.segments[0].translate(torus, heading, step);

        for i in 1..self.segments.len() {
            let anchor = self.segments[i - 1];
            self.segments[i].clip_against(&anchor, torus);
        }
    }

    /// Appends `count` copies of the current tail, coincident with it.
    pub fn grow(&mut self, count: usize) {
        let tail = *self.tail();
        self.segments.extend(std::iter::repeat(tail).take(count));
    }

    /// Largest deviation from exact tangency between neighbours.
    pub fn spacing_error(&self, torus: &Torus) -> f64 {
        self.segments
            .windows(2)
            .map(|pair| {
                let target = pair[0].clip_radius + pair[1].clip_radius;
                (torus.distance(pair[0].pos, pair[1].pos) - target).abs()
            })
            .fold(0.0, f64::max)
    }

    /// Live segments paired with their brightness band.
    pub fn banded(&self) -> impl Iterator<Item = (usize, &Segment, u8)> + '_ {
        self.segments
            .iter()
            .enumerate()
            .map(|(i, segment)| (i, segment, band_shade(i)))
    }
}

/// Repeating 16-step brightness ramp: 255 down to 127 and back.
pub fn band_shade(index: usize) -> u8 {
    let step = (index % 16) as i32;
    let folded = if step > 8 { 16 - step } else { step };
    (255 - 16 * folded) as u8
}

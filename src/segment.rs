use crate::torus::{Point, Torus};

/// One circle of the body, or the apple.
///
/// `radius` is what the segment looks like and what it collides with;
/// `clip_radius` only decides how far apart neighbours in the chain sit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub pos: Point,
    pub radius: f64,
    pub clip_radius: f64,
}

impl Segment {
    pub fn new(pos: Point, radius: f64, clip_radius: f64) -> Self {
        Segment {
            pos,
            radius,
            clip_radius,
        }
    }

    pub fn translate(&mut self, torus: &Torus, angle: f64, distance: f64) {
        let moved = Point {
            x: self.pos.x + distance * angle.cos(),
            y: self.pos.y + distance * angle.sin(),
        };
        self.pos = torus.wrap_once(moved);
    }

    /// Circle overlap on display radii, boundary inclusive.
    pub fn is_touching(&self, other: &Segment, torus: &Torus) -> bool {
        let (dx, dy) = torus.displacement(self.pos, other.pos);
        let reach = self.radius + other.radius;
        dx * dx + dy * dy <= reach * reach
    }

    pub fn bring_towards(&mut self, target: Point, torus: &Torus, distance: f64) {
        let angle = torus.angle(self.pos, target);
        self.translate(torus, angle, distance);
    }

    /// Moves this segment along the line from `anchor` so the two are exactly
    /// tangent on their clipping radii, pulling in or pushing out as needed.
    pub fn clip_against(&mut self, anchor: &Segment, torus: &Torus) {
        let gap = anchor.clip_radius + self.clip_radius - torus.distance(anchor.pos, self.pos);
        let angle = torus.angle(anchor.pos, self.pos);
        self.translate(torus, angle, gap);
    }
}

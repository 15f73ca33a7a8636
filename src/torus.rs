#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// A rectangular plane whose opposite edges are identified.
///
/// Every geometric question in the simulation goes through here so that
/// motion across an edge measures the same as motion anywhere else.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Torus {
    pub width: f64,
    pub height: f64,
}

impl Torus {
    pub fn new(width: f64, height: f64) -> Self {
        Torus { width, height }
    }

    /// Shortest signed displacement from `from` to `to`, folded into
    /// (-width/2, width/2] x (-height/2, height/2].
    pub fn displacement(&self, from: Point, to: Point) -> (f64, f64) {
        (
            fold(to.x - from.x, self.width),
            fold(to.y - from.y, self.height),
        )
    }

    pub fn distance(&self, from: Point, to: Point) -> f64 {
        let (dx, dy) = self.displacement(from, to);
        dx.hypot(dy)
    }

    pub fn angle(&self, from: Point, to: Point) -> f64 {
        let (dx, dy) = self.displacement(from, to);
        dy.atan2(dx)
    }

    /// One wrap correction per axis. Callers only move by less than one
    /// domain width per step.
    pub fn wrap_once(&self, p: Point) -> Point {
        Point {
            x: wrap_axis(p.x, self.width),
            y: wrap_axis(p.y, self.height),
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        (0.0..self.width).contains(&p.x) && (0.0..self.height).contains(&p.y)
    }
}

fn fold(delta: f64, extent: f64) -> f64 {
    let d = delta.rem_euclid(extent);
    if d > extent / 2.0 {
        d - extent
    } else {
        d
    }
}

fn wrap_axis(value: f64, extent: f64) -> f64 {
    let mut v = if value >= extent {
        value - extent
    } else if value < 0.0 {
        value + extent
    } else {
        value
    };
    if !(0.0..extent).contains(&v) {
        v = v.rem_euclid(extent);
    }
    // -tiny + extent rounds up to extent
    if v >= extent {
        0.0
    } else {
        v
    }
}

use ratatui::{
    prelude::*,
    symbols::Marker,
    widgets::canvas::{Canvas, Circle, Context},
};

use crate::chain::Chain;
use crate::segment::Segment;
use crate::torus::{Point, Torus};

/// Read-only picture of the plane.
///
/// `greyed` counts how many segments from the head have been faded out by the
/// game-over effect.
pub struct ArenaView<'a> {
    torus: Torus,
    chain: &'a Chain,
    apple: &'a Segment,
    greyed: Option<usize>,
}

impl<'a> ArenaView<'a> {
    pub fn new(torus: Torus, chain: &'a Chain, apple: &'a Segment) -> Self {
        ArenaView {
            torus,
            chain,
            apple,
            greyed: None,
        }
    }

    pub fn greyed(mut self, count: usize) -> Self {
        self.greyed = Some(count);
        self
    }
}

/// Every place a circle must be drawn so it shows on both sides of any edge it
/// straddles, corners included. The first entry is the circle itself.
pub fn wrap_images(pos: Point, radius: f64, torus: &Torus) -> Vec<Point> {
    let mut xs = vec![pos.x];
    if pos.x >= torus.width - radius {
        xs.push(pos.x - torus.width);
    }
    if pos.x <= radius {
        xs.push(pos.x + torus.width);
    }
    let mut ys = vec![pos.y];
    if pos.y >= torus.height - radius {
        ys.push(pos.y - torus.height);
    }
    if pos.y <= radius {
        ys.push(pos.y + torus.height);
    }

    ys.iter()
        .flat_map(|&y| xs.iter().map(move |&x| Point { x, y }))
        .collect()
}

pub fn segment_color(index: usize, shade: u8, greyed: Option<usize>) -> Color {
    match greyed {
        Some(count) if index <= count => Color::Rgb(shade, shade, shade),
        _ => Color::Rgb(0, shade, 0),
    }
}

fn draw_wrapped(ctx: &mut Context, torus: &Torus, segment: &Segment, color: Color) {
    for image in wrap_images(segment.pos, segment.radius, torus) {
        // Canvas y grows upward, the plane's grows downward.
        ctx.draw(&Circle {
            x: image.x,
            y: torus.height - image.y,
            radius: segment.radius,
            color,
        });
    }
}

impl Widget for ArenaView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let torus = self.torus;
        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, torus.width])
            .y_bounds([0.0, torus.height])
            .paint(|ctx| {
                for (i, segment, shade) in self.chain.banded() {
                    draw_wrapped(ctx, &torus, segment, segment_color(i, shade, self.greyed));
                }
                draw_wrapped(ctx, &torus, self.apple, Color::Rgb(255, 0, 0));
            })
            .render(area, buf);
    }
}

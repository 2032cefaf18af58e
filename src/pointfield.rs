//! Mouse-reactive point field drawn behind the hero section.
//!
//! Coordinates are virtual pixels. Points drift at constant velocity, bounce
//! off the viewport edges, and are joined to each other and to the pointer by
//! lines whose opacity falls off linearly with distance.

use crate::graphics::Canvas;
use crate::math::{distance, link_opacity};
use crate::theme::{Theme, PRIMARY};
use rand::Rng;

/// Viewports narrower than this use the sparse density
pub const MOBILE_WIDTH: f64 = 768.0;
pub const MOBILE_DENSITY: f64 = 0.04;
pub const DESKTOP_DENSITY: f64 = 0.08;

/// Each velocity component is drawn from `(-MAX_SPEED, MAX_SPEED)`
pub const MAX_SPEED: f64 = 0.4;
pub const MIN_RADIUS: f64 = 1.0;
pub const MAX_RADIUS: f64 = 2.5;

pub const POINTER_LINK_DISTANCE: f64 = 180.0;
pub const POINTER_LINK_OPACITY: f64 = 0.4;
pub const PAIR_LINK_DISTANCE: f64 = 120.0;
pub const PAIR_LINK_OPACITY: f64 = 0.15;

/// Where the pointer "is" when it is not over the viewport
pub const FAR_AWAY: [f64; 2] = [-1000.0, -1000.0];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Viewport { width, height }
    }

    pub fn is_mobile(&self) -> bool {
        self.width < MOBILE_WIDTH
    }
}

/// Last known pointer position, read once per frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pointer {
    At([f64; 2]),
    Away,
}

impl Pointer {
    pub fn position(&self) -> [f64; 2] {
        match *self {
            Pointer::At(pos) => pos,
            Pointer::Away => FAR_AWAY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
    pub radius: f64,
}

impl Point {
    /// Moves by one velocity step and reflects off the viewport edges
    pub fn advance(&mut self, viewport: &Viewport) {
        self.x += self.dx;
        self.y += self.dy;

        if self.x < 0.0 || self.x > viewport.width {
            self.dx = -self.dx;
        }
        if self.y < 0.0 || self.y > viewport.height {
            self.dy = -self.dy;
        }
    }
}

/// A line the next paint will draw, with its opacity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub from: [f64; 2],
    pub to: [f64; 2],
    pub opacity: f64,
}

/// Number of points for a viewport of the given width
pub fn point_count(width: f64) -> usize {
    let density = if width < MOBILE_WIDTH {
        MOBILE_DENSITY
    } else {
        DESKTOP_DENSITY
    };
    (width * density).floor().max(0.0) as usize
}

/// Point fill opacity for the given theme
pub fn point_opacity(theme: Theme) -> f64 {
    if theme.is_dark() {
        0.4
    } else {
        0.2
    }
}

#[derive(Debug, Clone)]
pub struct PointField {
    viewport: Viewport,
    points: Vec<Point>,
    pointer: Pointer,
}

impl PointField {
    pub fn new<R: Rng + ?Sized>(viewport: Viewport, rng: &mut R) -> Self {
        let mut field = PointField {
            viewport,
            points: Vec::new(),
            pointer: Pointer::Away,
        };
        field.resize(viewport, rng);
        field
    }

    /// Discards every point and generates a fresh set for `viewport`
    pub fn resize<R: Rng + ?Sized>(&mut self, viewport: Viewport, rng: &mut R) {
        self.viewport = viewport;
        let count = point_count(viewport.width);
        self.points = (0..count)
            .map(|_| Point {
                x: rng.gen::<f64>() * viewport.width,
                y: rng.gen::<f64>() * viewport.height,
                dx: (rng.gen::<f64>() - 0.5) * 2.0 * MAX_SPEED,
                dy: (rng.gen::<f64>() - 0.5) * 2.0 * MAX_SPEED,
                radius: MIN_RADIUS + rng.gen::<f64>() * (MAX_RADIUS - MIN_RADIUS),
            })
            .collect();
        log::debug!(
            "Point field regenerated: {} points for {}x{}",
            count,
            viewport.width,
            viewport.height
        );
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn pointer(&self) -> Pointer {
        self.pointer
    }

    pub fn set_pointer(&mut self, position: [f64; 2]) {
        self.pointer = Pointer::At(position);
    }

    pub fn clear_pointer(&mut self) {
        self.pointer = Pointer::Away;
    }

    /// Advances every point by one frame
    pub fn step(&mut self) {
        let viewport = self.viewport;
        for point in self.points.iter_mut() {
            point.advance(&viewport);
        }
    }

    /// Lines from points to the pointer
    pub fn pointer_links(&self) -> Vec<Link> {
        let target = self.pointer.position();
        self.points
            .iter()
            .filter_map(|p| {
                let from = [p.x, p.y];
                link_opacity(
                    distance(from, target),
                    POINTER_LINK_DISTANCE,
                    POINTER_LINK_OPACITY,
                )
                .map(|opacity| Link {
                    from,
                    to: target,
                    opacity,
                })
            })
            .collect()
    }

    /// Lines between every unordered pair of nearby points
    pub fn pair_links(&self) -> Vec<Link> {
        let mut links = Vec::new();
        for (i, a) in self.points.iter().enumerate() {
            for b in &self.points[i + 1..] {
                let from = [a.x, a.y];
                let to = [b.x, b.y];
                if let Some(opacity) =
                    link_opacity(distance(from, to), PAIR_LINK_DISTANCE, PAIR_LINK_OPACITY)
                {
                    links.push(Link { from, to, opacity });
                }
            }
        }
        links
    }

    /// Steps the simulation and paints it onto `canvas`, scaling virtual
    /// pixels to the canvas resolution
    pub fn frame(&mut self, theme: Theme, canvas: &mut Canvas) {
        self.step();
        self.paint(theme, canvas);
    }

    pub fn paint(&self, theme: Theme, canvas: &mut Canvas) {
        canvas.clear(theme.background());
        if self.viewport.width <= 0.0 || self.viewport.height <= 0.0 {
            return;
        }
        let sx = canvas.width() as f64 / self.viewport.width;
        let sy = canvas.height() as f64 / self.viewport.height;

        let fill = point_opacity(theme);
        for p in &self.points {
            canvas.fill_circle(p.x * sx, p.y * sy, p.radius * sx, PRIMARY, fill);
        }
        for link in self.pointer_links().iter().chain(self.pair_links().iter()) {
            canvas.draw_line(
                link.from[0] * sx,
                link.from[1] * sy,
                link.to[0] * sx,
                link.to[1] * sy,
                PRIMARY,
                link.opacity,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const EPS: f64 = 1e-9;

    fn point(x: f64, y: f64) -> Point {
        Point {
            x,
            y,
            dx: 0.0,
            dy: 0.0,
            radius: 1.0,
        }
    }

    fn field_with(points: Vec<Point>) -> PointField {
        let mut rng = StdRng::seed_from_u64(1);
        let mut field = PointField::new(Viewport::new(100.0, 100.0), &mut rng);
        field.points = points;
        field
    }

    #[test]
    fn desktop_density() {
        assert_eq!(point_count(1024.0), 81);
        assert_eq!(point_count(768.0), 61);
    }

    #[test]
    fn mobile_density() {
        assert_eq!(point_count(767.0), 30);
        assert_eq!(point_count(375.0), 15);
        assert_eq!(point_count(0.0), 0);
    }

    #[test]
    fn generated_points_respect_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let viewport = Viewport::new(1024.0, 600.0);
        let field = PointField::new(viewport, &mut rng);
        assert_eq!(field.points().len(), 81);
        for p in field.points() {
            assert!((0.0..=viewport.width).contains(&p.x));
            assert!((0.0..=viewport.height).contains(&p.y));
            assert!(p.dx.abs() <= MAX_SPEED && p.dy.abs() <= MAX_SPEED);
            assert!(p.radius >= MIN_RADIUS && p.radius < MAX_RADIUS);
        }
    }

    #[test]
    fn resize_regenerates_for_new_width() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut field = PointField::new(Viewport::new(1024.0, 600.0), &mut rng);
        field.resize(Viewport::new(500.0, 400.0), &mut rng);
        assert_eq!(field.points().len(), 20);
        assert!(field.points().iter().all(|p| p.x <= 500.0 && p.y <= 400.0));
    }

    #[test]
    fn velocity_flips_once_on_crossing() {
        let viewport = Viewport::new(100.0, 100.0);
        let mut p = Point {
            x: 99.8,
            y: 50.0,
            dx: 0.4,
            dy: 0.1,
            radius: 1.0,
        };
        p.advance(&viewport);
        assert!(p.x > 100.0);
        assert_eq!(p.dx, -0.4);
        assert_eq!(p.dy, 0.1);
        p.advance(&viewport);
        assert!(p.x <= 100.0);
        assert_eq!(p.dx, -0.4);
    }

    #[test]
    fn pair_link_threshold() {
        let field = field_with(vec![point(0.0, 0.0), point(120.0, 0.0)]);
        assert!(field.pair_links().is_empty());

        let field = field_with(vec![point(0.0, 0.0), point(30.0, 40.0)]);
        let links = field.pair_links();
        assert_eq!(links.len(), 1);
        assert!((links[0].opacity - 0.15 * (1.0 - 50.0 / 120.0)).abs() < EPS);
    }

    #[test]
    fn pairs_are_unordered_and_unique() {
        let field = field_with(vec![point(0.0, 0.0), point(10.0, 0.0), point(20.0, 0.0)]);
        assert_eq!(field.pair_links().len(), 3);
    }

    #[test]
    fn pointer_link_threshold() {
        let mut field = field_with(vec![point(0.0, 0.0), point(300.0, 0.0)]);
        field.set_pointer([90.0, 0.0]);
        let links = field.pointer_links();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].from, [0.0, 0.0]);
        assert!((links[0].opacity - 0.4 * (1.0 - 90.0 / 180.0)).abs() < EPS);

        field.set_pointer([600.0, 0.0]);
        assert!(field.pointer_links().is_empty());
    }

    #[test]
    fn pointer_exactly_at_threshold_is_not_linked() {
        let mut field = field_with(vec![point(0.0, 0.0)]);
        field.set_pointer([POINTER_LINK_DISTANCE, 0.0]);
        assert!(field.pointer_links().is_empty());

        field.set_pointer([POINTER_LINK_DISTANCE - 0.5, 0.0]);
        assert_eq!(field.pointer_links().len(), 1);
    }

    #[test]
    fn frame_steps_then_paints() {
        let mut field = field_with(vec![Point {
            x: 50.0,
            y: 50.0,
            dx: 0.4,
            dy: 0.0,
            radius: 1.0,
        }]);
        let mut canvas = Canvas::new(100, 100, Theme::Light.background()).unwrap();
        field.frame(Theme::Dark, &mut canvas);
        assert!((field.points()[0].x - 50.4).abs() < EPS);
        assert_eq!(canvas.pixel(0, 0), Some(Theme::Dark.background()));
        assert_ne!(canvas.pixel(50, 50), Some(Theme::Dark.background()));
    }

    #[test]
    fn away_pointer_draws_no_lines() {
        let mut field = field_with(vec![point(0.0, 0.0), point(50.0, 50.0)]);
        field.set_pointer([10.0, 10.0]);
        field.clear_pointer();
        assert_eq!(field.pointer(), Pointer::Away);
        assert!(field.pointer_links().is_empty());
    }

    #[test]
    fn paint_uses_injected_theme() {
        let field = field_with(vec![]);
        let mut canvas = Canvas::new(10, 10, Theme::Light.background()).unwrap();
        field.paint(Theme::Dark, &mut canvas);
        assert_eq!(canvas.pixel(5, 5), Some(Theme::Dark.background()));
    }

    #[test]
    fn paint_draws_points() {
        let field = field_with(vec![point(50.0, 50.0)]);
        let mut canvas = Canvas::new(100, 100, Theme::Dark.background()).unwrap();
        field.paint(Theme::Dark, &mut canvas);
        assert_ne!(canvas.pixel(50, 50), Some(Theme::Dark.background()));
    }

    proptest! {
        #[test]
        fn points_stay_near_bounds(seed in any::<u64>(), frames in 2usize..400) {
            let mut rng = StdRng::seed_from_u64(seed);
            let viewport = Viewport::new(800.0, 600.0);
            let mut field = PointField::new(viewport, &mut rng);
            for _ in 0..frames {
                field.step();
            }
            // a point may overshoot by at most one velocity step before bouncing back
            for p in field.points() {
                prop_assert!(p.x >= -MAX_SPEED && p.x <= viewport.width + MAX_SPEED);
                prop_assert!(p.y >= -MAX_SPEED && p.y <= viewport.height + MAX_SPEED);
            }
        }
    }
}

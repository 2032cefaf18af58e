/// An opaque RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Source-over blend of `self` onto `dst` with the given alpha
    pub fn over(self, dst: Rgb, alpha: f64) -> Rgb {
        let a = alpha.clamp(0.0, 1.0);
        let mix = |s: u8, d: u8| (s as f64 * a + d as f64 * (1.0 - a)).round() as u8;
        Rgb {
            r: mix(self.r, dst.r),
            g: mix(self.g, dst.g),
            b: mix(self.b, dst.b),
        }
    }
}

/// RGB pixel buffer the animations draw into
#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixel_data: Vec<Rgb>,
}

impl Canvas {
    /// Allocates a canvas, or `None` when either side is zero
    pub fn new(width: usize, height: usize, background: Rgb) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Canvas {
            width,
            height,
            pixel_data: vec![background; width * height],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Reallocates the buffer; contents are reset to `background`
    pub fn resize(&mut self, width: usize, height: usize, background: Rgb) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        self.width = width;
        self.height = height;
        self.pixel_data = vec![background; width * height];
        true
    }

    pub fn clear(&mut self, background: Rgb) {
        self.pixel_data.fill(background);
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x < self.width && y < self.height {
            Some(self.pixel_data[y * self.width + x])
        } else {
            None
        }
    }

    /// Blends a colour onto one pixel; out-of-bounds writes are dropped
    pub fn blend_pixel(&mut self, x: isize, y: isize, color: Rgb, alpha: f64) {
        if x < 0 || y < 0 || x >= self.width as isize || y >= self.height as isize {
            return;
        }
        let offset = y as usize * self.width + x as usize;
        self.pixel_data[offset] = color.over(self.pixel_data[offset], alpha);
    }

    /// Fills a circle. The centre pixel is always plotted so that sub-pixel
    /// radii stay visible.
    pub fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Rgb, alpha: f64) {
        let center_x = cx.floor() as isize;
        let center_y = cy.floor() as isize;
        let reach = radius.ceil() as isize;
        let r2 = radius * radius;

        for y in (center_y - reach)..=(center_y + reach) {
            for x in (center_x - reach)..=(center_x + reach) {
                let px = x as f64 + 0.5 - cx;
                let py = y as f64 + 0.5 - cy;
                let is_center = x == center_x && y == center_y;
                if is_center || px * px + py * py <= r2 {
                    self.blend_pixel(x, y, color, alpha);
                }
            }
        }
    }

    /// Draws a line between two points using Bresenham's algorithm
    pub fn draw_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: Rgb, alpha: f64) {
        let (mut x0, mut y0, x1, y1) = (
            x0.floor() as isize,
            y0.floor() as isize,
            x1.floor() as isize,
            y1.floor() as isize,
        );
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy; // error value e_xy

        loop {
            self.blend_pixel(x0, y0, color, alpha);

            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }
}

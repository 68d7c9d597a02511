//! Geometry Module
//!
//! Aspect-fit scaling and centering math shared by every renderer.
//! Coordinates are y-down raster coordinates with the origin at the top left.

// == Size ==
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// The shorter of the two dimensions.
    pub fn min_side(&self) -> f64 {
        self.width.min(self.height)
    }

    /// True if either dimension is zero, negative or not finite.
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }
}

impl From<(u32, u32)> for Size {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width as f64, height as f64)
    }
}

// == Point ==
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

// == Rect ==
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

/// A rectangle snapped to whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    pub fn min_x(&self) -> f64 {
        self.origin.x
    }

    pub fn min_y(&self) -> f64 {
        self.origin.y
    }

    pub fn max_x(&self) -> f64 {
        self.origin.x + self.size.width
    }

    pub fn max_y(&self) -> f64 {
        self.origin.y + self.size.height
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }

    /// Rounds the edges to whole pixels. Empty rectangles stay empty.
    pub fn to_pixels(&self) -> PixelRect {
        let x0 = self.min_x().round();
        let y0 = self.min_y().round();
        let x1 = self.max_x().round();
        let y1 = self.max_y().round();
        PixelRect {
            x: x0 as i64,
            y: y0 as i64,
            width: (x1 - x0).max(0.0) as u32,
            height: (y1 - y0).max(0.0) as u32,
        }
    }
}

// == Fit Size ==
/// Scales `source` to the largest size that fits in `bounds` with its aspect
/// ratio preserved. The scale may exceed 1.
pub fn fit_size(source: Size, bounds: Size) -> Size {
    let scale = (bounds.width / source.width).min(bounds.height / source.height);
    Size::new(source.width * scale, source.height * scale)
}

// == Center Offset ==
/// Offset that centers `fit` inside `bounds`.
pub fn center_offset(bounds: Size, fit: Size) -> Point {
    Point::new(
        (bounds.width - fit.width) / 2.0,
        (bounds.height - fit.height) / 2.0,
    )
}

/// Aspect-fits `source` into `bounds` and centers it.
pub fn fitted_rect(source: Size, bounds: Size) -> Rect {
    let fit = fit_size(source, bounds);
    Rect::from_origin_size(center_offset(bounds, fit), fit)
}

/// Square of `side` centered within `rect`.
pub fn centered_square(rect: Rect, side: f64) -> Rect {
    let center = rect.center();
    Rect::new(center.x - side / 2.0, center.y - side / 2.0, side, side)
}

/// Square of `side` anchored to the bottom-right corner of `rect`, `inset`
/// pixels in from both edges.
pub fn bottom_right_square(rect: Rect, side: f64, inset: f64) -> Rect {
    Rect::new(
        rect.max_x() - side - inset,
        rect.max_y() - side - inset,
        side,
        side,
    )
}

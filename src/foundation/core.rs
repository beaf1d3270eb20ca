pub use kurbo::Affine;

/// Single-precision 2D point.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point32 {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate, growing downward.
    pub y: f32,
}

impl Point32 {
    /// `(0, 0)`.
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Point at `(x, y)`.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<kurbo::Point> for Point32 {
    fn from(p: kurbo::Point) -> Self {
        Self::new(p.x as f32, p.y as f32)
    }
}

impl From<Point32> for kurbo::Point {
    fn from(p: Point32) -> Self {
        kurbo::Point::new(f64::from(p.x), f64::from(p.y))
    }
}

/// Single-precision 2D size.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Size32 {
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl Size32 {
    /// Size of `width` x `height`.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Single-precision rectangle stored as origin + size.
///
/// Negative sizes are allowed but make the rectangle empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rect32 {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width; `<= 0` means empty.
    pub width: f32,
    /// Height; `<= 0` means empty.
    pub height: f32,
}

impl Rect32 {
    /// Zero-sized rectangle at the origin.
    pub const EMPTY: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Rectangle with origin `(x, y)` and the given size.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle from its four edges.
    pub fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    /// Rectangle from origin and size.
    pub fn from_location_size(location: Point32, size: Size32) -> Self {
        Self::new(location.x, location.y, size.width, size.height)
    }

    /// Axis-aligned bounding box of `points`; [`Rect32::EMPTY`] for an empty slice.
    pub fn from_points(points: &[Point32]) -> Self {
        let Some(first) = points.first() else {
            return Self::EMPTY;
        };
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Self::from_ltrb(min_x, min_y, max_x, max_y)
    }

    /// Left edge, `x`.
    pub fn left(self) -> f32 {
        self.x
    }

    /// Top edge, `y`.
    pub fn top(self) -> f32 {
        self.y
    }

    /// Right edge, `x + width`.
    pub fn right(self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge, `y + height`.
    pub fn bottom(self) -> f32 {
        self.y + self.height
    }

    /// Top-left corner.
    pub fn location(self) -> Point32 {
        Point32::new(self.x, self.y)
    }

    /// Width and height.
    pub fn size(self) -> Size32 {
        Size32::new(self.width, self.height)
    }

    /// Whether the rectangle encloses no area.
    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Half-open containment: left/top edges are inside, right/bottom edges are not.
    pub fn contains(self, x: f32, y: f32) -> bool {
        x >= self.left() && x < self.right() && y >= self.top() && y < self.bottom()
    }

    /// Whether the interiors overlap; touching edges do not count.
    pub fn intersects_with(self, other: Self) -> bool {
        !(self.left() >= other.right()
            || self.right() <= other.left()
            || self.top() >= other.bottom()
            || self.bottom() <= other.top())
    }

    /// Overlap of both rectangles. Touching rectangles yield a zero-area rectangle on the
    /// shared edge; disjoint rectangles yield [`Rect32::EMPTY`].
    pub fn intersect(self, other: Self) -> Self {
        if self.left() > other.right()
            || self.right() < other.left()
            || self.top() > other.bottom()
            || self.bottom() < other.top()
        {
            return Self::EMPTY;
        }
        Self::from_ltrb(
            self.left().max(other.left()),
            self.top().max(other.top()),
            self.right().min(other.right()),
            self.bottom().min(other.bottom()),
        )
    }

    /// Smallest rectangle containing both.
    pub fn union(self, other: Self) -> Self {
        Self::from_ltrb(
            self.left().min(other.left()),
            self.top().min(other.top()),
            self.right().max(other.right()),
            self.bottom().max(other.bottom()),
        )
    }

    /// Grows by `dx` on the left and right and by `dy` on the top and bottom.
    pub fn inflate(self, dx: f32, dy: f32) -> Self {
        Self::new(
            self.x - dx,
            self.y - dy,
            self.width + dx * 2.0,
            self.height + dy * 2.0,
        )
    }

    /// Moves by `(dx, dy)`.
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

impl From<kurbo::Rect> for Rect32 {
    fn from(r: kurbo::Rect) -> Self {
        Self::from_ltrb(r.x0 as f32, r.y0 as f32, r.x1 as f32, r.y1 as f32)
    }
}

impl From<Rect32> for kurbo::Rect {
    fn from(r: Rect32) -> Self {
        kurbo::Rect::new(
            f64::from(r.left()),
            f64::from(r.top()),
            f64::from(r.right()),
            f64::from(r.bottom()),
        )
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red, premultiplied.
    pub r: u8,
    /// Green, premultiplied.
    pub g: u8,
    /// Blue, premultiplied.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Rgba8Premul {
    /// All channels zero.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Premultiplies a straight color, rounding to nearest.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// `[r, g, b, a]`.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

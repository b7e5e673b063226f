//! Integer screen-space rectangles.

/// A point in world pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle, origin top-left, y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Rect of the given size whose centre is `(cx, cy)`.
    pub const fn centered(cx: i32, cy: i32, w: i32, h: i32) -> Self {
        Self::new(cx - w / 2, cy - h / 2, w, h)
    }

    pub const fn left(&self) -> i32 {
        self.x
    }

    pub const fn right(&self) -> i32 {
        self.x + self.w
    }

    pub const fn top(&self) -> i32 {
        self.y
    }

    pub const fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub const fn center(&self) -> Point {
        Point::new(self.x + self.w / 2, self.y + self.h / 2)
    }

    pub fn set_center(&mut self, cx: i32, cy: i32) {
        self.x = cx - self.w / 2;
        self.y = cy - self.h / 2;
    }

    /// Strict overlap: rects that only share an edge do not intersect.
    pub const fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Half-open containment: left/top edges are inside, right/bottom are not.
    pub const fn contains(&self, p: Point) -> bool {
        p.x >= self.left() && p.x < self.right() && p.y >= self.top() && p.y < self.bottom()
    }
}

//! Scrolling ground strip.

#[derive(Debug, Clone, Default)]
pub struct GroundScroller {
    offset: i32,
    wrap: i32,
}

impl GroundScroller {
    pub fn new(wrap: i32) -> Self {
        Self { offset: 0, wrap }
    }

    pub fn advance(&mut self, speed: i32) {
        self.offset -= speed;
        if self.offset.abs() > self.wrap {
            self.offset = 0;
        }
    }

    /// Always in `-wrap..=0`.
    pub fn offset(&self) -> i32 {
        self.offset
    }
}

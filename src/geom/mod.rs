use crate::types::Vec2;

pub fn lerp(a: f32, b: f32, fraction: f32) -> f32 {
    a * (1.0 - fraction) + b * fraction
}

/// How close `x` is to `target`, from `1.0` (equal) down to `0.0` at `cutoff`
/// distance or beyond. `cutoff` must be positive.
pub fn proximity(x: f32, target: f32, cutoff: f32) -> f32 {
    debug_assert!(cutoff > 0.0, "proximity cutoff must be positive");
    let dist = (x - target).abs();
    1.0 - dist.min(cutoff) / cutoff
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aabb {
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
}

impl Aabb {
    pub fn new(x_min: f32, x_max: f32, y_min: f32, y_max: f32) -> Self {
        debug_assert!(x_min <= x_max, "x_min must not exceed x_max");
        debug_assert!(y_min <= y_max, "y_min must not exceed y_max");
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    pub fn centered(half_width: f32, half_height: f32) -> Self {
        Self::new(-half_width, half_width, -half_height, half_height)
    }

    pub fn x_center(&self) -> f32 {
        self.x_min + (self.x_max - self.x_min) / 2.0
    }

    pub fn y_center(&self) -> f32 {
        self.y_min + (self.y_max - self.y_min) / 2.0
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x_center(), self.y_center())
    }

    pub fn width(&self) -> f32 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f32 {
        self.y_max - self.y_min
    }

    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x_min, self.y_min)
    }

    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.x_min, self.y_min)
    }

    pub fn top_right(&self) -> Vec2 {
        Vec2::new(self.x_max, self.y_min)
    }

    pub fn bottom_left(&self) -> Vec2 {
        Vec2::new(self.x_min, self.y_max)
    }

    pub fn bottom_right(&self) -> Vec2 {
        Vec2::new(self.x_max, self.y_max)
    }

    pub fn contains_x(&self, x: f32) -> bool {
        x >= self.x_min && x <= self.x_max
    }

    pub fn contains_y(&self, y: f32) -> bool {
        y >= self.y_min && y <= self.y_max
    }

    pub fn contains(&self, pos: Vec2) -> bool {
        self.contains_x(pos.x) && self.contains_y(pos.y)
    }

    pub fn is_empty(&self) -> bool {
        self.x_min == self.x_max || self.y_min == self.y_max
    }
}

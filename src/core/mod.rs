mod star;

pub use star::{random_star_color, random_star_hue, saturation_for_hue, Star};

use rand::Rng;

use crate::{
    config,
    geom::Aabb,
    types::{StarColor, Vec2},
};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CanvasLayout {
    pub width: u32,
    pub height: u32,
    pub window_offset: Vec2,
}

impl CanvasLayout {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            window_offset: Vec2::ZERO,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarSnapshot {
    pub pos: Vec2,
    pub radius: f32,
    pub color: StarColor,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StarfieldState {
    /// Offset of the canvas inside the host window. Recorded but not yet used
    /// to keep stars aligned when the canvas moves.
    pub window_offset: Vec2,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub camera_bounds: Aabb,
    pub particle_count: usize,
    pub explosiveness: f32,
    pub stars: Vec<Star>,
}

impl Default for StarfieldState {
    fn default() -> Self {
        Self {
            window_offset: Vec2::ZERO,
            canvas_width: 0,
            canvas_height: 0,
            camera_bounds: Aabb::default(),
            particle_count: config::DEFAULT_PARTICLE_COUNT,
            explosiveness: config::DEFAULT_EXPLOSIVENESS,
            stars: Vec::new(),
        }
    }
}

impl StarfieldState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_particle_count(self, particle_count: usize) -> Self {
        Self {
            particle_count,
            ..self
        }
    }

    pub fn with_explosiveness(self, explosiveness: f32) -> Self {
        let explosiveness = if explosiveness.is_finite() {
            explosiveness.clamp(f32::MIN_POSITIVE, 1.0)
        } else {
            1.0
        };
        Self {
            explosiveness,
            ..self
        }
    }

    pub fn canvas_size(&self) -> (u32, u32) {
        (self.canvas_width, self.canvas_height)
    }

    fn canvas_is_empty(&self) -> bool {
        self.canvas_width == 0 || self.canvas_height == 0
    }

    pub fn camera_scale(&self) -> Vec2 {
        Vec2::new(
            calc_non_zero_scale(self.canvas_width as f32, self.camera_bounds.width()),
            calc_non_zero_scale(self.canvas_height as f32, self.camera_bounds.height()),
        )
    }

    /// Bounds are only recomputed when they were unset or the canvas size
    /// changed. Existing stars keep their camera positions across a resize, so
    /// they may jump on screen.
    pub fn update_bounds<R: Rng + ?Sized>(&self, layout: &CanvasLayout, rng: &mut R) -> Self {
        let size_changed = self.canvas_size() != (layout.width, layout.height);
        let camera_bounds =
            if !self.camera_bounds.is_empty() && !self.canvas_is_empty() && !size_changed {
                self.camera_bounds
            } else {
                // TODO: shift existing stars so they keep their on-screen position when the
                // canvas is resized or moved within the window.
                let bounds =
                    Aabb::centered(layout.width as f32 / 2.0, layout.height as f32 / 2.0);
                tracing::debug!(
                    width = layout.width,
                    height = layout.height,
                    "camera bounds recomputed"
                );
                bounds
            };

        let stars = maybe_add_stars(
            self,
            self.particle_count,
            &camera_bounds,
            self.explosiveness,
            rng,
        );

        Self {
            window_offset: layout.window_offset,
            canvas_width: layout.width,
            canvas_height: layout.height,
            camera_bounds,
            particle_count: self.particle_count,
            explosiveness: self.explosiveness,
            stars,
        }
    }

    pub fn update<R: Rng + ?Sized>(&self, dt: f32, steering: Vec2, rng: &mut R) -> Self {
        let steer = steering.div_components(self.camera_scale());
        let bounds = self.camera_bounds;
        let moved = Self {
            window_offset: self.window_offset,
            canvas_width: self.canvas_width,
            canvas_height: self.canvas_height,
            camera_bounds: bounds,
            particle_count: self.particle_count,
            explosiveness: self.explosiveness,
            stars: self
                .stars
                .iter()
                .map(|star| {
                    let mut star = *star;
                    star.update(dt, &bounds, steer, rng);
                    star
                })
                .collect(),
        };
        let stars = maybe_add_stars(
            &moved,
            moved.particle_count,
            &bounds,
            moved.explosiveness,
            rng,
        );
        Self { stars, ..moved }
    }

    pub fn camera_to_canvas(&self, pos: Vec2) -> Vec2 {
        let scale = self.camera_scale();
        Vec2::new(
            if scale.x == 0.0 {
                0.0
            } else {
                (pos.x - self.camera_bounds.x_min) / scale.x
            },
            if scale.y == 0.0 {
                0.0
            } else {
                (pos.y - self.camera_bounds.y_min) / scale.y
            },
        )
    }

    pub fn live_stars(&self) -> impl Iterator<Item = &Star> + '_ {
        self.stars.iter().filter(|star| star.alive)
    }

    pub fn snapshot(&self, out: &mut Vec<StarSnapshot>) {
        out.clear();
        out.extend(self.live_stars().map(|star| StarSnapshot {
            pos: self.camera_to_canvas(star.pos),
            radius: star.radius,
            color: star.color,
        }));
    }
}

/// `a / b`, or `1.0` when either side is zero or non-finite.
pub fn calc_non_zero_scale(a: f32, b: f32) -> f32 {
    if a == 0.0 || !a.is_finite() || b == 0.0 || !b.is_finite() {
        1.0
    } else {
        a / b
    }
}

pub fn maybe_add_stars<R: Rng + ?Sized>(
    prev: &StarfieldState,
    particle_count: usize,
    camera_bounds: &Aabb,
    explosiveness: f32,
    rng: &mut R,
) -> Vec<Star> {
    let needed = particle_count.saturating_sub(prev.stars.len());
    if needed == 0 || camera_bounds.is_empty() {
        return prev.stars.clone();
    }

    let new_count = if needed == 1 {
        1
    } else {
        ((needed as f32 * explosiveness) as usize).clamp(1, needed)
    };
    tracing::trace!(needed, new_count, "spawning stars");

    let mut stars = Vec::with_capacity(prev.stars.len() + new_count);
    stars.extend_from_slice(&prev.stars);
    stars.extend((0..new_count).map(|_| Star::spawn(camera_bounds, rng)));
    stars
}

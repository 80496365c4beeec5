use crate::{
    core::{CanvasLayout, StarSnapshot},
    types::{StarColor, Vec2},
};

/// Canvas units per terminal row.
pub const CELL_ASPECT: f32 = 2.0;

const OVERLAY_DEPTH: f32 = 1.0e9;
const RING_SAMPLES: usize = 96;
const MIN_VISIBLE_ALPHA: f32 = 0.02;
const THICK_STROKE: f32 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn canvas_layout(&self) -> CanvasLayout {
        CanvasLayout::new(
            self.width as u32,
            (self.height as f32 * CELL_ASPECT) as u32,
        )
    }

    pub fn canvas_center(&self) -> Vec2 {
        Vec2::new(
            self.width as f32 / 2.0,
            self.height as f32 * CELL_ASPECT / 2.0,
        )
    }

    fn cell_for(&self, pos: Vec2) -> Option<(u16, u16)> {
        let x = pos.x.floor();
        let y = (pos.y / CELL_ASPECT).floor();
        if x < 0.0 || y < 0.0 || x >= self.width as f32 || y >= self.height as f32 {
            return None;
        }
        Some((x as u16, y as u16))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetOverlay {
    pub center: Vec2,
    pub radius: f32,
    pub alpha: f32,
    pub stroke: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderCell {
    pub ch: char,
    pub depth: f32,
    pub color: StarColor,
}

impl RenderCell {
    const BLANK: RenderCell = RenderCell {
        ch: ' ',
        depth: f32::NEG_INFINITY,
        color: StarColor::WHITE,
    };
}

#[derive(Debug)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<RenderCell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let mut buffer = Self {
            width,
            height,
            cells: Vec::new(),
        };
        buffer.resize(width, height);
        buffer
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let len = (width as usize).saturating_mul(height as usize);
        if self.cells.len() != len {
            self.cells.resize(len, RenderCell::BLANK);
        }
        self.clear();
    }

    pub fn clear(&mut self) {
        self.cells.fill(RenderCell::BLANK);
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn get(&self, x: u16, y: u16) -> RenderCell {
        debug_assert!(x < self.width && y < self.height, "get() out of bounds");
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        self.cells[idx]
    }

    fn set(&mut self, x: u16, y: u16, ch: char, depth: f32, color: StarColor) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        let cell = &mut self.cells[idx];
        if depth >= cell.depth {
            *cell = RenderCell { ch, depth, color };
        }
    }
}

pub fn draw(
    stars: &[StarSnapshot],
    overlay: Option<&TargetOverlay>,
    viewport: Viewport,
    frame: &mut FrameBuffer,
) {
    if frame.width() != viewport.width || frame.height() != viewport.height {
        frame.resize(viewport.width, viewport.height);
    } else {
        frame.clear();
    }

    for star in stars {
        if let Some((x, y)) = viewport.cell_for(star.pos) {
            frame.set(x, y, star_glyph(star.radius), star.radius, star.color);
        }
    }

    if let Some(overlay) = overlay {
        draw_target(overlay, viewport, frame);
    }
}

fn draw_target(overlay: &TargetOverlay, viewport: Viewport, frame: &mut FrameBuffer) {
    if overlay.alpha < MIN_VISIBLE_ALPHA || overlay.radius <= 0.0 {
        return;
    }
    let ch = if overlay.stroke >= THICK_STROKE { 'O' } else { 'o' };
    let color = StarColor::WHITE.dimmed(overlay.alpha);
    for i in 0..RING_SAMPLES {
        let angle = (i as f32 / RING_SAMPLES as f32) * std::f32::consts::TAU;
        let pos = overlay.center + Vec2::new(angle.cos(), angle.sin()) * overlay.radius;
        if let Some((x, y)) = viewport.cell_for(pos) {
            frame.set(x, y, ch, OVERLAY_DEPTH, color);
        }
    }
}

fn star_glyph(radius: f32) -> char {
    if radius < 1.5 {
        '·'
    } else if radius < 2.25 {
        '+'
    } else {
        '*'
    }
}

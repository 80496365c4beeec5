use std::time::Instant;

use crate::{
    anim::{Animated, Motion, Spring, Tween},
    config,
    types::Vec2,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DemoPhase {
    Pending,
    FadeIn,
    Pause,
    Horizontal,
    Vertical,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DemoScalars {
    pub ui_alpha: f32,
    pub target_alpha: f32,
    pub target_stroke: f32,
    pub input_weight: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Step {
    Waiting,
    Fading(Tween),
    Holding { remaining: f32 },
    Sweeping { axis: Axis, leg: usize, spring: Spring },
}

const SWEEP_LEGS: usize = 3;

#[derive(Clone, Debug)]
pub struct DemoTimeline {
    phase: DemoPhase,
    step: Step,
    last_touch: Instant,
    completed_once: bool,
    cancel_requested: bool,
    fading_out: bool,
    ui_alpha: Animated,
    target_alpha: Animated,
    target_stroke: Animated,
    input_weight: Animated,
    drag: Vec2,
    demo_input: Vec2,
    max_input: Vec2,
}

impl DemoTimeline {
    pub fn new(now: Instant) -> Self {
        Self {
            phase: DemoPhase::Pending,
            step: Step::Waiting,
            last_touch: now,
            completed_once: false,
            cancel_requested: false,
            fading_out: false,
            ui_alpha: Animated::new(0.0),
            target_alpha: Animated::new(0.0),
            target_stroke: Animated::new(1.0),
            input_weight: Animated::new(0.0),
            drag: Vec2::ZERO,
            demo_input: Vec2::ZERO,
            max_input: Vec2::ZERO,
        }
    }

    pub fn with_completed_once(mut self, completed_once: bool) -> Self {
        self.completed_once = completed_once;
        self
    }

    pub fn phase(&self) -> DemoPhase {
        self.phase
    }

    pub fn demo_completed_once(&self) -> bool {
        self.completed_once
    }

    pub fn last_touch(&self) -> Instant {
        self.last_touch
    }

    pub fn scalars(&self) -> DemoScalars {
        DemoScalars {
            ui_alpha: self.ui_alpha.value(),
            target_alpha: self.target_alpha.value(),
            target_stroke: self.target_stroke.value(),
            input_weight: self.input_weight.value(),
        }
    }

    pub fn drag(&self) -> Vec2 {
        self.drag
    }

    pub fn demo_input(&self) -> Vec2 {
        self.demo_input
    }

    pub fn set_max_input(&mut self, max_input: Vec2) {
        self.max_input = max_input;
    }

    pub fn steering(&self) -> Vec2 {
        self.drag + self.demo_input
    }

    /// The circle follows the weighted demo input, so it eases back to the
    /// drag position while a cancelled demo fades out.
    pub fn target_center(&self, center: Vec2) -> Vec2 {
        center + self.drag + self.demo_input * self.input_weight.value()
    }

    pub fn idle_delay_secs(&self) -> f32 {
        if self.completed_once {
            config::DEMO_IDLE_DELAY_SEEN_SECS
        } else {
            config::DEMO_IDLE_DELAY_SECS
        }
    }

    pub fn is_demo_time(&self, now: Instant) -> bool {
        let idle = now.saturating_duration_since(self.last_touch).as_secs_f32();
        idle >= self.idle_delay_secs()
    }

    pub fn on_drag(&mut self, now: Instant, delta: Vec2) {
        self.ui_alpha.animate_to(0.0);
        self.target_stroke.animate_to(config::TARGET_STROKE_PRESSED);
        self.target_alpha.animate_to(config::TARGET_ALPHA_PRESSED);
        self.reset(now);
        self.drag += delta;
    }

    pub fn on_drag_end(&mut self, now: Instant) {
        self.target_alpha.snap_to(0.0);
        self.target_stroke.snap_to(config::TARGET_STROKE_PRESSED);
        self.ui_alpha.snap_to(0.0);
        self.reset(now);
        self.drag = Vec2::ZERO;
    }

    fn reset(&mut self, now: Instant) {
        if self.phase != DemoPhase::Pending {
            tracing::debug!(from = ?self.phase, "demo interrupted by touch");
        }
        self.phase = DemoPhase::Pending;
        self.last_touch = now;
        self.cancel_requested = true;
    }

    pub fn snap_scalars_to_phase_start(&mut self) {
        match self.phase {
            DemoPhase::Pending => {
                // Target alpha is left to the touch handlers.
                self.ui_alpha.snap_to(0.0);
                self.target_stroke.snap_to(config::TARGET_STROKE_PRESSED);
            }
            DemoPhase::FadeIn => {
                self.ui_alpha.snap_to(0.0);
                self.target_alpha.snap_to(0.0);
                self.target_stroke.snap_to(config::TARGET_STROKE_TUTORIAL);
            }
            DemoPhase::Pause | DemoPhase::Horizontal | DemoPhase::Vertical => {
                self.ui_alpha.snap_to(1.0);
                self.target_alpha.snap_to(config::TARGET_ALPHA_TUTORIAL);
                self.target_stroke.snap_to(config::TARGET_STROKE_TUTORIAL);
            }
        }
    }

    pub fn tick(&mut self, now: Instant, dt: f32) {
        let dt = dt.max(0.0);
        self.ui_alpha.tick(dt);
        self.target_alpha.tick(dt);
        self.target_stroke.tick(dt);

        if self.cancel_requested {
            self.cancel_requested = false;
            self.step = Step::Waiting;
            if !self.fading_out {
                self.fading_out = true;
                self.input_weight.tween_to(0.0, config::DEMO_FADE_OUT_SECS);
            }
        }

        self.input_weight.tick(dt);
        if self.fading_out && !self.input_weight.is_animating() {
            self.fading_out = false;
            self.demo_input = Vec2::ZERO;
        }

        self.advance_step(now, dt);
    }

    fn advance_step(&mut self, now: Instant, dt: f32) {
        match self.step {
            Step::Waiting => {
                if self.phase == DemoPhase::Pending && !self.fading_out && self.is_demo_time(now) {
                    self.input_weight.snap_to(1.0);
                    self.enter(DemoPhase::FadeIn);
                }
            }
            Step::Fading(mut tween) => {
                tween.tick(dt);
                let v = tween.value();
                self.ui_alpha.snap_to(v.max(self.ui_alpha.value()));
                self.target_alpha.snap_to(v);
                if tween.is_complete() {
                    self.enter(DemoPhase::Pause);
                } else {
                    self.step = Step::Fading(tween);
                }
            }
            Step::Holding { remaining } => {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    self.enter(DemoPhase::Horizontal);
                } else {
                    self.step = Step::Holding { remaining };
                }
            }
            Step::Sweeping {
                axis,
                leg,
                mut spring,
            } => {
                spring.tick(dt);
                self.set_demo_axis(axis, spring.value());
                if !spring.is_complete() {
                    self.step = Step::Sweeping { axis, leg, spring };
                    return;
                }
                if axis == Axis::X && leg == 0 && !self.completed_once {
                    self.completed_once = true;
                    tracing::debug!("demo seen once, idle delay lengthened");
                }
                if leg + 1 < SWEEP_LEGS {
                    self.start_leg(axis, leg + 1);
                } else if axis == Axis::X {
                    self.enter(DemoPhase::Vertical);
                } else {
                    self.enter(DemoPhase::Pause);
                }
            }
        }
    }

    fn enter(&mut self, phase: DemoPhase) {
        tracing::debug!(?phase, "demo phase");
        self.phase = phase;
        self.snap_scalars_to_phase_start();
        match phase {
            DemoPhase::Pending => self.step = Step::Waiting,
            DemoPhase::FadeIn => {
                self.step = Step::Fading(Tween::new(
                    0.0,
                    config::TARGET_ALPHA_TUTORIAL,
                    config::DEMO_FADE_IN_SECS,
                ));
            }
            DemoPhase::Pause => {
                self.demo_input = Vec2::ZERO;
                self.step = Step::Holding {
                    remaining: config::DEMO_PAUSE_SECS,
                };
            }
            DemoPhase::Horizontal => self.start_leg(Axis::X, 0),
            DemoPhase::Vertical => self.start_leg(Axis::Y, 0),
        }
    }

    fn start_leg(&mut self, axis: Axis, leg: usize) {
        let (from, to) = sweep_leg(axis, leg, self.max_input);
        self.set_demo_axis(axis, from);
        self.step = Step::Sweeping {
            axis,
            leg,
            spring: Spring::low(from, to),
        };
    }

    fn set_demo_axis(&mut self, axis: Axis, value: f32) {
        self.demo_input = match axis {
            Axis::X => self.demo_input.with_x(value),
            Axis::Y => self.demo_input.with_y(value),
        };
    }
}

fn sweep_leg(axis: Axis, leg: usize, max: Vec2) -> (f32, f32) {
    let m = match axis {
        Axis::X => max.x,
        Axis::Y => -max.y,
    };
    match leg {
        0 => (0.0, m),
        1 => (m, -m),
        _ => (-m, 0.0),
    }
}

use crate::config;

pub trait Motion {
    fn tick(&mut self, dt: f32);

    fn value(&self) -> f32;

    fn is_complete(&self) -> bool;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    elapsed: f32,
    duration: f32,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration: f32) -> Self {
        Self {
            from,
            to,
            elapsed: 0.0,
            duration: duration.max(0.0),
        }
    }

    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }
}

impl Motion for Tween {
    fn tick(&mut self, dt: f32) {
        self.elapsed += dt.max(0.0);
    }

    fn value(&self) -> f32 {
        let t = self.progress();
        if t >= 1.0 {
            self.to
        } else {
            self.from + (self.to - self.from) * t
        }
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Critically damped, stepped in closed form so any `dt` is stable. Settles
/// to exactly the target once displacement and velocity are both under the
/// visibility threshold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring {
    value: f32,
    velocity: f32,
    target: f32,
    omega: f32,
    threshold: f32,
}

impl Spring {
    pub fn new(from: f32, to: f32, stiffness: f32) -> Self {
        Self::with_velocity(from, to, 0.0, stiffness)
    }

    pub fn with_velocity(from: f32, to: f32, velocity: f32, stiffness: f32) -> Self {
        Self {
            value: from,
            velocity,
            target: to,
            omega: stiffness.max(f32::MIN_POSITIVE).sqrt(),
            threshold: config::SPRING_VISIBILITY_THRESHOLD,
        }
    }

    pub fn low(from: f32, to: f32) -> Self {
        Self::new(from, to, config::SPRING_STIFFNESS_LOW)
    }

    pub fn medium(from: f32, to: f32) -> Self {
        Self::new(from, to, config::SPRING_STIFFNESS_MEDIUM)
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    fn settled(&self) -> bool {
        (self.value - self.target).abs() < self.threshold && self.velocity.abs() < self.threshold
    }
}

impl Motion for Spring {
    fn tick(&mut self, dt: f32) {
        if dt <= 0.0 || self.settled() {
            return;
        }
        // x(t) = (x0 + (v0 + w x0) t) e^(-w t)
        let w = self.omega;
        let x0 = self.value - self.target;
        let b = self.velocity + w * x0;
        let decay = (-w * dt).exp();
        let x = (x0 + b * dt) * decay;
        self.velocity = (self.velocity - w * b * dt) * decay;
        self.value = self.target + x;
        if self.settled() {
            self.value = self.target;
            self.velocity = 0.0;
        }
    }

    fn value(&self) -> f32 {
        if self.settled() {
            self.target
        } else {
            self.value
        }
    }

    fn is_complete(&self) -> bool {
        self.settled()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Transition {
    Tween(Tween),
    Spring(Spring),
}

impl Motion for Transition {
    fn tick(&mut self, dt: f32) {
        match self {
            Transition::Tween(t) => t.tick(dt),
            Transition::Spring(s) => s.tick(dt),
        }
    }

    fn value(&self) -> f32 {
        match self {
            Transition::Tween(t) => t.value(),
            Transition::Spring(s) => s.value(),
        }
    }

    fn is_complete(&self) -> bool {
        match self {
            Transition::Tween(t) => t.is_complete(),
            Transition::Spring(s) => s.is_complete(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Animated {
    value: f32,
    running: Option<Transition>,
}

impl Animated {
    pub fn new(value: f32) -> Self {
        Self {
            value,
            running: None,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn is_animating(&self) -> bool {
        self.running.is_some()
    }

    pub fn snap_to(&mut self, value: f32) {
        self.value = value;
        self.running = None;
    }

    pub fn animate_to(&mut self, target: f32) {
        let velocity = match self.running {
            Some(Transition::Spring(s)) => s.velocity(),
            _ => 0.0,
        };
        self.running = Some(Transition::Spring(Spring::with_velocity(
            self.value,
            target,
            velocity,
            config::SPRING_STIFFNESS_MEDIUM,
        )));
    }

    pub fn tween_to(&mut self, target: f32, duration: f32) {
        self.running = Some(Transition::Tween(Tween::new(self.value, target, duration)));
    }

    pub fn tick(&mut self, dt: f32) {
        if let Some(motion) = self.running.as_mut() {
            motion.tick(dt);
            self.value = motion.value();
            if motion.is_complete() {
                self.running = None;
            }
        }
    }
}

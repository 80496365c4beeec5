pub const RENDER_HZ: f32 = 60.0;

pub const MAX_DURATION: f32 = 7.0;

pub const DEFAULT_PARTICLE_COUNT: usize = 200;
pub const DEFAULT_EXPLOSIVENESS: f32 = 1.0;

pub const STAR_RADIUS_MIN: f32 = 1.0;

// Star colour distribution.
pub const STAR_HUE_ARC: f32 = 120.0;
pub const STAR_HUE_WRAP: f32 = 240.0;
pub const STAR_SATURATION_EXPONENT: f64 = 5.2;
pub const YELLOW_HUE: f32 = 60.0;
pub const YELLOW_HUE_CUTOFF: f32 = 15.0;

// Demo timeline.
pub const DEMO_IDLE_DELAY_SECS: f32 = 6.0;
pub const DEMO_IDLE_DELAY_SEEN_SECS: f32 = 20.0;
pub const DEMO_FADE_IN_SECS: f32 = 2.0;
pub const DEMO_PAUSE_SECS: f32 = 1.0;
pub const DEMO_FADE_OUT_SECS: f32 = 0.25;
pub const DEMO_MAX_INPUT_X_RATIO: f32 = 0.3;
pub const DEMO_MAX_INPUT_Y_RATIO: f32 = 0.5;

pub const SPRING_STIFFNESS_LOW: f32 = 200.0;
pub const SPRING_STIFFNESS_MEDIUM: f32 = 1500.0;
pub const SPRING_VISIBILITY_THRESHOLD: f32 = 0.01;

pub const TARGET_ALPHA_PRESSED: f32 = 0.6;
pub const TARGET_ALPHA_TUTORIAL: f32 = 1.0;
pub const TARGET_STROKE_PRESSED: f32 = 2.0;
pub const TARGET_STROKE_TUTORIAL: f32 = 8.0;

// Terminal front end.
pub const TARGET_RADIUS: f32 = 12.0;
pub const KEY_NUDGE: f32 = 4.0;
pub const HINT_TEXT: &str = "Drag to steer";
pub const HINT_HEIGHT: u16 = 3;

pub const LOG_FILTER_ENV: &str = "STARFIELD_LOG";
pub const LOG_FILE_ENV: &str = "STARFIELD_LOG_FILE";
pub const DEFAULT_LOG_FILE: &str = "starfield.log";

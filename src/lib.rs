pub mod anim;
pub mod config;
pub mod core;
pub mod demo;
pub mod error;
pub mod frame;
pub mod geom;
pub mod logging;
pub mod render;
pub mod types;
pub mod ui;

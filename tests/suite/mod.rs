//! Integration test modules.

mod animations;
mod autoplay;
mod config;
mod navigation;
mod rendering;
mod sections;
mod swipe;

//! Screen sections rendered by the app shell.

pub mod counter;
pub mod navigation;
pub mod overlay;
pub mod welcome;

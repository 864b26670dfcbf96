mod input;
mod panels;

pub use panels::{HudPlugin, Panel};

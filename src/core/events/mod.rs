mod bus;
mod event;

pub use bus::*;
pub use event::*;

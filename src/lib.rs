pub mod clock;
pub mod color;
pub mod config;
pub mod font;
pub mod layout;
pub mod render;
pub mod scheduler;
pub mod surface;
pub mod timesrc;
pub mod util;

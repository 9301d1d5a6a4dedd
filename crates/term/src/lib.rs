//! Terminal frontend: keyboard input, frame projection and screen I/O.

pub mod input;
pub mod screen;
pub mod view;

pub use input::{map_key, should_quit, HumanInput};
pub use screen::TerminalScreen;
pub use view::render_frame;

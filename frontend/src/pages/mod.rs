pub mod editor;
pub mod play;

pub use editor::Editor;
pub use play::Play;

pub mod editor;
pub mod theme;

pub use editor::Editor;
pub use theme::Theme;

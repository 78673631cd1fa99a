pub mod app;
pub mod grid;

pub use app::App;
pub use grid::{StatusLine, TextGrid};

pub mod render;
pub mod text;

pub use render::{render_error, render_page, RenderOptions, DEFAULT_WIDTH};

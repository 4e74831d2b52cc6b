pub mod document;
pub mod normalize;
pub mod page;

pub use document::*;
pub use normalize::{normalize, MalformedDocument};
pub use page::*;

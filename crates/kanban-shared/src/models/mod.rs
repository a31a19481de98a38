mod column;
mod comment;
mod idea;
mod task;
mod theme;

pub use column::*;
pub use comment::*;
pub use idea::*;
pub use task::*;
pub use theme::*;

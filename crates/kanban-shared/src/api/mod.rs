mod export;
mod search;
mod tasks;

pub use export::*;
pub use search::*;
pub use tasks::*;

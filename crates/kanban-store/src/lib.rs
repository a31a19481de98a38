//! Core of the kanban board: state, persistence, filtering, reordering and
//! dashboard metrics. Front ends drive it through [`Board`].

pub mod board;
pub mod dashboard;
pub mod error;
pub mod query;
pub mod reorder;
pub mod storage;
pub mod view;

pub use board::{parse_import, Board, BoardState};
pub use board::column_id_from_name;
pub use dashboard::{time_in_column, DashboardStats};
pub use error::{Result, StoreError};
pub use query::{matches_filters, TaskGroups};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use view::{DependencyStatus, TaskCard};

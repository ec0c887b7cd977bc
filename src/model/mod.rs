//! Model layer - centralized state management
//!
//! - `Row` and `Column` - the dataset and how each column compares
//! - `ViewState` - search text, sort configuration and current page
//! - `pipeline` - filter, sort and paginate a snapshot for rendering
//! - `ModalStack` - modal overlay management

pub mod domain;
pub mod modal;
pub mod pipeline;
pub mod row;
pub mod view;

pub use domain::{DataSource, DomainState};
pub use pipeline::TableSnapshot;
pub use row::{Column, Row, Status};
pub use view::{SortConfig, ViewState};

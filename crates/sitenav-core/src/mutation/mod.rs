pub mod model;
mod reorder;


pub use model::{BatchOperation, BatchSubmission, Placement, PositionUpdate, ReorderPlan};
pub use reorder::plan_reorder;

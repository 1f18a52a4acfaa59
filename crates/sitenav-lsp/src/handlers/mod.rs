mod expansion;
mod lifecycle;
mod render;
mod reorder;
mod selection;

pub use expansion::*;
pub use lifecycle::*;
pub use render::*;
pub use reorder::*;
pub use selection::*;

use tower_lsp::jsonrpc::{Error, ErrorCode};

pub(crate) fn not_initialized() -> Error {
    Error {
        code: ErrorCode::InternalError,
        message: "Navigation widget not initialized".into(),
        data: None,
    }
}

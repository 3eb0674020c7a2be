pub mod context;
pub mod event;
pub mod state;

pub use context::{ContextEvent, CopyContext, CopySnapshot};
pub use state::AppState;

mod question_submitter;
mod screen;
mod session_context;
mod session_manager;

pub use question_submitter::*;
pub use screen::*;
pub use session_context::*;
pub use session_manager::*;

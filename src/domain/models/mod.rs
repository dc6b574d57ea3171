mod access_token;
mod backend;
mod error;
mod question;
mod session_state;
mod token_store;
mod view;

pub use access_token::*;
pub use backend::*;
pub use error::*;
pub use question::*;
pub use session_state::*;
pub use token_store::*;
pub use view::*;

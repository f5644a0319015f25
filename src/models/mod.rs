pub mod api;
pub mod backend;
pub mod context;
pub mod reply;
pub mod turn;

pub use api::*;
pub use backend::*;
pub use context::ContextData;
pub use reply::{ParseFault, ParsedReply};
pub use turn::{ChatTurn, NewTurn, Role};

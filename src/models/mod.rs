pub mod common;
pub mod draw;
pub mod prize;
pub mod stats;
pub mod ticket;
pub mod user;

pub use common::*;
pub use draw::*;
pub use prize::*;
pub use stats::*;
pub use ticket::*;
pub use user::*;

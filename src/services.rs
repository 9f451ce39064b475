mod fallible;
mod func;
mod interface;
mod service;

pub use fallible::*;
pub use func::*;
pub use interface::*;
pub use service::*;

mod constant;
mod interface;
mod providers;
mod scoped;
mod shared;
mod singleton;
mod transient;

pub use constant::*;
pub use interface::*;
pub use providers::*;
pub use scoped::*;
pub use shared::*;
pub use singleton::*;
pub use transient::*;

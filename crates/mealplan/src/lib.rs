mod error;
mod period;
mod plan;
mod prep;
mod rotation;
mod selector;

pub use error::*;
pub use period::*;
pub use plan::*;
pub use prep::*;
pub use rotation::*;
pub use selector::*;

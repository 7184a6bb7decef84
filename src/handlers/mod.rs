pub mod cakes;
pub mod docs;
pub mod system;

pub use cakes::*;
pub use docs::swagger;
pub use system::{health, method_not_allowed, not_found, root};

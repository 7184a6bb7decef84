pub mod collection;
pub mod record;
pub mod utils;

// Re-export handler functions for use in routing
pub use collection::get as cakes_get;
pub use collection::post as cakes_post;

pub use record::delete as cake_delete;
pub use record::get as cake_get;
pub use record::put as cake_put;

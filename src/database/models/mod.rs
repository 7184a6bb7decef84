pub mod cake;

pub use cake::{Cake, CakeError, CakePatch, NewCake};

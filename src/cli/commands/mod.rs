pub mod cakes;
pub mod server;

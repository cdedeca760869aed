pub mod debugging;
pub mod suspension;
pub mod vehicle;
pub mod world;

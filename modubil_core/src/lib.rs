// modubil_core/src/lib.rs

// This file defines the public modules of the library.
pub mod abstractions;
pub mod body;
pub mod error;
pub mod friction;
pub mod mass;
pub mod math;
pub mod prelude;
pub mod types;
pub mod vehicle;
pub mod wheel;

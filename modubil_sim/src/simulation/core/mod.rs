pub mod app_state;
pub mod components;
pub mod convert;
pub mod simulation_setup;

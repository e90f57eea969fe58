pub mod api;
pub mod intake;
pub mod roster;

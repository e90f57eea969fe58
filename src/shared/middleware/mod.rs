pub mod auth_gate;

// handlers/mod.rs - route handlers grouped by resource
pub mod game;

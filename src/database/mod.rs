pub mod manager;
pub mod models;
pub mod repository;

pub use manager::{DatabaseManager, StoreError};
pub use models::Game;
pub use repository::{GameDeleter, PgGameStore};

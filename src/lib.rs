pub mod config;
pub mod models;
pub mod db;
pub mod dashboard; // Home screen: today's doses and counters
pub mod history; // History screen: the full dose log
pub mod reports; // Reports screen: adherence rates and series

pub use db::sqlite::{open_database, open_default, open_memory_database};
pub use db::DatabaseError;

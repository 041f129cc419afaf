//! Repository layer — entity-scoped database operations.
//!
//! `medicine` owns the schedule table, `history` owns the dose log. The two
//! are linked only by a weak `medicine_id`, so either side can change
//! without the other noticing.

mod history;
mod medicine;

pub use history::*;
pub use medicine::*;

pub mod enums;
pub mod history;
pub mod medicine;

pub use enums::*;
pub use history::*;
pub use medicine::*;

pub mod errors;
pub mod evaluator;
pub mod record;
pub mod table;

pub use errors::*;
pub use evaluator::*;
pub use record::*;
pub use table::*;

pub mod errors;
pub mod models;

pub use errors::VocabotError;
pub use models::{
    Category,
    VocabEntry,
};

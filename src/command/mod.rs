pub mod dispatcher;
pub mod parser;

#[cfg(test)]
mod dispatcher_tests;

pub use dispatcher::{
    Dispatcher,
    Outcome,
    PendingCreate,
};
pub use parser::{
    parse,
    Command,
    Parsed,
};

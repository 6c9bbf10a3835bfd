pub mod bot;
pub mod command;
pub mod config;
pub mod core;
pub mod game;
pub mod gateway;
pub mod store;

pub use crate::{
    bot::Bot,
    config::BotConfig,
    core::VocabotError,
};

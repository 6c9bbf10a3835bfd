pub mod connection;
pub mod server;
pub mod types;

pub use server::GatewayServer;
pub use types::{
    EventPayload,
    InboundEvent,
    Reply,
};

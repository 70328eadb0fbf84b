pub mod chat;
pub mod violation;
pub mod websocket;

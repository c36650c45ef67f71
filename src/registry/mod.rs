pub mod client;
pub mod manifest;

pub mod clarity;
pub mod cli;
pub mod client;
pub mod constants;
pub mod server;
pub mod stacking;
pub mod store;
pub mod transaction;
pub mod vote;
pub mod web;

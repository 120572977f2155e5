//! HTTP handlers for the health relay.

pub mod chat;
pub mod health;
pub mod medical;
pub mod symptoms;

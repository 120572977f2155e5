//! health-relay: symptom classification and pass-through access to medical
//! reference and AI-completion services for a browser client.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

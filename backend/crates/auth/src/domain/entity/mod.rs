//! Domain Entities

pub mod user;

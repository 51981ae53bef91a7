//! Request handlers

pub mod directory;
pub mod entity;
pub mod error;

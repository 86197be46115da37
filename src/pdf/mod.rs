// src/pdf/mod.rs
pub mod client;
pub mod reader;

// src/core.rs
pub mod changes;
pub mod collector;
pub mod exclude;
pub mod export;
pub mod links;
pub mod words;

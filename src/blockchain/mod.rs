// src/blockchain/mod.rs

pub mod client;
pub use client::EvmClient;

pub mod models;
pub mod services;

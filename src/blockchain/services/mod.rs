//! The translation layer: each function issues the remote calls for one
//! gateway operation and reshapes the node's answer into a response record.

pub mod balance;
pub mod block;
pub mod transactions;
pub mod transfer;

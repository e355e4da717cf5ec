//! chirpy - a small durable public-message service
//!
//! The record store (`storage`) owns all persisted state; the HTTP layer
//! (`http_server`) validates input with `validation` and calls the store.

pub mod cli;
pub mod crash_point;
pub mod http_server;
pub mod observability;
pub mod storage;
pub mod validation;

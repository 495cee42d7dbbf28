//! LearnLoop Entitlements - subscription and trial access resolution
//!
//! This crate decides whether a user currently has access to paid features,
//! combining the remote store of record with a local fallback cache so the
//! answer stays available through remote outages.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

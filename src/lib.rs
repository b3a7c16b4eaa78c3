//! Membership Sync - Stripe-driven customer membership service
//!
//! Keeps a local customer record per user in step with that user's Stripe
//! subscription. Signed Stripe webhooks drive the transitions; a small
//! customer API serves the web app.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

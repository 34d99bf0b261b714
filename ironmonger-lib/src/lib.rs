//! Storefront API client library
//!
//! An async Rust client for the Ironmonger hardware-procurement storefront
//! REST API: catalog, orders, government enquiries, quotes, and wishlist,
//! with a headless browse layer built on [`tablekit`].

pub mod api;
pub mod auth;
pub mod browse;
pub mod cache;
pub mod error;
pub mod model;
pub mod state;

mod client;
mod fetched;

pub use client::*;
pub use fetched::Fetched;

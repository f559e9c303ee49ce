//! # pulsecard-profile
//!
//! Thin REST client for the profile snapshot: the static identity document
//! (bio, theme colors, badges, connections) fetched once per profile view.
//! Live status and activities come from the presence feed, not from here.

pub mod client;
pub mod model;

pub use client::ProfileClient;
pub use model::Profile;

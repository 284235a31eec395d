//! # proxybid-types
//!
//! Shared types, errors, and configuration for the **Proxybid** auction engine.
//!
//! This crate is the leaf dependency of the workspace. It defines:
//!
//! - **Identifiers**: [`BidderId`], [`AuctionId`]
//! - **Bidder model**: [`Bidder`], [`BidStamp`]
//! - **Configuration**: [`AuctionConfig`], [`BidderConfig`]
//! - **Errors**: [`ProxybidError`] with `PB_ERR_` prefix codes
//! - **Constants**: engine-wide limits and defaults

pub mod bidder;
pub mod config;
pub mod constants;
pub mod error;
pub mod ids;

pub use bidder::*;
pub use config::*;
pub use error::*;
pub use ids::*;

// Constants are accessed via `proxybid_types::constants::FOO`
// (not re-exported to avoid name collisions).

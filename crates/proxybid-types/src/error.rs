//! Error types for the Proxybid auction engine.
//!
//! All errors use the `PB_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by phase:
//! - 1xx: Auction construction errors
//! - 2xx: Bid placement errors
//! - 9xx: General / configuration errors

use rust_decimal::Decimal;
use thiserror::Error;

use crate::BidderId;

/// Central error enum for all Proxybid operations.
#[derive(Debug, Error)]
pub enum ProxybidError {
    // =================================================================
    // Construction Errors (1xx)
    // =================================================================
    /// Fewer than two bidders were supplied.
    #[error("PB_ERR_100: Auction needs at least {min} bidders, got {count}")]
    InsufficientBidders { count: usize, min: usize },

    /// Two bidders share the same identifier.
    #[error("PB_ERR_101: Duplicate bidder ID: {0}")]
    DuplicateBidder(BidderId),

    /// The starting bid is zero or negative.
    #[error("PB_ERR_102: Starting bid must be positive for {bidder}, got {starting_bid}")]
    InvalidStartingBid {
        bidder: BidderId,
        starting_bid: Decimal,
    },

    /// The maximum bid is below the starting bid.
    #[error("PB_ERR_103: Max bid {max_bid} is below starting bid {starting_bid} for {bidder}")]
    InvalidMaxBid {
        bidder: BidderId,
        starting_bid: Decimal,
        max_bid: Decimal,
    },

    /// The automatic increment is zero or negative.
    #[error("PB_ERR_104: Auto-increment must be positive for {bidder}, got {auto_increment}")]
    InvalidIncrement {
        bidder: BidderId,
        auto_increment: Decimal,
    },

    /// The bidder's current bid lies outside `[starting_bid, max_bid]`.
    #[error(
        "PB_ERR_105: Current bid {current_bid} outside [{starting_bid}, {max_bid}] for {bidder}"
    )]
    InvalidCurrentBid {
        bidder: BidderId,
        current_bid: Decimal,
        starting_bid: Decimal,
        max_bid: Decimal,
    },

    // =================================================================
    // Bid Placement Errors (2xx)
    // =================================================================
    /// The bid is below the bidder's starting bid.
    #[error("PB_ERR_200: Bid {amount} is below starting bid {starting_bid} for {bidder}")]
    BidBelowStartingBid {
        bidder: BidderId,
        amount: Decimal,
        starting_bid: Decimal,
    },

    /// The bid exceeds the bidder's maximum bid.
    #[error("PB_ERR_201: Bid {amount} is above max bid {max_bid} for {bidder}")]
    BidAboveMaxBid {
        bidder: BidderId,
        amount: Decimal,
        max_bid: Decimal,
    },

    /// The bid does not raise the bidder's current bid.
    #[error("PB_ERR_202: Bid {amount} is not higher than current bid {current_bid} for {bidder}")]
    BidNotHigherThanCurrent {
        bidder: BidderId,
        amount: Decimal,
        current_bid: Decimal,
    },

    /// The bidder does not take part in this auction.
    #[error("PB_ERR_203: Bidder not in auction: {0}")]
    UnknownBidder(BidderId),

    // =================================================================
    // General (9xx)
    // =================================================================
    /// Serialization / deserialization error.
    #[error("PB_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (malformed or inconsistent auction config).
    #[error("PB_ERR_902: Configuration error: {0}")]
    Configuration(String),
}

impl ProxybidError {
    /// The bidder this error refers to, if any.
    #[must_use]
    pub fn bidder(&self) -> Option<BidderId> {
        match self {
            Self::DuplicateBidder(id) | Self::UnknownBidder(id) => Some(*id),
            Self::InvalidStartingBid { bidder, .. }
            | Self::InvalidMaxBid { bidder, .. }
            | Self::InvalidIncrement { bidder, .. }
            | Self::InvalidCurrentBid { bidder, .. }
            | Self::BidBelowStartingBid { bidder, .. }
            | Self::BidAboveMaxBid { bidder, .. }
            | Self::BidNotHigherThanCurrent { bidder, .. } => Some(*bidder),
            Self::InsufficientBidders { .. } | Self::Serialization(_) | Self::Configuration(_) => {
                None
            }
        }
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, ProxybidError>;

impl From<serde_json::Error> for ProxybidError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

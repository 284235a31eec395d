//! Input validation for auction construction and bid placement.
//!
//! Both checks are pure and run before any state is touched: a failing
//! check leaves nothing half-applied.

use std::collections::HashSet;

use proxybid_types::{Bidder, ProxybidError, Result, constants};
use rust_decimal::Decimal;

/// Validate a bidder list for a new auction.
///
/// Bidders are visited in order. For each one the duplicate-ID check runs
/// first, then its own parameters, so the first offending bidder decides
/// the error.
///
/// # Errors
/// - `InsufficientBidders` for fewer than [`constants::MIN_BIDDERS`]
/// - `DuplicateBidder` if an ID repeats
/// - `InvalidStartingBid`, `InvalidMaxBid`, `InvalidIncrement`,
///   `InvalidCurrentBid` for a bidder with bad parameters
pub fn validate_bidders(bidders: &[Bidder]) -> Result<()> {
    if bidders.len() < constants::MIN_BIDDERS {
        return Err(ProxybidError::InsufficientBidders {
            count: bidders.len(),
            min: constants::MIN_BIDDERS,
        });
    }

    let mut seen = HashSet::with_capacity(bidders.len());
    for bidder in bidders {
        if !seen.insert(bidder.id) {
            return Err(ProxybidError::DuplicateBidder(bidder.id));
        }
        validate_bidder(bidder)?;
    }
    Ok(())
}

/// Validate one bidder's parameters.
///
/// # Errors
/// See [`validate_bidders`].
pub fn validate_bidder(bidder: &Bidder) -> Result<()> {
    if bidder.starting_bid <= Decimal::ZERO {
        return Err(ProxybidError::InvalidStartingBid {
            bidder: bidder.id,
            starting_bid: bidder.starting_bid,
        });
    }
    if bidder.max_bid < bidder.starting_bid {
        return Err(ProxybidError::InvalidMaxBid {
            bidder: bidder.id,
            starting_bid: bidder.starting_bid,
            max_bid: bidder.max_bid,
        });
    }
    if bidder.auto_increment <= Decimal::ZERO {
        return Err(ProxybidError::InvalidIncrement {
            bidder: bidder.id,
            auto_increment: bidder.auto_increment,
        });
    }
    if bidder.current_bid < bidder.starting_bid || bidder.current_bid > bidder.max_bid {
        return Err(ProxybidError::InvalidCurrentBid {
            bidder: bidder.id,
            current_bid: bidder.current_bid,
            starting_bid: bidder.starting_bid,
            max_bid: bidder.max_bid,
        });
    }
    Ok(())
}

/// Check a manual bid against the bidder's bounds and current bid.
///
/// # Errors
/// In order: `BidBelowStartingBid`, `BidAboveMaxBid`,
/// `BidNotHigherThanCurrent`.
pub fn check_bid(bidder: &Bidder, amount: Decimal) -> Result<()> {
    if amount < bidder.starting_bid {
        return Err(ProxybidError::BidBelowStartingBid {
            bidder: bidder.id,
            amount,
            starting_bid: bidder.starting_bid,
        });
    }
    if amount > bidder.max_bid {
        return Err(ProxybidError::BidAboveMaxBid {
            bidder: bidder.id,
            amount,
            max_bid: bidder.max_bid,
        });
    }
    if amount <= bidder.current_bid {
        return Err(ProxybidError::BidNotHigherThanCurrent {
            bidder: bidder.id,
            amount,
            current_bid: bidder.current_bid,
        });
    }
    Ok(())
}

//! Bidder model for the Proxybid auction engine.
//!
//! A [`Bidder`] is a passive record: its bidding parameters are fixed at
//! creation and only `current_bid` / `last_bid` move, always under the
//! owning auction's write lock.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::BidderId;

/// When a bidder's `current_bid` last changed.
///
/// Ordered by `seq` first, then `at`. `seq` is the owning auction's logical
/// clock and is strictly increasing across every write the auction makes, so
/// two stamps taken inside one auction never compare equal even when the
/// wall clock has not moved between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct BidStamp {
    /// Auction-local write sequence. Zero for a bidder that was never written
    /// by an auction.
    pub seq: u64,
    /// Wall-clock time of the write.
    pub at: DateTime<Utc>,
}

impl BidStamp {
    /// Stamp for a freshly created bidder.
    #[must_use]
    pub fn initial(at: DateTime<Utc>) -> Self {
        Self { seq: 0, at }
    }

    /// Returns `true` if `self` happened strictly before `other`.
    #[must_use]
    pub fn is_before(&self, other: &Self) -> bool {
        self < other
    }
}

/// One auction participant with proxy-bidding parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bidder {
    pub id: BidderId,
    pub name: String,
    /// Floor below which no bid from this bidder is accepted.
    pub starting_bid: Decimal,
    /// Ceiling. Neither manual bids nor auto-increments go above it.
    pub max_bid: Decimal,
    pub current_bid: Decimal,
    /// Step added to `current_bid` whenever another bidder bids.
    pub auto_increment: Decimal,
    pub last_bid: BidStamp,
}

impl Bidder {
    /// Create a bidder with a fresh ID whose current bid sits at its
    /// starting bid.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        starting_bid: Decimal,
        max_bid: Decimal,
        auto_increment: Decimal,
    ) -> Self {
        Self::with_id(BidderId::new(), name, starting_bid, max_bid, auto_increment)
    }

    /// Like [`Bidder::new`], with a caller-chosen ID.
    #[must_use]
    pub fn with_id(
        id: BidderId,
        name: impl Into<String>,
        starting_bid: Decimal,
        max_bid: Decimal,
        auto_increment: Decimal,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            starting_bid,
            max_bid,
            current_bid: starting_bid,
            auto_increment,
            last_bid: BidStamp::initial(Utc::now()),
        }
    }

    /// The bid an auto-increment would move this bidder to.
    #[must_use]
    pub fn next_bid(&self) -> Decimal {
        self.current_bid + self.auto_increment
    }

    /// Whether [`Bidder::next_bid`] still fits under the ceiling.
    /// Reaching `max_bid` exactly is allowed.
    #[must_use]
    pub fn can_auto_increment(&self) -> bool {
        self.next_bid() <= self.max_bid
    }

    /// Amount left between the current bid and the ceiling.
    #[must_use]
    pub fn headroom(&self) -> Decimal {
        self.max_bid - self.current_bid
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Bidder {
    /// Build a bidder from whole-unit amounts.
    pub fn dummy(name: &str, starting_bid: i64, max_bid: i64, auto_increment: i64) -> Self {
        Self::new(
            name,
            Decimal::new(starting_bid, 0),
            Decimal::new(max_bid, 0),
            Decimal::new(auto_increment, 0),
        )
    }

    /// A random valid bidder with amounts in cents.
    pub fn dummy_random(name: &str) -> Self {
        use rand::Rng;
        let mut rng = rand::thread_rng();
        let starting: i64 = rng.gen_range(100..10_000);
        let max = starting + rng.gen_range(0..10_000);
        let increment: i64 = rng.gen_range(1..500);
        Self::new(
            name,
            Decimal::new(starting, 2),
            Decimal::new(max, 2),
            Decimal::new(increment, 2),
        )
    }
}

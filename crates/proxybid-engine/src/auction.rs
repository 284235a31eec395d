//! The proxy-bidding auction state machine.
//!
//! An [`Auction`] owns a fixed list of bidders behind a single
//! reader/writer lock. [`Auction::place_bid`] holds the write guard from
//! validation through the whole auto-increment sweep, so readers never see
//! a half-applied sweep and concurrent bids serialize in some total order.
//!
//! # Bid placement
//!
//! 1. Reject the bid if it is below the bidder's floor, above its ceiling,
//!    or not above its current bid. Nothing changes on rejection.
//! 2. Set the bidder's `current_bid` to the amount.
//! 3. Every other bidder whose `current_bid + auto_increment` still fits
//!    under its `max_bid` (inclusive) is raised by exactly one increment.
//!
//! Each write in steps 2 and 3 draws its own [`BidStamp`] with a fresh
//! sequence number, which is what winner tie-breaking compares.

use std::fmt;

use parking_lot::RwLock;
use proxybid_types::{AuctionConfig, AuctionId, BidStamp, Bidder, BidderId, ProxybidError, Result};
use rust_decimal::Decimal;
use sha2::{Digest, Sha256};

use crate::clock::{Clock, SystemClock};
use crate::validation::{check_bid, validate_bidders};
use crate::winner::select_winner;

/// One automatic increment applied during a sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoRaise {
    pub bidder: BidderId,
    pub from: Decimal,
    pub to: Decimal,
    pub stamp: BidStamp,
}

/// Result of an accepted bid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BidOutcome {
    /// The bidder who placed the bid.
    pub bidder: BidderId,
    /// The accepted amount (now that bidder's `current_bid`).
    pub amount: Decimal,
    /// Stamp recorded for the manual bid.
    pub stamp: BidStamp,
    /// Automatic increments applied to other bidders, in sweep order.
    pub auto_raised: Vec<AutoRaise>,
}

/// Mutable state guarded by the auction lock.
struct AuctionState {
    bidders: Vec<Bidder>,
    /// Last sequence number handed out.
    seq: u64,
}

impl AuctionState {
    fn position(&self, id: BidderId) -> Option<usize> {
        self.bidders.iter().position(|b| b.id == id)
    }

    fn next_stamp(&mut self, clock: &dyn Clock) -> BidStamp {
        self.seq += 1;
        BidStamp {
            seq: self.seq,
            at: clock.now(),
        }
    }
}

/// A single-lot proxy-bidding auction.
///
/// `Auction` is `Send + Sync`; share it across threads with `Arc<Auction>`.
pub struct Auction {
    id: AuctionId,
    state: RwLock<AuctionState>,
    clock: Box<dyn Clock>,
}

impl Auction {
    /// Create an auction from a validated bidder list, stamping bids with
    /// the system clock.
    ///
    /// # Errors
    /// Any construction error from
    /// [`validate_bidders`](crate::validation::validate_bidders). No auction
    /// exists on failure.
    pub fn new(bidders: Vec<Bidder>) -> Result<Self> {
        Self::with_clock(bidders, SystemClock)
    }

    /// Create an auction that stamps bids with `clock`.
    ///
    /// # Errors
    /// Same as [`Auction::new`].
    pub fn with_clock(bidders: Vec<Bidder>, clock: impl Clock + 'static) -> Result<Self> {
        validate_bidders(&bidders)?;

        // Continue after any stamps the bidders already carry.
        let seq = bidders.iter().map(|b| b.last_bid.seq).max().unwrap_or(0);
        let id = AuctionId::new();

        tracing::info!(
            auction = %id,
            bidders = bidders.len(),
            "Auction created"
        );

        Ok(Self {
            id,
            state: RwLock::new(AuctionState { bidders, seq }),
            clock: Box::new(clock),
        })
    }

    /// Build bidders from `config` (each with a fresh ID) and create the
    /// auction.
    ///
    /// # Errors
    /// Same as [`Auction::new`].
    pub fn from_config(config: &AuctionConfig) -> Result<Self> {
        Self::new(config.build_bidders())
    }

    #[must_use]
    pub fn id(&self) -> AuctionId {
        self.id
    }

    /// Number of bidders. Fixed for the auction's lifetime.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.read().bidders.len()
    }

    /// Always `false` for a constructed auction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.read().bidders.is_empty()
    }

    /// Snapshot of one bidder.
    #[must_use]
    pub fn bidder(&self, id: BidderId) -> Option<Bidder> {
        let state = self.state.read();
        state.position(id).map(|idx| state.bidders[idx].clone())
    }

    /// Consistent snapshot of all bidders, in stored order.
    #[must_use]
    pub fn bidders(&self) -> Vec<Bidder> {
        self.state.read().bidders.clone()
    }

    /// Bidder IDs in stored order.
    #[must_use]
    pub fn bidder_ids(&self) -> Vec<BidderId> {
        self.state.read().bidders.iter().map(|b| b.id).collect()
    }

    /// Place a manual bid for `bidder` and run the auto-increment sweep.
    ///
    /// # Errors
    /// - `UnknownBidder` if `bidder` is not part of this auction
    /// - `BidBelowStartingBid`, `BidAboveMaxBid`, `BidNotHigherThanCurrent`
    ///   from [`check_bid`](crate::validation::check_bid)
    ///
    /// The auction is unchanged on any error.
    pub fn place_bid(&self, bidder: BidderId, amount: Decimal) -> Result<BidOutcome> {
        let mut guard = self.state.write();
        let state = &mut *guard;

        let idx = state
            .position(bidder)
            .ok_or(ProxybidError::UnknownBidder(bidder))?;

        if let Err(err) = check_bid(&state.bidders[idx], amount) {
            tracing::debug!(
                auction = %self.id,
                bidder = %bidder,
                amount = %amount,
                error = %err,
                "Bid rejected"
            );
            return Err(err);
        }

        let stamp = state.next_stamp(self.clock.as_ref());
        let placed = &mut state.bidders[idx];
        placed.current_bid = amount;
        placed.last_bid = stamp;

        let mut auto_raised = Vec::new();
        for other_idx in 0..state.bidders.len() {
            if other_idx == idx || !state.bidders[other_idx].can_auto_increment() {
                continue;
            }
            let raise_stamp = state.next_stamp(self.clock.as_ref());
            let other = &mut state.bidders[other_idx];
            let from = other.current_bid;
            other.current_bid = other.next_bid();
            other.last_bid = raise_stamp;

            tracing::trace!(
                auction = %self.id,
                bidder = %other.id,
                from = %from,
                to = %other.current_bid,
                "Auto-increment applied"
            );

            auto_raised.push(AutoRaise {
                bidder: other.id,
                from,
                to: other.current_bid,
                stamp: raise_stamp,
            });
        }

        tracing::debug!(
            auction = %self.id,
            bidder = %bidder,
            amount = %amount,
            auto_raised = auto_raised.len(),
            "Bid accepted"
        );

        Ok(BidOutcome {
            bidder,
            amount,
            stamp,
            auto_raised,
        })
    }

    /// Current winner: highest bid, earliest stamp on ties.
    ///
    /// Takes the read guard, so the result reflects a state between two
    /// complete bid placements. Returns `None` only for an empty bidder
    /// list, which construction rules out.
    #[must_use]
    pub fn determine_winner(&self) -> Option<Bidder> {
        let state = self.state.read();
        select_winner(&state.bidders).cloned()
    }

    /// SHA-256 over the bidders' IDs and current bids, in stored order.
    ///
    /// `SHA-256(domain_sep || count || for each bidder: id || current_bid)`
    ///
    /// Stamps are excluded: two auctions that reached the same bids through
    /// different schedules have the same digest.
    #[must_use]
    pub fn state_digest(&self) -> [u8; 32] {
        let state = self.state.read();
        digest_bidders(&state.bidders)
    }
}

/// Digest of a bidder snapshot. See [`Auction::state_digest`].
#[must_use]
pub fn digest_bidders(bidders: &[Bidder]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(proxybid_types::constants::STATE_DIGEST_DOMAIN);
    hasher.update((bidders.len() as u64).to_le_bytes());
    for bidder in bidders {
        hasher.update(bidder.id.as_bytes());
        // Normalize so 60 and 60.00 hash alike.
        hasher.update(bidder.current_bid.normalize().to_string().as_bytes());
    }
    let result = hasher.finalize();
    let mut digest = [0u8; 32];
    digest.copy_from_slice(&result);
    digest
}

impl fmt::Debug for Auction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("Auction")
            .field("id", &self.id)
            .field("bidders", &state.bidders)
            .field("seq", &state.seq)
            .field("digest", &hex::encode(digest_bidders(&state.bidders)))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::clock::FixedClock;

    fn dec(n: i64) -> Decimal {
        Decimal::new(n, 0)
    }

    fn reference_bidders() -> Vec<Bidder> {
        vec![
            Bidder::dummy("Sasha", 50, 80, 3),
            Bidder::dummy("John", 60, 82, 2),
            Bidder::dummy("Pat", 55, 85, 5),
        ]
    }

    #[test]
    fn construction_keeps_order_and_ids() {
        let bidders = reference_bidders();
        let ids: Vec<_> = bidders.iter().map(|b| b.id).collect();
        let auction = Auction::new(bidders).unwrap();
        assert_eq!(auction.len(), 3);
        assert!(!auction.is_empty());
        assert_eq!(auction.bidder_ids(), ids);
    }

    #[test]
    fn auctions_get_distinct_ids() {
        let a = Auction::new(reference_bidders()).unwrap();
        let b = Auction::new(reference_bidders()).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn accepted_bid_sweeps_other_bidders() {
        let bidders = reference_bidders();
        let (sasha, john, pat) = (bidders[0].id, bidders[1].id, bidders[2].id);
        let auction = Auction::new(bidders).unwrap();

        let outcome = auction.place_bid(sasha, dec(65)).unwrap();

        assert_eq!(auction.bidder(sasha).unwrap().current_bid, dec(65));
        assert_eq!(auction.bidder(john).unwrap().current_bid, dec(62));
        assert_eq!(auction.bidder(pat).unwrap().current_bid, dec(60));

        assert_eq!(outcome.amount, dec(65));
        assert_eq!(outcome.auto_raised.len(), 2);
        assert_eq!(outcome.auto_raised[0].bidder, john);
        assert_eq!(outcome.auto_raised[0].from, dec(60));
        assert_eq!(outcome.auto_raised[0].to, dec(62));
        assert_eq!(outcome.auto_raised[1].bidder, pat);
    }

    #[test]
    fn sweep_reaches_max_exactly_then_stops() {
        let a = Bidder::dummy("A", 10, 100, 1);
        let mut b = Bidder::dummy("B", 10, 14, 2);
        b.current_bid = dec(12);
        let (a_id, b_id) = (a.id, b.id);
        let auction = Auction::new(vec![a, b]).unwrap();

        let outcome = auction.place_bid(a_id, dec(20)).unwrap();
        assert_eq!(auction.bidder(b_id).unwrap().current_bid, dec(14));
        assert_eq!(outcome.auto_raised.len(), 1);

        let outcome = auction.place_bid(a_id, dec(21)).unwrap();
        assert_eq!(auction.bidder(b_id).unwrap().current_bid, dec(14));
        assert!(outcome.auto_raised.is_empty());
    }

    #[test]
    fn rejected_bids_leave_state_unchanged() {
        let bidders = reference_bidders();
        let pat = bidders[2].id;
        let auction = Auction::new(bidders).unwrap();
        auction.place_bid(pat, dec(70)).unwrap();
        let before = auction.bidders();

        let err = auction.place_bid(pat, dec(54)).unwrap_err();
        assert!(matches!(err, ProxybidError::BidBelowStartingBid { .. }), "got {err:?}");
        let err = auction.place_bid(pat, dec(86)).unwrap_err();
        assert!(matches!(err, ProxybidError::BidAboveMaxBid { .. }), "got {err:?}");
        let err = auction.place_bid(pat, dec(70)).unwrap_err();
        assert!(matches!(err, ProxybidError::BidNotHigherThanCurrent { .. }), "got {err:?}");

        assert_eq!(auction.bidders(), before);
    }

    #[test]
    fn unknown_bidder_rejected() {
        let auction = Auction::new(reference_bidders()).unwrap();
        let stranger = BidderId::new();
        let before = auction.state_digest();
        let err = auction.place_bid(stranger, dec(60)).unwrap_err();
        assert!(matches!(err, ProxybidError::UnknownBidder(id) if id == stranger));
        assert_eq!(auction.state_digest(), before);
    }

    #[test]
    fn every_write_gets_a_fresh_stamp() {
        let start = Utc::now();
        let clock = FixedClock::new(start);
        let bidders = reference_bidders();
        let (sasha, john, pat) = (bidders[0].id, bidders[1].id, bidders[2].id);
        let auction = Auction::with_clock(bidders, clock.clone()).unwrap();

        let outcome = auction.place_bid(sasha, dec(65)).unwrap();
        assert_eq!(outcome.stamp, BidStamp { seq: 1, at: start });
        assert_eq!(auction.bidder(john).unwrap().last_bid.seq, 2);
        assert_eq!(auction.bidder(pat).unwrap().last_bid.seq, 3);

        clock.advance(Duration::seconds(1));
        let outcome = auction.place_bid(john, dec(70)).unwrap();
        assert_eq!(outcome.stamp.seq, 4);
        assert_eq!(outcome.stamp.at, start + Duration::seconds(1));
    }

    #[test]
    fn tie_broken_by_earlier_stamp_under_frozen_clock() {
        let clock = FixedClock::new(Utc::now());
        let a = Bidder::dummy("A", 10, 20, 5);
        let b = Bidder::dummy("B", 10, 20, 1);
        let (a_id, b_id) = (a.id, b.id);
        let auction = Auction::with_clock(vec![a, b], clock).unwrap();

        // B bids 15 (seq 1); A is auto-raised to 15 afterwards (seq 2).
        auction.place_bid(b_id, dec(15)).unwrap();
        assert_eq!(auction.bidder(a_id).unwrap().current_bid, dec(15));

        let winner = auction.determine_winner().unwrap();
        assert_eq!(winner.id, b_id, "B reached 15 first");
    }

    #[test]
    fn determine_winner_is_idempotent() {
        let bidders = reference_bidders();
        let pat = bidders[2].id;
        let auction = Auction::new(bidders).unwrap();
        auction.place_bid(pat, dec(84)).unwrap();

        let first = auction.determine_winner().unwrap();
        let second = auction.determine_winner().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.id, pat);
    }

    #[test]
    fn from_config_validates() {
        let json = r#"{"bidders": [
            {"name": "Riley", "starting_bid": "700", "max_bid": "725", "auto_increment": "2"},
            {"name": "Morgan", "starting_bid": "599", "max_bid": "725", "auto_increment": "15"}
        ]}"#;
        let cfg = AuctionConfig::from_json_str(json).unwrap();
        let auction = Auction::from_config(&cfg).unwrap();
        assert_eq!(auction.len(), 2);

        let mut bad = cfg.clone();
        bad.bidders[1].auto_increment = Decimal::ZERO;
        let err = Auction::from_config(&bad).unwrap_err();
        assert!(matches!(err, ProxybidError::InvalidIncrement { .. }), "got {err:?}");
    }

    #[test]
    fn digest_ignores_decimal_scale() {
        let mut a = Bidder::dummy("A", 60, 80, 1);
        let mut b = a.clone();
        a.current_bid = Decimal::new(60, 0);
        b.current_bid = Decimal::new(6000, 2);
        assert_eq!(digest_bidders(&[a]), digest_bidders(&[b]));
    }

    #[test]
    fn seq_continues_after_existing_stamps() {
        let mut a = Bidder::dummy("A", 10, 20, 1);
        a.last_bid.seq = 41;
        let b = Bidder::dummy("B", 10, 20, 1);
        let b_id = b.id;
        let auction = Auction::new(vec![a, b]).unwrap();
        let outcome = auction.place_bid(b_id, dec(12)).unwrap();
        assert_eq!(outcome.stamp.seq, 42);
    }

    #[test]
    fn auction_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Auction>();
    }
}

//! Winner selection.
//!
//! Highest `current_bid` wins. Among equal highest bids, the bidder whose
//! [`BidStamp`](proxybid_types::BidStamp) is strictly earlier wins; if the
//! stamps are identical the bidder stored first keeps the lead.

use proxybid_types::Bidder;

/// Pick the winner from a snapshot of bidders.
///
/// Returns `None` only for an empty slice.
#[must_use]
pub fn select_winner(bidders: &[Bidder]) -> Option<&Bidder> {
    let mut winner: Option<&Bidder> = None;
    for bidder in bidders {
        if outranks(bidder, winner) {
            winner = Some(bidder);
        }
    }
    winner
}

/// Whether `challenger` should replace `current` as the leading bidder.
fn outranks(challenger: &Bidder, current: Option<&Bidder>) -> bool {
    match current {
        None => true,
        Some(leader) => {
            challenger.current_bid > leader.current_bid
                || (challenger.current_bid == leader.current_bid
                    && challenger.last_bid.is_before(&leader.last_bid))
        }
    }
}

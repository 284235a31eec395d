//! Proxy-round driver: lets every bidder climb by its own increment until
//! nobody can afford another step.

use proxybid_types::{Bidder, Result, constants};

use crate::auction::Auction;

/// Summary of a [`run_proxy_rounds`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundsReport {
    /// Passes made over the bidder list, including the final idle pass.
    pub rounds: usize,
    /// Manual bids placed by the driver.
    pub bids_placed: usize,
    /// Winner once the driver stopped.
    pub winner: Option<Bidder>,
}

/// Drive the auction to quiescence.
///
/// Each pass walks bidders in stored order and bids `current_bid +
/// auto_increment` for every bidder that can still afford it. Stops after
/// a pass with no bids, or after [`constants::MAX_PROXY_ROUNDS`] passes.
///
/// The driver expects to be the only caller placing bids while it runs.
///
/// # Errors
/// Propagates the first bid error. Bids placed before it stay applied.
pub fn run_proxy_rounds(auction: &Auction) -> Result<RoundsReport> {
    let ids = auction.bidder_ids();
    let mut rounds = 0;
    let mut bids_placed = 0;

    loop {
        if rounds >= constants::MAX_PROXY_ROUNDS {
            tracing::warn!(
                auction = %auction.id(),
                rounds,
                "Proxy round limit reached"
            );
            break;
        }
        rounds += 1;

        let mut placed = 0;
        for id in &ids {
            let Some(bidder) = auction.bidder(*id) else {
                continue;
            };
            if bidder.can_auto_increment() {
                auction.place_bid(*id, bidder.next_bid())?;
                placed += 1;
            }
        }
        bids_placed += placed;

        if placed == 0 {
            break;
        }
    }

    let winner = auction.determine_winner();
    tracing::info!(
        auction = %auction.id(),
        rounds,
        bids_placed,
        winner = ?winner.as_ref().map(|w| w.name.as_str()),
        "Proxy rounds complete"
    );

    Ok(RoundsReport {
        rounds,
        bids_placed,
        winner,
    })
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn reference_auction_converges_to_pat() {
        let auction = Auction::new(vec![
            Bidder::dummy("Sasha", 50, 80, 3),
            Bidder::dummy("John", 60, 82, 2),
            Bidder::dummy("Pat", 55, 85, 5),
        ])
        .unwrap();

        let report = run_proxy_rounds(&auction).unwrap();
        let winner = report.winner.unwrap();
        assert_eq!(winner.name, "Pat");
        assert_eq!(winner.current_bid, Decimal::new(85, 0));
        assert_eq!(report.rounds, 6);
        assert_eq!(report.bids_placed, 11);
    }

    #[test]
    fn nobody_can_climb() {
        let auction = Auction::new(vec![
            Bidder::dummy("A", 10, 10, 1),
            Bidder::dummy("B", 20, 20, 1),
        ])
        .unwrap();

        let report = run_proxy_rounds(&auction).unwrap();
        assert_eq!(report.rounds, 1);
        assert_eq!(report.bids_placed, 0);
        assert_eq!(report.winner.unwrap().name, "B");
    }

    #[test]
    fn every_bidder_ends_within_one_increment_of_max() {
        let auction = Auction::new(vec![
            Bidder::dummy("Riley", 700, 725, 2),
            Bidder::dummy("Morgan", 599, 725, 15),
            Bidder::dummy("Charlie", 625, 725, 8),
        ])
        .unwrap();

        run_proxy_rounds(&auction).unwrap();
        for b in auction.bidders() {
            assert!(!b.can_auto_increment(), "{} could still climb", b.name);
            assert!(b.current_bid <= b.max_bid);
        }
    }
}

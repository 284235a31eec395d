//! # proxybid-engine
//!
//! **Proxy-bidding auction engine.**
//!
//! Given bidders with a starting bid, a ceiling, and an automatic increment,
//! the engine accepts manual bids, tops up every other bidder by its own
//! increment after each accepted bid, and picks a winner by highest bid with
//! an earliest-stamp tie-break.
//!
//! - **Validated construction**: no auction exists with bad bidders
//! - **Atomic placement**: validation and the full sweep run under one write lock
//! - **Deterministic tie-break**: every write carries a strictly increasing stamp
//! - **Exact money**: all amounts are [`rust_decimal::Decimal`]

pub mod auction;
pub mod clock;
pub mod rounds;
pub mod validation;
pub mod winner;

pub use auction::{Auction, AutoRaise, BidOutcome, digest_bidders};
pub use clock::{Clock, FixedClock, SystemClock};
pub use rounds::{RoundsReport, run_proxy_rounds};
pub use validation::{check_bid, validate_bidders};
pub use winner::select_winner;

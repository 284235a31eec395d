//! Configuration types for Proxybid auctions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Bidder, BidderId, ProxybidError, Result, constants};

/// Bidding parameters for one participant, as supplied by a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidderConfig {
    /// Display label (need not be unique).
    pub name: String,
    /// Floor for this bidder's bids.
    pub starting_bid: Decimal,
    /// Ceiling for this bidder's bids.
    pub max_bid: Decimal,
    /// Step used when the engine bids on this bidder's behalf.
    pub auto_increment: Decimal,
    /// Opening bid. Defaults to `starting_bid`.
    #[serde(default)]
    pub current_bid: Option<Decimal>,
}

impl BidderConfig {
    /// Materialize a [`Bidder`] with a freshly generated ID.
    #[must_use]
    pub fn into_bidder(self) -> Bidder {
        self.into_bidder_with_id(BidderId::new())
    }

    #[must_use]
    pub fn into_bidder_with_id(self, id: BidderId) -> Bidder {
        let mut bidder = Bidder::with_id(
            id,
            self.name,
            self.starting_bid,
            self.max_bid,
            self.auto_increment,
        );
        if let Some(current) = self.current_bid {
            bidder.current_bid = current;
        }
        bidder
    }
}

/// Everything needed to open an auction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuctionConfig {
    pub bidders: Vec<BidderConfig>,
}

impl AuctionConfig {
    /// Parse a JSON auction config.
    ///
    /// Only the shape is checked here; bidder parameters are validated when
    /// the auction is constructed.
    ///
    /// # Errors
    /// Returns [`ProxybidError::Serialization`] on malformed JSON and
    /// [`ProxybidError::Configuration`] if a bidder has an empty name.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        if let Some(pos) = cfg.bidders.iter().position(|b| b.name.trim().is_empty()) {
            return Err(ProxybidError::Configuration(format!(
                "bidder #{pos} has an empty name"
            )));
        }
        Ok(cfg)
    }

    /// Whether the config names enough bidders to open an auction.
    #[must_use]
    pub fn has_enough_bidders(&self) -> bool {
        self.bidders.len() >= constants::MIN_BIDDERS
    }

    /// Materialize all bidders, each with a fresh ID, in config order.
    #[must_use]
    pub fn build_bidders(&self) -> Vec<Bidder> {
        self.bidders.iter().cloned().map(BidderConfig::into_bidder).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "bidders": [
            {"name": "Sasha", "starting_bid": "50.00", "max_bid": "80.00", "auto_increment": "3.00"},
            {"name": "John", "starting_bid": "60.00", "max_bid": "82.00", "auto_increment": "2.00",
             "current_bid": "61.00"}
        ]
    }"#;

    #[test]
    fn parses_sample_config() {
        let cfg = AuctionConfig::from_json_str(SAMPLE).unwrap();
        assert_eq!(cfg.bidders.len(), 2);
        assert!(cfg.has_enough_bidders());
        assert_eq!(cfg.bidders[0].max_bid, Decimal::new(8000, 2));
        assert_eq!(cfg.bidders[0].current_bid, None);
        assert_eq!(cfg.bidders[1].current_bid, Some(Decimal::new(6100, 2)));
    }

    #[test]
    fn current_bid_defaults_to_starting_bid() {
        let cfg = AuctionConfig::from_json_str(SAMPLE).unwrap();
        let bidders = cfg.build_bidders();
        assert_eq!(bidders[0].current_bid, bidders[0].starting_bid);
        assert_eq!(bidders[1].current_bid, Decimal::new(6100, 2));
        assert_ne!(bidders[0].id, bidders[1].id);
    }

    #[test]
    fn malformed_json_is_serialization_error() {
        let err = AuctionConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ProxybidError::Serialization(_)), "got {err:?}");
    }

    #[test]
    fn empty_name_rejected() {
        let json = r#"{"bidders": [
            {"name": " ", "starting_bid": "1", "max_bid": "2", "auto_increment": "1"}
        ]}"#;
        let err = AuctionConfig::from_json_str(json).unwrap_err();
        assert!(matches!(err, ProxybidError::Configuration(_)), "got {err:?}");
    }

    #[test]
    fn config_serde_roundtrip() {
        let cfg = AuctionConfig::from_json_str(SAMPLE).unwrap();
        let json = serde_json::to_string(&cfg).unwrap();
        let back = AuctionConfig::from_json_str(&json).unwrap();
        assert_eq!(cfg, back);
    }
}

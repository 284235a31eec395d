//! Engine-wide constants for Proxybid.

/// Minimum number of bidders an auction can be created with.
pub const MIN_BIDDERS: usize = 2;

/// Decimal places used when rendering money amounts (cents).
pub const MONEY_SCALE: u32 = 2;

/// Upper bound on passes made by the proxy-round driver.
pub const MAX_PROXY_ROUNDS: usize = 1_000_000;

/// Domain separator for the auction state digest.
pub const STATE_DIGEST_DOMAIN: &[u8] = b"proxybid:state:v1:";

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "Proxybid";

/// Shared constants for the KINO payout calculator
///
/// This module centralizes the game limits and remote API defaults so the
/// CLI, the draw client and the payout table agree on them.

/// Lowest number that can be drawn or selected
pub const MIN_NUMBER: u8 = 1;

/// Highest number that can be drawn or selected
pub const MAX_NUMBER: u8 = 80;

/// Maximum amount of numbers a player may select
///
/// The payout table carries one row per selection size from 1 to this value.
pub const MAX_SELECTED_NUMBERS: usize = 12;

/// Lowest page a caller may request explicitly (pages are 1-based)
pub const MIN_PAGE: u32 = 1;

/// Highest page a caller may request explicitly
///
/// A day of KINO draws fits within 18 pages of the OPAP listing.
pub const MAX_PAGE: u32 = 18;

/// OPAP web service origin
pub const DEFAULT_API_BASE_URL: &str = "https://api.opap.gr";

/// OPAP game identifier for KINO
pub const DEFAULT_GAME_ID: u32 = 1100;

/// Per-request timeout for the draws API
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Multiplier applied to every payout when playing with KINO bonus
pub const BONUS_MULTIPLIER: f64 = 2.0;

/// Date format accepted on the command line and used in the draws API path
pub const DATE_FORMAT: &str = "%Y-%m-%d";

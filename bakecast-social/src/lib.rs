//! Social network clients used by bakecast.
//!
//! Only Twitter/X is implemented.
pub mod twitter;

//! Unverified JWT inspection.
//!
//! Decoding here never checks the signature or any time-based claim. Use the
//! result to look at a token, never to decide whether to trust it.

mod functions;
mod mock;
mod types;

pub use functions::{decode_unverified, parse_id_token};
pub use mock::{get_mock_token, mock_token_at};
pub use types::{Claims, UnverifiedToken, ACCEPTED_ALGORITHMS};

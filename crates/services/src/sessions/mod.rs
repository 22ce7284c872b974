mod request;
mod service;

pub use request::{CHALLENGE_TYPES, SessionRequest};
pub use service::{FINAL_REVIEW_MS, SessionService};

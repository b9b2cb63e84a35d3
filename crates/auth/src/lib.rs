//! `mizan-auth` — session state for the signed-in user.
//!
//! Holds the bearer token and cached user profile, persists both through the
//! storage port so a reload stays signed in, and exposes the token to the
//! API client via [`mizan_client::TokenProvider`].

pub mod profile;
pub mod session;

pub use profile::UserProfile;
pub use session::SessionStore;

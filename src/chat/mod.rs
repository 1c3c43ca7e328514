//! Conversation orchestration.
//!
//! [`ChatSession`] is the glue between user input and the recommendation
//! core. It never fails: every error becomes a fixed apology in the
//! transcript, and authentication loss is reported once through
//! [`TurnOutcome::ReauthRequired`] so the owner of the session can send the
//! user back to sign-in.

mod poller;
mod session;

pub use poller::NowPlayingPoller;
pub use session::APOLOGY;
pub use session::ChatSession;
pub use session::GREETING;
pub use session::TurnOutcome;

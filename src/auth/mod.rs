//! Master password gating.
//!
//! This module provides:
//! - The persisted master password record (`master`)
//! - Lockout after repeated failures (`lockout`)
//! - The login flow and authenticated session (`session`)

pub mod lockout;
pub mod master;
pub mod session;

pub use lockout::{cooldown, LockStatus, LockoutState, LOCKOUT_THRESHOLD};
pub use master::MasterCredentialStore;
pub use session::{Gatekeeper, Session};

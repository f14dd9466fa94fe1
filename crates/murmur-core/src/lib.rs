//! Validation and business rules for accounts and messages.
//!
//! Every operation here is a single validate-then-persist step against
//! the store. Recoverable failures come back as typed outcomes; only
//! store faults propagate as errors.

pub mod accounts;
pub mod messages;

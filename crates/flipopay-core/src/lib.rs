//! Core domain model and request validation.
//!
//! Provides the strongly-typed payout request, the transfer-rail enum, and
//! the declarative validator that turns an arbitrary JSON payload into a
//! normalized request or an ordered list of field-level error messages.
//! The API crate depends on these types for every payout it handles.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod payout;
pub mod validate;

pub use payout::{PayoutRequest, TransactionType, UnknownTransactionType};
pub use validate::{validate, ValidationErrors};

//! Payout request model.
//!
//! A `PayoutRequest` exists only for the duration of a single HTTP request:
//! it is constructed from the inbound body, validated once, and either
//! discarded or forwarded verbatim to the upstream processor. Wire field
//! names follow the upstream API contract exactly.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::Number;
use thiserror::Error;

/// Funds-transfer rail used for a payout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    /// National Electronic Funds Transfer.
    Neft,
    /// Immediate Payment Service.
    Imps,
    /// Real Time Gross Settlement.
    Rtgs,
    /// Unified Payments Interface.
    Upi,
}

impl TransactionType {
    /// All supported transfer rails, in contract order.
    pub const ALL: [Self; 4] = [Self::Neft, Self::Imps, Self::Rtgs, Self::Upi];

    /// Returns the wire representation of this rail.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Neft => "NEFT",
            Self::Imps => "IMPS",
            Self::Rtgs => "RTGS",
            Self::Upi => "UPI",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = UnknownTransactionType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NEFT" => Ok(Self::Neft),
            "IMPS" => Ok(Self::Imps),
            "RTGS" => Ok(Self::Rtgs),
            "UPI" => Ok(Self::Upi),
            other => Err(UnknownTransactionType(other.to_string())),
        }
    }
}

/// Error returned when parsing an unrecognized transfer rail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown transaction type: {0}")]
pub struct UnknownTransactionType(pub String);

/// A validated payout request, forwarded verbatim to the upstream API.
///
/// The amount is kept as an arbitrary-precision JSON number so that
/// forwarding never alters its textual representation. Serialization
/// produces exactly the upstream wire field names; unknown inbound keys
/// are dropped during validation, so a normalized request carries no
/// extraneous fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutRequest {
    /// Disbursement amount, strictly positive.
    pub amount: Number,
    /// Beneficiary name.
    pub customer_name: String,
    /// Beneficiary phone number, exactly 10 digits.
    pub customer_phone_number: String,
    /// Beneficiary email address.
    pub customer_email: String,
    /// Transfer rail for this payout.
    pub transaction_type: TransactionType,
    /// Destination bank name.
    pub destination_bank: String,
    /// Destination account number, digits only.
    pub account_number: String,
    /// Beneficiary location.
    pub beneficiary_location: String,
    /// Destination branch IFSC code.
    pub ifsc: String,
    /// Merchant identifier.
    #[serde(rename = "merchantID")]
    pub merchant_id: String,
    /// Affiliate identifier.
    #[serde(rename = "affiliateID")]
    pub affiliate_id: String,
    /// Caller-supplied alphanumeric reference.
    pub reference: String,
}

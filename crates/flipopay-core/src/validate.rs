//! Declarative validation for inbound payout payloads.
//!
//! Checks every field of the payout schema rather than stopping at the
//! first violation, and collects one human-readable message per violated
//! field in schema-declaration order. The message wording is part of the
//! external contract and must not change.

use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;
use serde_json::{Map, Number, Value};

use crate::payout::{PayoutRequest, TransactionType};

static PHONE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{10}$").expect("valid phone number regex"));

static DIGITS_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("valid digits regex"));

static ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]+$").expect("valid alphanumeric regex"));

// WHATWG HTML5 email input pattern.
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?i)[a-z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?)+$",
    )
    .expect("valid email regex")
});

/// Ordered collection of field-level validation messages.
///
/// A request is either fully valid or rejected in its entirety; when
/// rejected, this carries every violated constraint in schema order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<String>);

impl ValidationErrors {
    /// Wraps an ordered list of messages.
    pub fn new(messages: Vec<String>) -> Self {
        Self(messages)
    }

    /// Creates a single-message rejection.
    pub fn single(message: impl Into<String>) -> Self {
        Self(vec![message.into()])
    }

    /// Returns the messages in schema-declaration order.
    pub fn messages(&self) -> &[String] {
        &self.0
    }

    /// Consumes the collection, yielding the ordered messages.
    pub fn into_messages(self) -> Vec<String> {
        self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Validates an arbitrary JSON payload against the payout schema.
///
/// On success returns the normalized request with no extraneous fields;
/// on failure returns every violated constraint, one message per field,
/// in schema-declaration order.
pub fn validate(payload: &Value) -> Result<PayoutRequest, ValidationErrors> {
    let Some(object) = payload.as_object() else {
        return Err(ValidationErrors::single("request body must be a JSON object"));
    };

    let mut schema = Schema::new(object);

    let amount = schema.positive_number("amount");
    let customer_name = schema.non_empty_string("customerName");
    let customer_phone_number = schema.pattern(
        "customerPhoneNumber",
        &PHONE_NUMBER,
        "customerPhoneNumber must be a 10-digit number",
    );
    let customer_email = schema.email("customerEmail");
    let transaction_type = schema.transaction_type("transactionType");
    let destination_bank = schema.non_empty_string("destinationBank");
    let account_number =
        schema.pattern("accountNumber", &DIGITS_ONLY, "accountNumber must be a numeric value");
    let beneficiary_location = schema.non_empty_string("beneficiaryLocation");
    let ifsc = schema.non_empty_string("ifsc");
    let merchant_id = schema.non_empty_string("merchantID");
    let affiliate_id = schema.non_empty_string("affiliateID");
    let reference = schema.pattern("reference", &ALPHANUMERIC, "reference must be alphanumeric");

    let errors = schema.finish();
    if let (
        Some(amount),
        Some(customer_name),
        Some(customer_phone_number),
        Some(customer_email),
        Some(transaction_type),
        Some(destination_bank),
        Some(account_number),
        Some(beneficiary_location),
        Some(ifsc),
        Some(merchant_id),
        Some(affiliate_id),
        Some(reference),
    ) = (
        amount,
        customer_name,
        customer_phone_number,
        customer_email,
        transaction_type,
        destination_bank,
        account_number,
        beneficiary_location,
        ifsc,
        merchant_id,
        affiliate_id,
        reference,
    ) {
        if errors.is_empty() {
            return Ok(PayoutRequest {
                amount,
                customer_name,
                customer_phone_number,
                customer_email,
                transaction_type,
                destination_bank,
                account_number,
                beneficiary_location,
                ifsc,
                merchant_id,
                affiliate_id,
                reference,
            });
        }
    }

    Err(ValidationErrors::new(errors))
}

/// Per-payload checker that records one message per violated field.
struct Schema<'a> {
    object: &'a Map<String, Value>,
    errors: Vec<String>,
}

impl<'a> Schema<'a> {
    fn new(object: &'a Map<String, Value>) -> Self {
        Self { object, errors: Vec::new() }
    }

    fn finish(self) -> Vec<String> {
        self.errors
    }

    fn reject(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Required field lookup; absent and explicit-null both count as missing.
    fn required(&mut self, field: &str) -> Option<&'a Value> {
        match self.object.get(field) {
            Some(Value::Null) | None => {
                self.reject(format!("{field} is required"));
                None
            },
            Some(value) => Some(value),
        }
    }

    fn string(&mut self, field: &str) -> Option<&'a str> {
        let value = self.required(field)?;
        match value.as_str() {
            Some(s) => Some(s),
            None => {
                self.reject(format!("{field} must be a string"));
                None
            },
        }
    }

    fn non_empty_string(&mut self, field: &str) -> Option<String> {
        let s = self.string(field)?;
        if s.is_empty() {
            self.reject(format!("{field} is not allowed to be empty"));
            return None;
        }
        Some(s.to_string())
    }

    fn positive_number(&mut self, field: &str) -> Option<Number> {
        let value = self.required(field)?;
        let Value::Number(number) = value else {
            self.reject(format!("{field} must be a number"));
            return None;
        };
        if number.as_f64().map_or(true, |n| n <= 0.0) {
            self.reject(format!("{field} must be a positive value"));
            return None;
        }
        Some(number.clone())
    }

    fn pattern(&mut self, field: &str, pattern: &Regex, message: &str) -> Option<String> {
        let s = self.string(field)?;
        if !pattern.is_match(s) {
            self.reject(message);
            return None;
        }
        Some(s.to_string())
    }

    fn email(&mut self, field: &str) -> Option<String> {
        let s = self.string(field)?;
        if !EMAIL.is_match(s) {
            self.reject(format!("{field} must be a valid email"));
            return None;
        }
        Some(s.to_string())
    }

    fn transaction_type(&mut self, field: &str) -> Option<TransactionType> {
        let value = self.required(field)?;
        match value.as_str().and_then(|s| TransactionType::from_str(s).ok()) {
            Some(rail) => Some(rail),
            None => {
                self.reject(format!("{field} must be one of [NEFT, IMPS, RTGS, UPI]"));
                None
            },
        }
    }
}

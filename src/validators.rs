// src/validators.rs
//
// String-shape checks for signup fields. Full-string anchored matches,
// no trimming or case-folding; callers normalize first if they want leniency.

use regex::Regex;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

// Indian GSTIN: state code, PAN, entity number, literal Z, checksum.
static GST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{2}[A-Z]{5}[0-9]{4}[A-Z][1-9A-Z]Z[0-9A-Z]$").unwrap());

static PAN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").unwrap());

// Indian mobile number: 10 digits, leading 6-9.
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[6-9][0-9]{9}$").unwrap());

pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn validate_gst(gst: &str) -> bool {
    GST_RE.is_match(gst)
}

pub fn validate_pan(pan: &str) -> bool {
    PAN_RE.is_match(pan)
}

pub fn validate_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

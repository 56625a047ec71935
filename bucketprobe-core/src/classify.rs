//! Response and transcript classification heuristics.
//!
//! All marker-substring parsing for both channels lives here so it can be
//! unit-tested against literal captured output.

use once_cell::sync::Lazy;
use regex::Regex;

/// Markers present in a successful bucket listing body.
const LISTING_MARKERS: &[&str] = &["<Key>", "<Contents>", "ListBucketResult", "CommonPrefixes"];

const ACCESS_DENIED: &str = "AccessDenied";
const NO_SUCH_BUCKET: &str = "NoSuchBucket";
const INVALID_BUCKET_NAME: &str = "InvalidBucketName";

static ERR_IN_PAREN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(([^)]+)\)").unwrap());
static OBJECT_TOTAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"Total\s+Objects:\s+(\d+)").unwrap());

/// Result of one accessibility check against one endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Not reachable or not present; carries a short error token for logs.
    NotAccessible(String),
    /// Bucket contents are publicly listable.
    AccessibleListing,
    /// Bucket exists but listing is denied (403 with an access-denied body).
    AccessibleDeniedButPresent,
    /// Result of the opt-in write/read/delete capability checks.
    Operations(WriteOutcome),
}

/// Success of each opt-in capability check. A step that was skipped (not
/// configured, or gated on a failed PUT) reads as `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriteOutcome {
    pub put: bool,
    pub get: bool,
    pub delete: bool,
}

impl WriteOutcome {
    pub fn any_success(self) -> bool {
        self.put || self.get || self.delete
    }
}

/// Classify a listing GET by status code and body markers.
///
/// Ambiguous responses are conservatively not accessible.
pub fn classify_listing(status: u16, body: &str) -> ProbeOutcome {
    let marked_absent = body.contains(NO_SUCH_BUCKET) || body.contains(INVALID_BUCKET_NAME);
    if status == 403 && body.contains(ACCESS_DENIED) && !marked_absent {
        return ProbeOutcome::AccessibleDeniedButPresent;
    }
    if status == 200 && !marked_absent && LISTING_MARKERS.iter().any(|m| body.contains(m)) {
        return ProbeOutcome::AccessibleListing;
    }
    ProbeOutcome::NotAccessible(error_token(body))
}

/// Short error token for log output: a parenthesized code if present, then
/// recognized keywords, then a generic fallback.
pub fn error_token(text: &str) -> String {
    if let Some(caps) = ERR_IN_PAREN.captures(text) {
        return caps[1].to_string();
    }
    if text.contains("Traceback") {
        return "Traceback".to_string();
    }
    for word in [ACCESS_DENIED, NO_SUCH_BUCKET, INVALID_BUCKET_NAME] {
        if text.contains(word) {
            return word.to_string();
        }
    }
    "Error".to_string()
}

/// Extract the object total from an `s3 ls --summarize` transcript.
///
/// Presence of the marker is the success signal for the tool channel's
/// listing check.
pub fn parse_object_total(output: &str) -> Option<u64> {
    OBJECT_TOTAL
        .captures(output)
        .and_then(|caps| caps[1].parse().ok())
}

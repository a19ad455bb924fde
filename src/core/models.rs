// src/core/models.rs

use std::collections::BTreeMap;
use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};
use thiserror::Error;

// --- Header Keys ---

/// A fixed set of response headers the inspector looks up by name.
///
/// Both key enums share this trait so the classifier can walk either list the
/// same way. Iteration order is declaration order, which is also the order
/// the renderers print in.
pub trait TrackedHeader: Copy + Ord + IntoEnumIterator {
    /// The canonical header name as shown to the user (e.g. "X-Frame-Options").
    fn display_name(self) -> &'static str;

    /// The lowercase wire name used for the case-insensitive lookup.
    fn wire_name(self) -> String {
        self.display_name().to_ascii_lowercase()
    }
}

/// Headers whose presence affects browser-enforced security policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, IntoStaticStr)]
pub enum SecurityHeader {
    #[strum(serialize = "Strict-Transport-Security")]
    StrictTransportSecurity,
    #[strum(serialize = "X-XSS-Protection")]
    XXssProtection,
    #[strum(serialize = "Content-Security-Policy")]
    ContentSecurityPolicy,
    #[strum(serialize = "X-Frame-Options")]
    XFrameOptions,
    #[strum(serialize = "Referrer-Policy")]
    ReferrerPolicy,
    #[strum(serialize = "Permissions-Policy")]
    PermissionsPolicy,
    #[strum(serialize = "X-Content-Type-Options")]
    XContentTypeOptions,
    #[strum(serialize = "Access-Control-Allow-Origin")]
    AccessControlAllowOrigin,
    #[strum(serialize = "Expect-CT")]
    ExpectCt,
}

impl TrackedHeader for SecurityHeader {
    fn display_name(self) -> &'static str {
        self.into()
    }
}

/// Headers that may leak server implementation details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, IntoStaticStr)]
pub enum SensitiveHeader {
    #[strum(serialize = "Server")]
    Server,
    #[strum(serialize = "X-Powered-By")]
    XPoweredBy,
    #[strum(serialize = "Via")]
    Via,
    #[strum(serialize = "ETag")]
    ETag,
    #[strum(serialize = "Cache-Control")]
    CacheControl,
    #[strum(serialize = "Age")]
    Age,
}

impl TrackedHeader for SensitiveHeader {
    fn display_name(self) -> &'static str {
        self.into()
    }
}

// --- Report ---

/// Header values keyed by header; `None` means the header was missing or empty.
pub type HeaderValues<K> = BTreeMap<K, Option<String>>;

/// The classified view of one HTTP response.
///
/// Every tracked key is always present in both maps, so lookups never miss.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InspectionReport {
    pub security: HeaderValues<SecurityHeader>,
    pub sensitive: HeaderValues<SensitiveHeader>,
}

impl InspectionReport {
    pub fn security_value(&self, key: SecurityHeader) -> Option<&str> {
        self.security.get(&key).and_then(|v| v.as_deref())
    }

    pub fn sensitive_value(&self, key: SensitiveHeader) -> Option<&str> {
        self.sensitive.get(&key).and_then(|v| v.as_deref())
    }

    /// Number of security headers the response configured.
    pub fn present_count(&self) -> usize {
        self.security
            .values()
            .filter(|v| HeaderStatus::of(v.as_deref()) == HeaderStatus::Present)
            .count()
    }
}

/// Presence marker derived at render time, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderStatus {
    Present,
    Absent,
}

impl HeaderStatus {
    pub fn of(value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.is_empty() => HeaderStatus::Present,
            _ => HeaderStatus::Absent,
        }
    }
}

// --- Errors ---

/// Why a fetch produced no headers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Timeout exceeded")]
    Timeout,
    /// Any other transport failure, carrying the underlying message verbatim.
    #[error("{0}")]
    Request(String),
}

/// Either a classified report or the reason the fetch failed.
pub type InspectionOutcome = Result<InspectionReport, FetchError>;

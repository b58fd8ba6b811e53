use std::fmt;
use url::Url;

/// URL scheme the drop-in UI uses to come back after an app switch.
///
/// Always `<bundle-id>.payments`. The host registers it with the platform and
/// forwards inbound URLs that [`ReturnUrlScheme::matches`] to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnUrlScheme(String);

impl ReturnUrlScheme {
    pub const SUFFIX: &'static str = "payments";

    pub fn for_bundle(bundle_id: &str) -> Self {
        Self(format!("{}.{}", bundle_id, Self::SUFFIX))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive scheme comparison against an inbound redirect.
    pub fn matches(&self, url: &Url) -> bool {
        url.scheme().eq_ignore_ascii_case(&self.0)
    }
}

impl fmt::Display for ReturnUrlScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

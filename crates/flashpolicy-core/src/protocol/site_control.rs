//! `permitted-cross-domain-policies` values.

use std::fmt;
use std::str::FromStr;

use crate::error::FlashPolicyError;

/// Site-control directive of a policy document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteControl {
    All,
    None,
    MasterOnly,
    MasterOnlyV2,
    ByContentType,
    ByFtpFilename,
}

impl SiteControl {
    pub const VALUES: [SiteControl; 6] = [
        SiteControl::All,
        SiteControl::None,
        SiteControl::MasterOnly,
        SiteControl::MasterOnlyV2,
        SiteControl::ByContentType,
        SiteControl::ByFtpFilename,
    ];

    /// Attribute value as written in the document.
    pub fn as_str(self) -> &'static str {
        match self {
            SiteControl::All => "all",
            SiteControl::None => "none",
            SiteControl::MasterOnly => "master-only",
            SiteControl::MasterOnlyV2 => "master-only-v2",
            SiteControl::ByContentType => "by-content-type",
            SiteControl::ByFtpFilename => "by-ftp-filename",
        }
    }
}

impl FromStr for SiteControl {
    type Err = FlashPolicyError;

    /// Exact, case-sensitive match; surrounding whitespace is not trimmed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SiteControl::VALUES
            .into_iter()
            .find(|sc| sc.as_str() == s)
            .ok_or_else(|| FlashPolicyError::InvalidSiteControl(s.to_string()))
    }
}

impl fmt::Display for SiteControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn validate_site_control(value: &str) -> bool {
    value.parse::<SiteControl>().is_ok()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn parse_is_inverse_of_as_str() {
        for sc in SiteControl::VALUES {
            assert_eq!(sc.as_str().parse::<SiteControl>().ok(), Some(sc));
        }
    }

    #[test]
    fn rejection_carries_offending_value() {
        let err = "Master-Only".parse::<SiteControl>().unwrap_err();
        assert!(matches!(err, FlashPolicyError::InvalidSiteControl(ref v) if v == "Master-Only"));
    }
}

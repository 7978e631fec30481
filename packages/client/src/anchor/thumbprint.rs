//! Fingerprint to thumbprint normalization

use std::fmt;

use serde::Serialize;

/// Flat hex identifier of a trust anchor, as identity providers store it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Thumbprint(String);

impl Thumbprint {
    /// Strip every `:` from a colon-delimited fingerprint.
    ///
    /// Nothing else is touched: case is preserved and no length check is
    /// made, so the same input always yields the same output.
    #[must_use]
    pub fn from_fingerprint(fingerprint: &str) -> Self {
        Self(fingerprint.chars().filter(|c| *c != ':').collect())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Thumbprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Thumbprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Thumbprint> for String {
    fn from(thumbprint: Thumbprint) -> Self {
        thumbprint.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colons_removed() {
        assert_eq!(Thumbprint::from_fingerprint("AB:CD:EF").as_str(), "ABCDEF");
    }

    #[test]
    fn test_idempotent_and_case_preserving() {
        let once = Thumbprint::from_fingerprint("ab:Cd:eF");
        let twice = Thumbprint::from_fingerprint(once.as_str());
        assert_eq!(once.as_str(), "abCdeF");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_sha1_fingerprint_is_forty_chars() {
        let fp = "A9:99:3E:36:47:06:81:6A:BA:3E:25:71:78:50:C2:6C:9C:D0:D8:9D";
        let thumbprint = Thumbprint::from_fingerprint(fp);
        assert_eq!(thumbprint.as_str().len(), 40);
        assert_eq!(thumbprint.to_string(), "A9993E364706816ABA3E25717850C26C9CD0D89D");
    }
}

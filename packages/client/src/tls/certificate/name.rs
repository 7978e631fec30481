//! Distinguished names as attribute → values maps

use std::collections::BTreeMap;
use std::fmt;

use der::asn1::{Ia5StringRef, ObjectIdentifier, PrintableStringRef, Utf8StringRef};
use serde::Serialize;

// Common OIDs for DN components
const OID_CN: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.3");
const OID_SERIAL_NUMBER: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.5");
const OID_C: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.6");
const OID_L: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.7");
const OID_ST: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.8");
const OID_STREET: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.9");
const OID_O: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.10");
const OID_OU: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.11");
const OID_POSTAL_CODE: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.17");
const OID_DC: ObjectIdentifier = ObjectIdentifier::new_unwrap("0.9.2342.19200300.100.1.25");
const OID_EMAIL: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.9.1");

/// Subject or issuer name of a certificate.
///
/// Attributes are keyed by their short name (`CN`, `O`, ...) or dotted OID
/// when there is none; repeated attributes keep every value in encounter
/// order. Equality ignores the order in which attributes appear, matching a
/// structural comparison of the two names rather than of their encodings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DistinguishedName {
    attributes: BTreeMap<String, Vec<String>>,
}

impl DistinguishedName {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value for `attribute`.
    pub fn push(&mut self, attribute: impl Into<String>, value: impl Into<String>) {
        self.attributes
            .entry(attribute.into())
            .or_default()
            .push(value.into());
    }

    /// Builder form of [`push`](Self::push).
    #[must_use]
    pub fn with(mut self, attribute: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(attribute, value);
        self
    }

    /// First value of `attribute`, if present.
    #[must_use]
    pub fn get(&self, attribute: &str) -> Option<&str> {
        self.attributes
            .get(attribute)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    #[must_use]
    pub fn common_name(&self) -> Option<&str> {
        self.get("CN")
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Extract every attribute of an x509-cert `Name`.
    pub(crate) fn from_x509(name: &x509_cert::name::Name) -> Self {
        let mut dn = Self::new();

        // Iterate through RDNs (Relative Distinguished Names)
        for rdn in &name.0 {
            for atv in rdn.0.iter() {
                let key = short_name(&atv.oid)
                    .map_or_else(|| atv.oid.to_string(), str::to_string);
                dn.push(key, attribute_value(&atv.value));
            }
        }

        dn
    }
}

const SHORT_NAMES: [(ObjectIdentifier, &str); 11] = [
    (OID_CN, "CN"),
    (OID_SERIAL_NUMBER, "serialNumber"),
    (OID_C, "C"),
    (OID_L, "L"),
    (OID_ST, "ST"),
    (OID_STREET, "street"),
    (OID_O, "O"),
    (OID_OU, "OU"),
    (OID_POSTAL_CODE, "postalCode"),
    (OID_DC, "DC"),
    (OID_EMAIL, "emailAddress"),
];

fn short_name(oid: &ObjectIdentifier) -> Option<&'static str> {
    SHORT_NAMES
        .iter()
        .find(|(known, _)| known == oid)
        .map(|(_, name)| *name)
}

/// Decode the usual ASN.1 string types; anything else is kept as `#<hex>`
/// of the raw value so that two names still compare by content.
fn attribute_value(value: &der::Any) -> String {
    if let Ok(ps) = PrintableStringRef::try_from(value) {
        ps.to_string()
    } else if let Ok(utf8s) = Utf8StringRef::try_from(value) {
        utf8s.to_string()
    } else if let Ok(ia5s) = Ia5StringRef::try_from(value) {
        ia5s.to_string()
    } else {
        format!("#{}", hex::encode(value.value()))
    }
}

impl fmt::Display for DistinguishedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (attribute, values) in &self.attributes {
            for value in values {
                if !first {
                    f.write_str(", ")?;
                }
                write!(f, "{attribute}={value}")?;
                first = false;
            }
        }
        Ok(())
    }
}

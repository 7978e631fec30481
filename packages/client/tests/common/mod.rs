//! Certificate chains for integration tests

#![allow(dead_code)]

use std::time::{Duration, SystemTime};

use rcgen::{
    BasicConstraints, CertificateParams, DistinguishedName, DnType, IsCa, Issuer, KeyPair,
};
use rustls::pki_types::{CertificateDer, PrivateKeyDer, PrivatePkcs8KeyDer};

pub const URL: &str = "https://oidc.example.com/id/ABCDEF";

/// 2030-01-01T00:00:00Z
pub fn now() -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(1_893_456_000)
}

pub struct Authority {
    pub der: CertificateDer<'static>,
    pub issuer: Issuer<'static, KeyPair>,
}

pub struct Leaf {
    pub der: CertificateDer<'static>,
    pub key: PrivateKeyDer<'static>,
}

fn named(common_name: &str) -> DistinguishedName {
    let mut dn = DistinguishedName::new();
    dn.push(DnType::OrganizationName, "Pinroot Test");
    dn.push(DnType::CommonName, common_name);
    dn
}

pub fn root_ca(common_name: &str, not_after: (i32, u8, u8)) -> Authority {
    let mut params = CertificateParams::new(Vec::default()).unwrap();
    params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    params.distinguished_name = named(common_name);
    params.not_before = rcgen::date_time_ymd(2020, 1, 1);
    params.not_after = rcgen::date_time_ymd(not_after.0, not_after.1, not_after.2);

    let key_pair = KeyPair::generate().unwrap();
    let cert = params.clone().self_signed(&key_pair).unwrap();

    Authority {
        der: cert.der().clone(),
        issuer: Issuer::<'static>::new(params, key_pair),
    }
}

pub fn intermediate_ca(common_name: &str, parent: &Authority) -> Authority {
    let mut params = CertificateParams::new(Vec::default()).unwrap();
    params.is_ca = IsCa::Ca(BasicConstraints::Constrained(0));
    params.distinguished_name = named(common_name);
    params.not_before = rcgen::date_time_ymd(2020, 1, 1);
    params.not_after = rcgen::date_time_ymd(2035, 1, 1);

    let key_pair = KeyPair::generate().unwrap();
    let cert = params.clone().signed_by(&key_pair, &parent.issuer).unwrap();

    Authority {
        der: cert.der().clone(),
        issuer: Issuer::<'static>::new(params, key_pair),
    }
}

pub fn server_leaf(parent: &Authority) -> Leaf {
    let mut params =
        CertificateParams::new(vec!["localhost".to_string(), "127.0.0.1".to_string()]).unwrap();
    params.distinguished_name = named("localhost");
    params.not_before = rcgen::date_time_ymd(2020, 1, 1);
    params.not_after = rcgen::date_time_ymd(2031, 1, 1);

    let key_pair = KeyPair::generate().unwrap();
    let cert = params.signed_by(&key_pair, &parent.issuer).unwrap();

    Leaf {
        der: cert.der().clone(),
        key: PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(key_pair.serialize_der())),
    }
}

/// Uppercase hex SHA-1 of `der` without separators.
pub fn expected_thumbprint(der: &CertificateDer<'_>) -> String {
    let digest = ring::digest::digest(&ring::digest::SHA1_FOR_LEGACY_USE_ONLY, der.as_ref());
    hex::encode_upper(digest.as_ref())
}

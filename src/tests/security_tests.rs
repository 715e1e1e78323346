use std::collections::HashSet;

use super::{mersenne, modp_2048, small_params, FailingEntropy};
use crate::{
    is_probable_prime, mod_pow, random_exponent, respond, BigNat, DhError, DomainParameters,
    ExchangeRequest, NamedGroup, OsEntropy, Responder,
};

#[test]
fn test_secret_exponent_uniqueness() {
    let p = modp_2048().modulus();
    let mut seen = HashSet::new();

    for _ in 0..50 {
        let e = random_exponent(p, &mut OsEntropy).unwrap();
        assert!(seen.insert(e.expose_secret().clone()), "duplicate exponent drawn");
    }
}

#[test]
fn test_random_exponent_is_uniform_chi_square() {
    // p = 23 gives 20 admissible exponents, [2, 21].
    let p = BigNat::from(23u32);
    let buckets = 20usize;
    let trials = 100_000usize;
    let mut counts = vec![0usize; buckets];

    for _ in 0..trials {
        let e = random_exponent(&p, &mut OsEntropy).unwrap();
        let v = e.expose_secret().to_u64().unwrap() as usize;
        assert!((2..=21).contains(&v), "exponent {v} outside [2, 21]");
        counts[v - 2] += 1;
    }

    let expected = trials as f64 / buckets as f64;
    let chi_square: f64 = counts
        .iter()
        .map(|&c| {
            let d = c as f64 - expected;
            d * d / expected
        })
        .sum();

    // 19 degrees of freedom; 70 is far beyond the 1e-6 tail.
    assert!(chi_square < 70.0, "chi-square {chi_square} suggests bias: {counts:?}");

    // Reducing raw bytes mod 20 would give [2, 17] a share of 0.8125.
    let low: usize = counts[..16].iter().sum();
    let low_share = low as f64 / trials as f64;
    assert!((low_share - 0.8).abs() < 0.006, "low values drawn {low_share}");
}

#[test]
fn test_native_width_arithmetic_diverges() {
    // p = 2^61 - 1 fits a u64, but squaring residues does not.
    let p = mersenne(61);
    let p64 = p.to_u64().unwrap();
    let base64 = p64 - 2;

    let naive = {
        let mut result = 1u64;
        let mut base = base64 % p64;
        let mut exp = 3u64;
        while exp > 0 {
            if exp & 1 == 1 {
                result = result.wrapping_mul(base) % p64;
            }
            base = base.wrapping_mul(base) % p64;
            exp >>= 1;
        }
        result
    };

    // (p - 2)^3 ≡ -8 (mod p)
    let correct = mod_pow(&BigNat::from(base64), &BigNat::from(3u32), &p).unwrap();
    assert_eq!(correct, BigNat::from(p64 - 8));
    assert_ne!(BigNat::from(naive), correct);
}

#[test]
fn test_named_group_moduli_are_prime() {
    for group in [NamedGroup::Rfc3526Modp1536, NamedGroup::Rfc3526Modp2048] {
        let params = DomainParameters::named(group).unwrap();
        assert!(
            is_probable_prime(params.modulus()).unwrap(),
            "{group} modulus failed Miller-Rabin"
        );
    }
}

#[test]
fn test_generate_prime() {
    let p = crate::generate_prime(96).unwrap();
    assert_eq!(p.bit_length(), 96);
    assert!(p.is_odd());
    assert!(is_probable_prime(&p).unwrap());

    assert!(matches!(
        crate::generate_prime(16),
        Err(DhError::InvalidDomainParameters(_))
    ));
}

#[test]
fn test_response_carries_only_y_and_k() {
    let mut responder = Responder::new(OsEntropy);
    let request = ExchangeRequest {
        g: "5".to_string(),
        p: "23".to_string(),
        x: "8".to_string(),
    };
    let reply = responder.handle_json(&request.to_json().unwrap());
    assert_eq!(reply.status, 200);

    let body: serde_json::Value = serde_json::from_str(&reply.body).unwrap();
    let keys: Vec<&str> = body
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys.len(), 2);
    assert!(keys.contains(&"y"));
    assert!(keys.contains(&"K"));
}

#[test]
fn test_initiator_refuses_response_with_extra_fields() {
    let leaked = r#"{"y":"19","K":"2","b":"15"}"#;
    assert!(matches!(
        crate::ExchangeResponse::from_json(leaked),
        Err(DhError::Serialization(_))
    ));
}

#[test]
fn test_error_payloads_expose_only_the_kind() {
    let mut responder = Responder::new(OsEntropy);

    let reply = responder.handle_json(r#"{"g":"5","p":"23","x":"23"}"#);
    assert_eq!(reply.status, 400);
    assert_eq!(reply.body, r#"{"error":"InvalidPeerValue"}"#);

    let reply = responder.handle_json(r#"{"g":"1","p":"23","x":"8"}"#);
    assert_eq!(reply.status, 400);
    assert_eq!(reply.body, r#"{"error":"InvalidDomainParameters"}"#);

    // Numbers instead of decimal strings.
    let reply = responder.handle_json(r#"{"g":5,"p":23,"x":8}"#);
    assert_eq!(reply.status, 400);
    assert_eq!(reply.body, r#"{"error":"MalformedRequest"}"#);

    let reply = responder.handle_json(r#"{"g":"5","p":"23"}"#);
    assert_eq!(reply.status, 400);
    assert_eq!(reply.body, r#"{"error":"MalformedRequest"}"#);

    let mut broken = Responder::new(FailingEntropy);
    let reply = broken.handle_json(r#"{"g":"5","p":"23","x":"8"}"#);
    assert_eq!(reply.status, 500);
    assert_eq!(reply.body, r#"{"error":"EntropySourceUnavailable"}"#);
}

#[test]
fn test_invalid_peer_value_checked_before_entropy() {
    let params = small_params();
    let err = respond(&params, &BigNat::from(23u32), &mut FailingEntropy).unwrap_err();
    assert!(matches!(err, DhError::InvalidPeerValue(_)));
    assert!(err.is_recoverable());
}

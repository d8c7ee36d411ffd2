//! End-to-end seal/open tests: roundtrips, tamper matrix, isolation.

use serde_json::json;
use x402_hpke::{
    create_hpke, generate_keypair, JsonObject, OpenOptions, PublicSelection, SecureTransport,
    TransportKind,
};

fn obj(value: serde_json::Value) -> JsonObject {
    value.as_object().unwrap().clone()
}

#[test]
fn private_by_default_roundtrip() {
    let hpke = create_hpke("myapp").unwrap();
    let (public, private) = generate_keypair();
    let transport =
        SecureTransport::new(TransportKind::OtherRequest, obj(json!({"a": 1})), None, vec![])
            .unwrap();

    let (envelope, sidecar) = hpke.seal("kid1", &public, &transport, None).unwrap();
    assert!(sidecar.is_none());
    assert_eq!(envelope.typ, "hpke-envelope");
    assert_eq!(envelope.ver, "1");
    assert_eq!(envelope.kem, "X25519");

    let opened = hpke.open(&envelope, &private, OpenOptions::default()).unwrap();
    assert_eq!(opened.plaintext, b"{\"a\":1}");
    assert_eq!(opened.body, obj(json!({"a": 1})));
    assert!(opened.headers.is_empty());
}

#[test]
fn payment_roundtrip_with_header_sidecar() {
    let hpke = create_hpke("myapp").unwrap();
    let (public, private) = generate_keypair();
    let transport = SecureTransport::new(
        TransportKind::Payment,
        obj(json!({"payload": {"invoiceId": "inv_1"}})),
        None,
        vec![],
    )
    .unwrap();

    let (envelope, sidecar) = hpke
        .seal(
            "kid1",
            &public,
            &transport,
            Some(PublicSelection::names(["X-Payment"])),
        )
        .unwrap();

    let sidecar = sidecar.unwrap();
    assert_eq!(sidecar.len(), 1);
    assert_eq!(
        sidecar.get("X-Payment"),
        Some(&json!("{\"payload\":{\"invoiceId\":\"inv_1\"}}"))
    );

    let opened = hpke
        .open(
            &envelope,
            &private,
            OpenOptions {
                public_headers: Some(sidecar),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(opened.plaintext, b"{}");
    assert_eq!(opened.headers.len(), 1);
    assert_eq!(opened.headers[0].header, "X-Payment");
}

#[test]
fn equivalent_bodies_produce_identical_aad() {
    let hpke = create_hpke("myapp").unwrap();
    let (public, _) = generate_keypair();
    let body_a: serde_json::Value =
        serde_json::from_str("{\"z\": 1, \"a\": {\"y\": true, \"x\": false}}").unwrap();
    let body_b: serde_json::Value =
        serde_json::from_str("{\"a\":{\"x\":false,\"y\":true},\"z\":1}").unwrap();

    let seal = |value: &serde_json::Value| {
        let transport = SecureTransport::new(
            TransportKind::OtherRequest,
            value.as_object().unwrap().clone(),
            None,
            vec![],
        )
        .unwrap();
        hpke.seal("kid1", &public, &transport, None).unwrap().0
    };
    assert_eq!(seal(&body_a).aad, seal(&body_b).aad);
}

#[test]
fn namespace_isolation() {
    let sealer = create_hpke("app-a").unwrap();
    let opener = create_hpke("app-b").unwrap();
    let (public, private) = generate_keypair();
    let transport =
        SecureTransport::new(TransportKind::OtherRequest, obj(json!({"a": 1})), None, vec![])
            .unwrap();

    let (envelope, _) = sealer.seal("kid1", &public, &transport, None).unwrap();
    let err = opener
        .open(&envelope, &private, OpenOptions::default())
        .unwrap_err();
    assert_eq!(err.code(), "INVALID_ENVELOPE");
}

#[test]
fn kid_check() {
    let hpke = create_hpke("myapp").unwrap();
    let (public, private) = generate_keypair();
    let transport =
        SecureTransport::new(TransportKind::OtherRequest, obj(json!({"a": 1})), None, vec![])
            .unwrap();
    let (envelope, _) = hpke.seal("kid1", &public, &transport, None).unwrap();

    hpke.open(
        &envelope,
        &private,
        OpenOptions {
            expected_kid: Some(envelope.kid.clone()),
            ..Default::default()
        },
    )
    .unwrap();

    let err = hpke
        .open(
            &envelope,
            &private,
            OpenOptions {
                expected_kid: Some("other-kid".into()),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert_eq!(err.code(), "KID_MISMATCH");
}

#[test]
fn tamper_matrix() {
    let hpke = create_hpke("myapp").unwrap();
    let (public, private) = generate_keypair();
    let transport =
        SecureTransport::new(TransportKind::OtherRequest, obj(json!({"a": 1})), None, vec![])
            .unwrap();
    let (envelope, _) = hpke.seal("kid1", &public, &transport, None).unwrap();

    // Reserved namespace
    let mut bad = envelope.clone();
    bad.ns = "x402".into();
    assert_eq!(
        hpke.open(&bad, &private, OpenOptions::default())
            .unwrap_err()
            .code(),
        "INVALID_ENVELOPE"
    );

    // AEAD substitution
    let mut bad = envelope.clone();
    bad.aead = "AES-256-GCM".into();
    assert_eq!(
        hpke.open(&bad, &private, OpenOptions::default())
            .unwrap_err()
            .code(),
        "AEAD_MISMATCH"
    );

    // All-zero ephemeral key
    let mut bad = envelope.clone();
    bad.enc = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA".into();
    assert_eq!(
        hpke.open(&bad, &private, OpenOptions::default())
            .unwrap_err()
            .code(),
        "ECDH_LOW_ORDER"
    );

    // Wrong version
    let mut bad = envelope.clone();
    bad.ver = "2".into();
    assert_eq!(
        hpke.open(&bad, &private, OpenOptions::default())
            .unwrap_err()
            .code(),
        "INVALID_ENVELOPE"
    );

    // Corrupted base64
    let mut bad = envelope.clone();
    bad.ct = "!!!".into();
    assert_eq!(
        hpke.open(&bad, &private, OpenOptions::default())
            .unwrap_err()
            .code(),
        "INVALID_ENVELOPE"
    );

    // Flipped ciphertext byte fails authentication
    let mut bad = envelope.clone();
    let mut ct = bad.ct.into_bytes();
    ct[0] = if ct[0] == b'A' { b'B' } else { b'A' };
    bad.ct = String::from_utf8(ct).unwrap();
    assert_eq!(
        hpke.open(&bad, &private, OpenOptions::default())
            .unwrap_err()
            .code(),
        "AAD_MISMATCH"
    );
}

#[test]
fn wrong_recipient_cannot_open() {
    let hpke = create_hpke("myapp").unwrap();
    let (public, _) = generate_keypair();
    let (_, other_private) = generate_keypair();
    let transport =
        SecureTransport::new(TransportKind::OtherRequest, obj(json!({"a": 1})), None, vec![])
            .unwrap();
    let (envelope, _) = hpke.seal("kid1", &public, &transport, None).unwrap();

    let err = hpke
        .open(&envelope, &other_private, OpenOptions::default())
        .unwrap_err();
    assert_eq!(err.code(), "AAD_MISMATCH");
}

#[test]
fn seeded_seal_is_deterministic() {
    let hpke = create_hpke("myapp").unwrap();
    let (public, private) = generate_keypair();
    let transport = SecureTransport::new(
        TransportKind::Payment,
        obj(json!({"payload": {"invoiceId": "inv_1"}})),
        None,
        vec![],
    )
    .unwrap();

    let seed = [11u8; 32];
    let (envelope_a, _) = hpke
        .seal_with_ephemeral_seed("kid1", &public, &transport, None, seed)
        .unwrap();
    let (envelope_b, _) = hpke
        .seal_with_ephemeral_seed("kid1", &public, &transport, None, seed)
        .unwrap();
    assert_eq!(envelope_a, envelope_b);

    let opened = hpke
        .open(&envelope_a, &private, OpenOptions::default())
        .unwrap();
    assert_eq!(opened.plaintext, b"{}");
}

#[test]
fn envelope_survives_json_wire_trip() {
    let hpke = create_hpke("myapp").unwrap();
    let (public, private) = generate_keypair();
    let transport = SecureTransport::new(
        TransportKind::OtherResponse,
        obj(json!({"result": [1, 2, 3]})),
        Some(200),
        vec![],
    )
    .unwrap();
    let (envelope, _) = hpke.seal("kid1", &public, &transport, None).unwrap();

    let wire = serde_json::to_string(&envelope).unwrap();
    let parsed: x402_hpke::Envelope = serde_json::from_str(&wire).unwrap();
    let opened = hpke.open(&parsed, &private, OpenOptions::default()).unwrap();
    assert_eq!(opened.body.get("result"), Some(&json!([1, 2, 3])));
}

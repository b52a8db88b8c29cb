//! Envelopes and session messages through the JSON wire format.

use std::time::{Duration, SystemTime};
use vettid_crypto_core::envelope::{decrypt_from, encrypt_to, GenericToEnclave};
use vettid_crypto_core::primitives::agreement::generate_agreement_keypair;
use vettid_crypto_core::session::SessionHandshake;
use vettid_crypto_core::wire::{Base64Style, WireBundle};

#[test]
fn envelope_survives_json_in_both_styles() {
    let enclave = generate_agreement_keypair();
    for style in [Base64Style::Padded, Base64Style::Unpadded] {
        let env = encrypt_to::<GenericToEnclave>(b"over the wire", enclave.public.as_bytes())
            .unwrap();
        let json = WireBundle::from_envelope(&env, style).to_json().unwrap();
        let back = WireBundle::from_json(&json).unwrap().to_envelope().unwrap();
        let pt = decrypt_from::<GenericToEnclave>(&back, &enclave.private).unwrap();
        assert_eq!(pt.expose(), b"over the wire");
    }
}

#[test]
fn session_message_survives_json() {
    let expires_at = SystemTime::now() + Duration::from_secs(60);
    let a = SessionHandshake::new();
    let b = SessionHandshake::new();
    let (a_pk, b_pk) = (a.public_key(), b.public_key());
    let a = a.complete("wire-1", b_pk.as_bytes(), expires_at).unwrap();
    let b = b.complete("wire-1", a_pk.as_bytes(), expires_at).unwrap();

    let msg = a.encrypt(b"{\"op\":\"unlock\"}").unwrap();
    let json = WireBundle::from_session_message(&msg, Base64Style::Padded)
        .to_json()
        .unwrap();
    assert!(json.contains("\"session_id\":\"wire-1\""));
    assert!(!json.contains("ephemeral_public_key"));

    let received = WireBundle::from_json(&json).unwrap().to_session_message().unwrap();
    assert_eq!(b.decrypt(&received).unwrap().expose(), b"{\"op\":\"unlock\"}");
}

//! Session establishment and messaging between two independent sides.

use std::time::{Duration, SystemTime};
use vettid_crypto_core::primitives::agreement::generate_agreement_keypair;
use vettid_crypto_core::session::{Session, SessionHandshake};
use vettid_crypto_core::CryptoError;

fn established(id: &str) -> (Session, Session) {
    let expires_at = SystemTime::now() + Duration::from_secs(600);
    let client = SessionHandshake::new();
    let server = generate_agreement_keypair();
    let client_pk = client.public_key();
    let server_pk = server.public;

    let client = client
        .complete(id, server_pk.as_bytes(), expires_at)
        .unwrap();
    let server = Session::from_key_exchange(
        id,
        server.private,
        server_pk,
        client_pk.as_bytes(),
        expires_at,
    )
    .unwrap();
    (client, server)
}

#[test]
fn many_messages_both_directions() {
    let (client, server) = established("sess-many");
    for i in 0u32..50 {
        let up = client.encrypt(&i.to_le_bytes()).unwrap();
        assert_eq!(server.decrypt(&up).unwrap().expose(), i.to_le_bytes());
        let down = server.encrypt(&(i * 2).to_le_bytes()).unwrap();
        assert_eq!(client.decrypt(&down).unwrap().expose(), (i * 2).to_le_bytes());
    }
}

/// Two sessions that happen to share a key: a message from one must still be
/// refused by the other because of its id, before any decryption happens.
#[test]
fn decryptable_foreign_message_is_still_mismatch() {
    let expires_at = SystemTime::now() + Duration::from_secs(600);
    let ours = generate_agreement_keypair();
    let peer = generate_agreement_keypair();
    let ours_raw = *ours.private.expose();
    let peer_raw = *peer.private.expose();

    let session_a = Session::from_key_exchange(
        "sess-A",
        vettid_crypto_core::AgreementPrivateKey::from_slice(&ours_raw).unwrap(),
        ours.public,
        peer.public.as_bytes(),
        expires_at,
    )
    .unwrap();
    let session_b = Session::from_key_exchange(
        "sess-B",
        vettid_crypto_core::AgreementPrivateKey::from_slice(&ours_raw).unwrap(),
        ours.public,
        peer.public.as_bytes(),
        expires_at,
    )
    .unwrap();
    let sender_b = Session::from_key_exchange(
        "sess-B",
        vettid_crypto_core::AgreementPrivateKey::from_slice(&peer_raw).unwrap(),
        peer.public,
        ours.public.as_bytes(),
        expires_at,
    )
    .unwrap();

    let for_b = sender_b.encrypt(b"meant for B").unwrap();
    assert_eq!(session_b.decrypt(&for_b).unwrap().expose(), b"meant for B");
    assert_eq!(session_a.decrypt(&for_b).unwrap_err(), CryptoError::SessionMismatch);

    // Relabelling the message does not help: the id is bound as associated data.
    let mut relabelled = for_b;
    relabelled.session_id = "sess-A".into();
    assert_eq!(
        session_a.decrypt(&relabelled).unwrap_err(),
        CryptoError::AuthenticationFailure
    );
}

#[test]
fn tampered_message_fails_authentication() {
    let (client, server) = established("sess-tamper");
    let mut msg = client.encrypt(b"payload").unwrap();
    msg.ciphertext[0] ^= 1;
    assert_eq!(server.decrypt(&msg).unwrap_err(), CryptoError::AuthenticationFailure);

    let mut msg = client.encrypt(b"payload").unwrap();
    msg.nonce[23] ^= 1;
    assert_eq!(server.decrypt(&msg).unwrap_err(), CryptoError::AuthenticationFailure);
}

#[test]
fn session_expires_at_exact_instant() {
    let (client, server) = established("sess-exp");
    let msg = client.encrypt(b"x").unwrap();
    let at = server.expires_at();
    assert!(server.decrypt_at(&msg, at - Duration::from_millis(1)).is_ok());
    assert_eq!(server.decrypt_at(&msg, at).unwrap_err(), CryptoError::SessionExpired);
    assert_eq!(client.encrypt_at(b"y", at).unwrap_err(), CryptoError::SessionExpired);
    client.clear();
    server.clear();
}

//! ChaCha quarter round, HChaCha20 and XChaCha20-Poly1305 vectors.
//!
//! - RFC 8439 §2.1.1 quarter round (catches a rotate-by-4 slip in the last step)
//! - draft-irtf-cfrg-xchacha-03 §2.2.1 HChaCha20
//! - draft-irtf-cfrg-xchacha-03 §A.3.1 XChaCha20-Poly1305 AEAD

use super::hex_to_bytes;
use vettid_crypto_core::primitives::hchacha::{hchacha20, quarter_round};
use vettid_crypto_core::primitives::xchacha::{xchacha_open, xchacha_seal};

const SUNSCREEN: &[u8] = b"Ladies and Gentlemen of the class of '99: If I could offer you \
only one tip for the future, sunscreen would be it.";

#[test]
fn rfc8439_quarter_round() {
    let mut state = [0u32; 16];
    state[0] = 0x1111_1111;
    state[1] = 0x0102_0304;
    state[2] = 0x9b8d_6f43;
    state[3] = 0x0123_4567;
    quarter_round(&mut state, 0, 1, 2, 3);
    assert_eq!(state[0], 0xea2a_92f4);
    assert_eq!(state[1], 0xcb1c_f8ce);
    assert_eq!(state[2], 0x4581_472e);
    assert_eq!(state[3], 0x5881_c4bb);
}

#[test]
fn hchacha20_draft_2_2_1() {
    let key: [u8; 32] = core::array::from_fn(|i| i as u8);
    let nonce: [u8; 16] = hex_to_bytes("000000090000004a0000000031415927")
        .try_into()
        .unwrap();
    let subkey = hchacha20(&key, &nonce);
    assert_eq!(
        subkey.expose().as_slice(),
        hex_to_bytes("82413b4227b27bfed30e42508a877d73a0f9e4d58a74a853c12ec41326d3ecdc")
    );
}

#[test]
fn xchacha20_poly1305_draft_a_3_1() {
    let key: Vec<u8> = (0x80u8..=0x9f).collect();
    let nonce: Vec<u8> = (0x40u8..=0x57).collect();
    let aad = hex_to_bytes("50515253c0c1c2c3c4c5c6c7");
    assert_eq!(SUNSCREEN.len(), 114);

    let expected_ct = hex_to_bytes(
        "bd6d179d3e83d43b9576579493c0e939572a1700252bfaccbed2902c21396cbb\
         731c7f1b0b4aa6440bf3a82f4eda7e39ae64c6708c54c216cb96b72e1213b452\
         2f8c9ba40db5d945b11b69b982c1bb9e3f3fac2bc369488f76b2383565d3fff9\
         21f9664c97637da9768812f615c68b13b52e",
    );
    let expected_tag = hex_to_bytes("c0875924c1c7987947deafd8780acf49");

    let sealed = xchacha_seal(&key, &nonce, SUNSCREEN, &aad).unwrap();
    let (ct, tag) = sealed.split_at(SUNSCREEN.len());
    assert_eq!(ct, expected_ct.as_slice(), "ciphertext mismatch");
    assert_eq!(tag, expected_tag.as_slice(), "tag mismatch");

    let opened = xchacha_open(&key, &nonce, &sealed, &aad).unwrap();
    assert_eq!(opened.expose(), SUNSCREEN);
}

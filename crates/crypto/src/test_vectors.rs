//! Test vectors for digest and signature stability.
//!
//! These test vectors ensure that hashing and signing behavior is stable
//! across different builds and environments:
//! - SHA-256 known answers (FIPS 180-2 examples plus the CLI smoke input)
//! - PKCS#1 v1.5 signatures that are reproducible for a fixed key and digest

use crate::keys::RsaKeyPair;
use crate::signing::{sha256_digest, verify, MessageSigner, SigningRequest};

/// A known-answer test vector for SHA-256.
#[derive(Debug, Clone)]
pub struct DigestTestVector {
    pub name: &'static str,
    pub input: &'static str,
    pub expected_digest_hex: &'static str,
}

/// Get the test vectors.
pub fn get_test_vectors() -> Vec<DigestTestVector> {
    vec![
        DigestTestVector {
            name: "vector_1_empty",
            input: "",
            expected_digest_hex: "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
        },
        DigestTestVector {
            name: "vector_2_abc",
            input: "abc",
            expected_digest_hex: "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
        },
        DigestTestVector {
            name: "vector_3_two_blocks",
            input: "abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq",
            expected_digest_hex: "248d6a61d20638b8e5c026930c3e6039a33ce45964ff2167f6ecedd419db06c1",
        },
        DigestTestVector {
            name: "vector_4_hello_world",
            input: "hello world",
            expected_digest_hex: "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;

    #[test]
    fn test_digest_vectors() {
        for vector in get_test_vectors() {
            let digest = sha256_digest(vector.input.as_bytes());
            assert_eq!(
                hex::encode(digest),
                vector.expected_digest_hex,
                "digest mismatch for {}",
                vector.name
            );

            let request = SigningRequest::new(vector.input).unwrap();
            assert_eq!(request.digest(), digest, "request digest mismatch for {}", vector.name);
        }
    }

    #[test]
    fn test_signatures_reproducible_for_fixed_key() {
        // PKCS#1 v1.5 padding is deterministic; randomness only blinds the private operation.
        let keypair = RsaKeyPair::generate_with_bits(&mut OsRng, 2048).unwrap();
        let signer = MessageSigner::new(keypair.private_key().clone());

        for vector in get_test_vectors() {
            let request = SigningRequest::new(vector.input).unwrap();
            let first = signer.sign(&request).unwrap();
            let second = signer.sign(&request).unwrap();

            assert_eq!(first, second, "signature changed for {}", vector.name);
            verify(keypair.public_key(), vector.input.as_bytes(), &first).unwrap();
        }
    }
}

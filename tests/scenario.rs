use sharelock::boundary::{self, Boundary};
use sharelock::{encoding, Config, Error, KdfParams, Protector};

fn config() -> Config {
    Config::new(KdfParams {
        memory_cost: 256,
        time_cost: 1,
        parallelism: 1,
    })
}

#[test]
fn correct_horse_three_of_five() {
    let protector = Protector::new(config());

    let protected = protector.encrypt("correct-horse", b"hello world").unwrap();
    let shares = protector.generate_shares(&protected.key, 3, 5).unwrap();

    assert_eq!(shares.len(), 5);
    for (i, a) in shares.iter().enumerate() {
        for b in &shares[i + 1..] {
            assert_ne!(a, b);
        }
    }

    for a in 0..5 {
        for b in (a + 1)..5 {
            for c in (b + 1)..5 {
                let key = protector
                    .recover_key(&[&shares[a], &shares[b], &shares[c]])
                    .unwrap();
                assert_eq!(key, protected.key);
                assert_eq!(
                    protector.decrypt(&key, &protected.ciphertext).unwrap(),
                    b"hello world"
                );
            }
        }
    }
}

#[test]
fn truncated_share_is_malformed() {
    let protector = Protector::new(config());
    let protected = protector.encrypt("correct-horse", b"hello world").unwrap();
    let mut shares = protector.generate_shares(&protected.key, 3, 5).unwrap();
    shares.truncate(3);
    shares[0].pop();

    assert!(matches!(
        protector.recover_key(&shares),
        Err(Error::MalformedShare { index: 0, .. })
    ));
}

#[test]
fn two_of_three_threshold_shares_give_wrong_key() {
    let protector = Protector::new(config());
    let protected = protector.encrypt("correct-horse", b"hello world").unwrap();
    let shares = protector.generate_shares(&protected.key, 3, 5).unwrap();

    let key = protector.recover_key(&shares[..2]).unwrap();
    assert_ne!(key, protected.key);
    assert_eq!(
        protector.decrypt(&key, &protected.ciphertext),
        Err(Error::AuthenticationFailure)
    );
}

#[test]
fn bounds_are_checked_before_splitting() {
    let protector = Protector::new(config());
    let protected = protector.encrypt("correct-horse", b"hello world").unwrap();

    for (threshold, total) in [(1, 5), (3, 2), (2, 2), (6, 5)] {
        assert!(matches!(
            protector.generate_shares(&protected.key, threshold, total),
            Err(Error::InvalidInput(_))
        ));
    }
}

#[test]
fn tampered_ciphertext_text_is_rejected() {
    let protector = Protector::new(config());
    let protected = protector.encrypt("correct-horse", b"hello world").unwrap();

    let mut bytes = encoding::decode_bytes(&protected.ciphertext).unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0x80;
    let tampered = encoding::encode_bytes(&bytes);

    assert_eq!(
        protector.decrypt(&protected.key, &tampered),
        Err(Error::AuthenticationFailure)
    );
}

#[test]
fn boundary_flow_with_keys_file() {
    let boundary = Boundary::new(config());
    let file_name = boundary::encrypted_file_name("notes.txt");
    assert_eq!(file_name, "notes.txt.aes");

    let out = boundary.encrypt("correct-horse", b"hello world");
    let (key, ciphertext) = (&out[0], &out[1]);

    let shares = boundary.generate_shares(key, 3, 5);
    let keys_file = format!("{}\n{}\n\n{}\n", shares[4], shares[1], shares[3]);
    let recovered = boundary.recover_key_from_text(&keys_file);
    assert!(!boundary::is_failure(&recovered));
    assert_eq!(&recovered, key);

    let plaintext = boundary.decrypt(&recovered, ciphertext);
    assert_eq!(encoding::decode_bytes(&plaintext).unwrap(), b"hello world");
    assert_eq!(boundary::decrypted_file_name(&file_name), "notes.txt");

    let wrong = boundary.decrypt(&shares[0], ciphertext);
    assert!(boundary::is_failure(&wrong));
}

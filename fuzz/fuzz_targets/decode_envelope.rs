#![no_main]
use libfuzzer_sys::fuzz_target;
use sharelock::{aead, encoding, MasterKey, KEY_LENGTH};

fuzz_target!(|data: &str| {
    if let Ok(envelope) = encoding::decode_envelope(data) {
        let key = MasterKey::from_bytes([0u8; KEY_LENGTH]);
        let _ = aead::open(&key, &envelope, b"");
    }
});

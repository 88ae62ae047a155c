#![no_main]
use libfuzzer_sys::fuzz_target;
use sharelock::encoding;

fuzz_target!(|data: &str| {
    if let Ok(share) = encoding::decode_share(data, 0) {
        assert_eq!(share.len(), sharelock::KEY_LENGTH);
        assert_ne!(share.index(), 0);
    }
});

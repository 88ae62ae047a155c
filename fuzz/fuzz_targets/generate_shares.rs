#![no_main]
use libfuzzer_sys::fuzz_target;

use arbitrary::Arbitrary;
use sharelock::{recover, SecretSharing};

#[derive(Debug, Arbitrary)]
struct Parameters {
    pub threshold: usize,
    pub n_shares: usize,
    pub secret: Vec<u8>,
}

fuzz_target!(|params: Parameters| {
    let Ok(sss) = SecretSharing::new(params.threshold, params.n_shares) else {
        return;
    };
    let Ok(shares) = sss.split(&params.secret) else {
        return;
    };

    assert_eq!(shares.len(), params.n_shares);
    let secret = recover(&shares[..params.threshold]).unwrap();
    assert_eq!(secret, params.secret);
});

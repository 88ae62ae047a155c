#![no_main]
use libfuzzer_sys::fuzz_target;

use arbitrary::Arbitrary;
use sharelock::{recover, Share};

#[derive(Debug, Arbitrary)]
struct Parameters {
    pub shares: Vec<Share>,
}

fuzz_target!(|params: Parameters| {
    let _secret = recover(&params.shares);
});

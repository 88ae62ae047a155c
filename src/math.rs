// A module which contains necessary algorithms to compute Shamir's shares and recover secrets

use rand::Rng;

use super::field::GF256;
use super::share::Share;

// Finds the [root of the Lagrange polynomial](https://en.wikipedia.org/wiki/Shamir%27s_Secret_Sharing#Computationally_efficient_approach).
// The expected `shares` argument format is the same as the output by the `get_evaluator´ function.
// Each share carries its `x` and a vector of `y`, where each element corresponds to one of the secret's bytes.
// Callers guarantee that the `x` values are distinct and non-zero and that all `y` vectors have the same length.
pub fn interpolate(shares: &[Share]) -> Vec<u8> {
    (0..shares[0].y.len())
        .map(|s| {
            shares
                .iter()
                .map(|s_i| {
                    shares
                        .iter()
                        .filter(|s_j| s_j.x != s_i.x)
                        .map(|s_j| s_j.x / (s_j.x - s_i.x))
                        .product::<GF256>()
                        * s_i.y[s]
                })
                .sum::<GF256>()
                .0
        })
        .collect()
}

// Generates `k` polynomial coefficients, being the last one `s` and the others drawn uniformly from the whole field.
// Coefficient degrees go from higher to lower in the returned vector order.
pub fn random_polynomial<R: Rng>(s: GF256, k: u8, rng: &mut R) -> Vec<GF256> {
    let k = k as usize;
    let mut poly = Vec::with_capacity(k);

    for _ in 1..k {
        poly.push(GF256(rng.random::<u8>()));
    }
    poly.push(s);

    poly
}

// Returns an iterator over the points of the `polys` polynomials passed as argument.
// Each item of the iterator is a share `(x, [f_1(x), f_2(x)..])` where each `f_i` is the result for the ith polynomial.
// Each polynomial corresponds to one byte of the original secret.
// The iterator will start at `x = 1` and end at `x = 255`.
pub fn get_evaluator(polys: &[Vec<GF256>]) -> impl Iterator<Item = Share> + '_ {
    (1..=u8::MAX).map(GF256).map(move |x| Share {
        x,
        y: polys
            .iter()
            .map(|p| p.iter().fold(GF256::ZERO, |acc, c| acc * x + *c))
            .collect(),
    })
}

use rand::Rng;

/// Word pool for randomized token names.
pub const TOKEN_WORDS: [&str; 36] = [
    "Alpha", "Beta", "Gamma", "Delta", "Epsilon", "Zeta", "Theta", "Lambda", "Sigma", "Omicron",
    "Nova", "Quantum", "Astro", "Neon", "Fusion", "Solar", "Lunar", "Celestial", "Orbit", "Vortex",
    "Nebula", "Cosmic", "Hyper", "Galactic", "Phoenix", "Eclipse", "Infinity", "Zenith",
    "Ethereal", "Genesis", "Aether", "Horizon", "Radiance", "Titan", "Velocity", "Pulsar",
];

const DECIMALS_CHOICES: [u8; 4] = [6, 8, 9, 18];
const SUPPLY_CHOICES: [u64; 4] = [1_000_000, 2_000_000, 3_000_000, 400_000];

/// Constructor parameters for one token deployment. Generated fresh per
/// deployment and discarded afterwards; never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Raw supply; the contract scales it by `10^decimals`.
    pub total_supply: u64,
}

impl TokenMetadata {
    pub fn random() -> Self {
        Self::random_with(&mut rand::thread_rng())
    }

    pub fn random_with(rng: &mut impl Rng) -> Self {
        let name = format!("{} {} {}", pick_word(rng), pick_word(rng), pick_word(rng));
        let symbol = (0..3)
            .map(|_| rng.gen_range(b'A'..=b'Z') as char)
            .collect::<String>();
        Self {
            name,
            symbol,
            decimals: DECIMALS_CHOICES[rng.gen_range(0..DECIMALS_CHOICES.len())],
            total_supply: SUPPLY_CHOICES[rng.gen_range(0..SUPPLY_CHOICES.len())],
        }
    }
}

fn pick_word(rng: &mut impl Rng) -> &'static str {
    TOKEN_WORDS[rng.gen_range(0..TOKEN_WORDS.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn metadata_stays_within_choice_sets() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let meta = TokenMetadata::random_with(&mut rng);
            let words = meta.name.split(' ').collect::<Vec<_>>();
            assert_eq!(words.len(), 3);
            for word in words {
                assert!(TOKEN_WORDS.contains(&word), "unexpected word {word}");
            }
            assert_eq!(meta.symbol.len(), 3);
            assert!(meta.symbol.chars().all(|c| c.is_ascii_uppercase()));
            assert!(DECIMALS_CHOICES.contains(&meta.decimals));
            assert!(SUPPLY_CHOICES.contains(&meta.total_supply));
        }
    }

    #[test]
    fn seeded_rngs_are_deterministic() {
        let a = TokenMetadata::random_with(&mut StdRng::seed_from_u64(1));
        let b = TokenMetadata::random_with(&mut StdRng::seed_from_u64(1));
        assert_eq!(a, b);
    }
}

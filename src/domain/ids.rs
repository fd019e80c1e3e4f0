//! Record identifiers of the form `<PREFIX>-<6 base-36 chars>`

use rand::Rng;

const ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const SUFFIX_LEN: usize = 6;

pub fn generate<R: Rng + ?Sized>(prefix: &str, rng: &mut R) -> String {
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    format!("{}-{}", prefix, suffix)
}

/// Generates ids until one is not taken
pub fn generate_unique<R, F>(prefix: &str, rng: &mut R, taken: F) -> String
where
    R: Rng + ?Sized,
    F: Fn(&str) -> bool,
{
    loop {
        let id = generate(prefix, rng);
        if !taken(&id) {
            return id;
        }
        log::debug!("Id collision on {}, regenerating", id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_id_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let id = generate("QUO", &mut rng);
        let (prefix, suffix) = id.split_once('-').unwrap();
        assert_eq!(prefix, "QUO");
        assert_eq!(suffix.len(), 6);
        assert!(suffix.bytes().all(|b| ALPHABET.contains(&b)));
    }

    #[test]
    fn test_generate_unique_skips_taken() {
        let mut probe = StdRng::seed_from_u64(42);
        let first = generate("ENQ", &mut probe);

        let mut rng = StdRng::seed_from_u64(42);
        let id = generate_unique("ENQ", &mut rng, |candidate| candidate == first);
        assert_ne!(id, first);
    }
}

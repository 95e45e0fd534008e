//! Numeric and code-pattern generators.

use datagen_core::round_cents;
use rand::Rng;

/// Random integer in `[min, max]`.
pub fn generate_int_range<R: Rng>(rng: &mut R, min: i64, max: i64) -> i64 {
    rng.random_range(min..=max)
}

/// Random amount in `[min, max]`, rounded to cents.
pub fn generate_money<R: Rng>(rng: &mut R, min: f64, max: f64) -> f64 {
    round_cents(rng.random_range(min..=max))
}

/// Stock-keeping unit: three uppercase letters, a dash, six digits.
pub fn generate_sku<R: Rng>(rng: &mut R) -> String {
    let letters: String = (0..3)
        .map(|_| char::from(b'A' + rng.random_range(0..26u8)))
        .collect();
    let digits: u32 = rng.random_range(100_000..=999_999);
    format!("{letters}-{digits}")
}

/// `ORD-` followed by six digits.
pub fn generate_order_number<R: Rng>(rng: &mut R) -> String {
    let digits: u32 = rng.random_range(100_000..=999_999);
    format!("ORD-{digits}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_int_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let value = generate_int_range(&mut rng, 10, 20);
            assert!((10..=20).contains(&value));
        }
    }

    #[test]
    fn test_generate_money_has_two_decimals() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let value = generate_money(&mut rng, 10.0, 500.0);
            assert!((10.0..=500.0).contains(&value));
            assert_eq!(round_cents(value), value);
        }
    }

    #[test]
    fn test_generate_sku_pattern() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let sku = generate_sku(&mut rng);
            let (letters, digits) = sku.split_once('-').unwrap();
            assert_eq!(letters.len(), 3);
            assert!(letters.chars().all(|c| c.is_ascii_uppercase()));
            assert_eq!(digits.len(), 6);
            assert!(digits.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_generate_order_number_pattern() {
        let mut rng = StdRng::seed_from_u64(42);
        let number = generate_order_number(&mut rng);
        let digits = number.strip_prefix("ORD-").unwrap();
        assert_eq!(digits.len(), 6);
        assert!(digits.chars().all(|c| c.is_ascii_digit()));
    }
}

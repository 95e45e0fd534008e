//! Person and contact field generators.

use super::pick;
use super::pools::EMAIL_DOMAINS;
use rand::Rng;

/// `{first}.{last}@{domain}` with a lower-cased local part.
pub fn generate_email<R: Rng>(rng: &mut R, first: &str, last: &str) -> String {
    let domain = pick(rng, EMAIL_DOMAINS);
    format!("{}.{}@{domain}", first.to_lowercase(), last.to_lowercase())
}

/// `{first}.{last}{1..=99}`, lower-cased.
pub fn generate_username<R: Rng>(rng: &mut R, first: &str, last: &str) -> String {
    let suffix: u8 = rng.random_range(1..=99);
    format!("{}.{}{suffix}", first.to_lowercase(), last.to_lowercase())
}

/// `(AAA) EEE-NNNN` with area and exchange codes kept out of the reserved
/// 000-199 range.
pub fn generate_phone<R: Rng>(rng: &mut R) -> String {
    let area: u16 = rng.random_range(200..=999);
    let exchange: u16 = rng.random_range(200..=999);
    let subscriber: u16 = rng.random_range(1000..=9999);
    format!("({area}) {exchange}-{subscriber}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_email() {
        let mut rng = StdRng::seed_from_u64(42);
        let email = generate_email(&mut rng, "Mary", "O'Neil");

        let (local, domain) = email.split_once('@').unwrap();
        assert_eq!(local, "mary.o'neil");
        assert!(EMAIL_DOMAINS.contains(&domain));
    }

    #[test]
    fn test_generate_username() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let username = generate_username(&mut rng, "John", "Smith");
            let suffix = username.strip_prefix("john.smith").unwrap();
            let n: u8 = suffix.parse().unwrap();
            assert!((1..=99).contains(&n));
        }
    }

    #[test]
    fn test_generate_phone_format() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let phone = generate_phone(&mut rng);
            assert_eq!(phone.len(), 14, "{phone}");
            assert_eq!(&phone[0..1], "(");
            assert_eq!(&phone[4..6], ") ");
            assert_eq!(&phone[9..10], "-");

            let area: u16 = phone[1..4].parse().unwrap();
            let exchange: u16 = phone[6..9].parse().unwrap();
            let subscriber: u16 = phone[10..14].parse().unwrap();
            assert!((200..=999).contains(&area));
            assert!((200..=999).contains(&exchange));
            assert!((1000..=9999).contains(&subscriber));
        }
    }
}

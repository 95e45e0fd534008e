//! UUID value generator.

use rand::Rng;
use uuid::Uuid;

/// Generate a random UUID v4 from the provided RNG, in canonical
/// 8-4-4-4-12 hyphenated lower-case form.
pub fn generate_uuid_v4<R: Rng>(rng: &mut R) -> String {
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes);

    bytes[6] = (bytes[6] & 0x0f) | 0x40; // Version 4
    bytes[8] = (bytes[8] & 0x3f) | 0x80; // Variant RFC 4122

    Uuid::from_bytes(bytes).hyphenated().to_string()
}

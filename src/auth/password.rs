use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;

const SCHEME: &str = "pbkdf2-sha256";
pub const DEFAULT_ROUNDS: u32 = 10_000;
const SALT_LEN: usize = 16;
const KEY_LEN: usize = 32;

fn derive(password: &str, salt: &[u8], rounds: u32) -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, rounds, &mut key);
    key
}

/// Hashes `password` with a fresh random salt.
///
/// Output format: `pbkdf2-sha256$<rounds>$<salt b64>$<key b64>`.
#[must_use]
pub fn hash_password(password: &str) -> String {
    hash_with_rounds(password, DEFAULT_ROUNDS)
}

#[must_use]
pub fn hash_with_rounds(password: &str, rounds: u32) -> String {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    let key = derive(password, &salt, rounds);
    format!(
        "{SCHEME}${rounds}${}${}",
        BASE64.encode(salt),
        BASE64.encode(key)
    )
}

/// False for a wrong password and for any hash this module did not produce.
#[must_use]
pub fn verify_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.split('$');
    let (Some(scheme), Some(rounds), Some(salt), Some(key), None) = (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) else {
        return false;
    };
    if scheme != SCHEME {
        return false;
    }
    let Ok(rounds) = rounds.parse::<u32>() else {
        return false;
    };
    let (Ok(salt), Ok(expected)) = (BASE64.decode(salt), BASE64.decode(key)) else {
        return false;
    };
    if rounds == 0 || expected.len() != KEY_LEN {
        return false;
    }
    let actual = derive(password, &salt, rounds);
    // constant time over the key length
    actual
        .iter()
        .zip(expected.iter())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

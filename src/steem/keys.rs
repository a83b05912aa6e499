//! Steem key handling: WIF private keys, password-derived role keys and
//! `STM`-prefixed public keys.

use super::auth::{AuthError, KeyRole};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::SecretKey;
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Address prefix of main-network public keys
pub const PUBLIC_KEY_PREFIX: &str = "STM";

/// Version byte of an uncompressed WIF private key
const WIF_VERSION: u8 = 0x80;

impl KeyRole {
    pub const ALL: [KeyRole; 4] = [KeyRole::Owner, KeyRole::Active, KeyRole::Posting, KeyRole::Memo];

    /// Role name mixed into the password seed
    pub fn as_str(self) -> &'static str {
        match self {
            KeyRole::Owner => "owner",
            KeyRole::Active => "active",
            KeyRole::Posting => "posting",
            KeyRole::Memo => "memo",
        }
    }
}

fn double_sha256(data: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha256::digest(Sha256::digest(data)));
    out
}

fn invalid_key() -> AuthError {
    AuthError::InvalidCredentials("malformed private key".to_string())
}

/// A secp256k1 private key. Its `Debug` output never shows the scalar.
#[derive(Clone)]
pub struct PrivateKey(SecretKey);

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PrivateKey").field(&self.public_key()).finish()
    }
}

impl PrivateKey {
    /// Decode a WIF key: `0x80 || key || sha256d(0x80 || key)[..4]`, base58.
    pub fn from_wif(wif: &str) -> Result<Self, AuthError> {
        let bytes = bs58::decode(wif.trim()).into_vec().map_err(|_| invalid_key())?;
        if bytes.len() != 37 || bytes[0] != WIF_VERSION {
            return Err(invalid_key());
        }
        let (payload, checksum) = bytes.split_at(33);
        if double_sha256(payload)[..4] != *checksum {
            return Err(AuthError::InvalidCredentials(
                "private key checksum mismatch".to_string(),
            ));
        }
        SecretKey::from_slice(&payload[1..])
            .map(Self)
            .map_err(|_| invalid_key())
    }

    /// The role key derived from a master password:
    /// `sha256(username + role + password)`, whitespace runs collapsed.
    pub fn from_login(username: &str, role: KeyRole, password: &str) -> Result<Self, AuthError> {
        let seed = format!("{}{}{}", username, role.as_str(), password);
        let brain_key = seed.split_whitespace().collect::<Vec<_>>().join(" ");
        let digest = Sha256::digest(brain_key.as_bytes());
        SecretKey::from_slice(&digest)
            .map(Self)
            .map_err(|_| AuthError::InvalidCredentials("unusable password".to_string()))
    }

    pub fn to_wif(&self) -> String {
        let mut payload = Vec::with_capacity(37);
        payload.push(WIF_VERSION);
        payload.extend_from_slice(&self.0.to_bytes());
        let checksum = double_sha256(&payload);
        payload.extend_from_slice(&checksum[..4]);
        bs58::encode(payload).into_string()
    }

    /// `STM` + base58(compressed point || ripemd160(point)[..4])
    pub fn public_key(&self) -> String {
        let point = self.0.public_key().to_encoded_point(true);
        let mut bytes = point.as_bytes().to_vec();
        let checksum = Ripemd160::digest(&bytes);
        bytes.extend_from_slice(&checksum[..4]);
        format!("{}{}", PUBLIC_KEY_PREFIX, bs58::encode(bytes).into_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_key() -> PrivateKey {
        PrivateKey::from_login("alice", KeyRole::Posting, "correct horse battery staple").unwrap()
    }

    #[test]
    fn test_wif_round_trip_keeps_public_key() {
        let key = sample_key();
        let wif = key.to_wif();
        assert!(wif.starts_with('5'));
        assert_eq!(wif.len(), 51);
        let decoded = PrivateKey::from_wif(&wif).unwrap();
        assert_eq!(decoded.public_key(), key.public_key());
    }

    #[test]
    fn test_wif_with_bad_checksum_is_rejected() {
        let wif = sample_key().to_wif();
        let mut chars: Vec<char> = wif.chars().collect();
        let last = chars.len() - 1;
        chars[last] = if chars[last] == '1' { '2' } else { '1' };
        let tampered: String = chars.into_iter().collect();
        assert!(matches!(
            PrivateKey::from_wif(&tampered),
            Err(AuthError::InvalidCredentials(_))
        ));
        assert!(PrivateKey::from_wif("not-a-key").is_err());
    }

    #[test]
    fn test_public_key_shape_and_checksum() {
        let public = sample_key().public_key();
        assert!(public.starts_with(PUBLIC_KEY_PREFIX));
        let bytes = bs58::decode(&public[PUBLIC_KEY_PREFIX.len()..])
            .into_vec()
            .unwrap();
        assert_eq!(bytes.len(), 37);
        assert!(bytes[0] == 0x02 || bytes[0] == 0x03);
        assert_eq!(Ripemd160::digest(&bytes[..33])[..4], bytes[33..]);
    }

    #[test]
    fn test_role_keys_differ_and_are_deterministic() {
        let keys: Vec<String> = KeyRole::ALL
            .iter()
            .map(|role| PrivateKey::from_login("alice", *role, "pw").unwrap().public_key())
            .collect();
        for (i, a) in keys.iter().enumerate() {
            for b in &keys[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(
            PrivateKey::from_login("alice", KeyRole::Owner, "pw").unwrap().public_key(),
            keys[0]
        );
        assert_ne!(
            PrivateKey::from_login("bob", KeyRole::Owner, "pw").unwrap().public_key(),
            keys[0]
        );
    }

    #[test]
    fn test_password_whitespace_is_collapsed() {
        let spaced = PrivateKey::from_login("alice", KeyRole::Active, "two  words\t").unwrap();
        let plain = PrivateKey::from_login("alice", KeyRole::Active, "two words").unwrap();
        assert_eq!(spaced.public_key(), plain.public_key());
    }
}

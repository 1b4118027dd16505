//! Tests for key derivation

use keyforge::crypto::keys::*;
use keyforge::crypto::mnemonic::*;
use keyforge::Error;

const MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

fn slip10_seed() -> Vec<u8> {
    hex::decode("000102030405060708090a0b0c0d0e0f").unwrap()
}

#[test]
fn test_slip10_vector_chain() {
    let seed = slip10_seed();

    let material = derive_from_path_str(&seed, "m/0'/1'/2'/2'/1000000000'").unwrap();
    assert_eq!(
        hex::encode(material.key()),
        "8f94d394a8e8fd6b1bc2f3f49f5c47e385281d5c17e65324b0f62483e37e8793"
    );
    assert_eq!(
        hex::encode(material.chain_code()),
        "68789923a0cac2cd5a29172a475fe9e0fb14cd6adb5ad98a3fa70333e7afa230"
    );
    assert_eq!(
        hex::encode(ed25519::public_key(material.key())),
        "3c24da049451555d51a7014a37337aa4e12d41e485abccfa46b47dfb2af54b7a"
    );
}

#[test]
fn test_stepwise_matches_path() {
    let seed = slip10_seed();

    let mut material = derive_master(&seed).unwrap();
    for index in [0, 1, 2, 2, 1_000_000_000] {
        material = derive_child(&material, index).unwrap();
    }

    let path: DerivationPath = "m/0'/1'/2'/2'/1000000000'".parse().unwrap();
    assert_eq!(derive(&seed, &path).unwrap(), material);
}

#[test]
fn test_hardened_offset_is_idempotent() {
    let master = derive_master(&slip10_seed()).unwrap();

    assert_eq!(
        derive_child(&master, 0).unwrap(),
        derive_child(&master, HARDENED_OFFSET).unwrap()
    );
    assert_eq!(harden(7), harden(harden(7)));
}

#[test]
fn test_ed25519_chain_keys_from_mnemonic() {
    let seed = mnemonic_to_seed(MNEMONIC, None).unwrap();

    let cases = [
        (
            "m/44'/784'/0'/0'/0'",
            "8869cb07178bf67e08d7c4abdf45487dbf379c9a452fcec2836854bf4a3d29b0",
        ),
        (
            "m/44'/637'/0'/0'/0'",
            "cc92c0eaf80206d817f150e21917f797e49cf644a33ac514de3c316baa2f1bf5",
        ),
        (
            "m/44'/501'/0'/0'",
            "37df573b3ac4ad5b522e064e25b63ea16bcbe79d449e81a0268d1047948bb445",
        ),
    ];

    for (path, expected) in cases {
        let material = derive_from_path_str(&seed, path).unwrap();
        assert_eq!(hex::encode(material.key()), expected, "path {}", path);
    }
}

#[test]
fn test_secp256k1_keys_from_mnemonic() {
    let seed = mnemonic_to_seed(MNEMONIC, None).unwrap();

    let path = Bip32Path::parse("m/44'/60'/0'/0/0").unwrap();
    let key = keyforge::crypto::keys::secp256k1::derive_private_key(&seed, &path).unwrap();
    assert_eq!(
        hex::encode(*key),
        "1ab42cc412b618bdea3a599e3c9bae199ebf030895b039e9db1e30dafb12b727"
    );
}

#[test]
fn test_invalid_paths_fail_before_derivation() {
    let seed = slip10_seed();

    for path in ["", "m", "m/", "44'/0'", "m/44", "m/44'/0", "m/-1'", "m/ 1'", "m/1''"] {
        assert!(!is_valid_path(path), "path {:?}", path);
        assert!(
            matches!(
                derive_from_path_str(&seed, path),
                Err(Error::InvalidPathFormat(_))
            ),
            "path {:?}",
            path
        );
    }

    assert!(matches!(
        derive_from_path_str(&seed, "m/2147483648'"),
        Err(Error::InvalidPathSegment(_))
    ));
    assert!(matches!(
        derive_from_path_str(&seed, "m/99999999999'"),
        Err(Error::InvalidPathSegment(_))
    ));
}

#[test]
fn test_mnemonic_generation() {
    let phrase = generate_mnemonic(MnemonicStrength::Words24).unwrap();
    assert_eq!(phrase.split_whitespace().count(), 24);
    assert!(validate_mnemonic(&phrase));
    assert!(!validate_mnemonic("abandon abandon abandon"));
}

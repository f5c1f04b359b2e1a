use pretty_assertions::assert_eq;
use secp256k1::Secp256k1;
use shamir_wallet::core::address::to_checksum_address;
use shamir_wallet::core::bip44::{DerivationPath, ExtendedPrivateKey, ETHEREUM_PATH};
use shamir_wallet::core::key_manager::{derive_account, derive_ethereum_account};
use shamir_wallet::core::WalletError;
use test_case::test_case;

const HARDHAT: &str = "test test test test test test test test test test test junk";
const ABANDON_ABOUT: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

#[test_case(HARDHAT, "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266", "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80" ; "hardhat account 0")]
#[test_case(ABANDON_ABOUT, "0x9858EfFD232B4033E47d90003D41EC34EcaEda94", "0x1ab42cc412b618bdea3a599e3c9bae199ebf030895b039e9db1e30dafb12b727" ; "abandon about account 0")]
fn test_ethereum_account_vectors(phrase: &str, address: &str, private_key: &str) {
    let account = derive_ethereum_account(phrase, "").unwrap();
    assert_eq!(account.address(), address);
    assert_eq!(account.private_key_hex().unwrap().as_str(), private_key);
    assert_eq!(account.path().to_string(), ETHEREUM_PATH);
}

#[test]
fn test_hardhat_second_account() {
    let path: DerivationPath = "m/44'/60'/0'/0/1".parse().unwrap();
    let account = derive_account(HARDHAT, "", &path).unwrap();
    assert_eq!(account.address(), "0x70997970C51812dc3A010C7d01b50e0d17dc79C8");
}

// BIP-32 test vector 1, private keys along m/0H/1/2H
#[test_case("m", "e8f32e723decf4051aefac8e2c93c9c5b214313817cdb01a1494b917c8436b35" ; "master")]
#[test_case("m/0'", "edb2e14f9ee77d26dd93b4ecede8d16ed408ce149b6cd80b0715a2d911a0afea" ; "m_0h")]
#[test_case("m/0'/1", "3c6cb8d0f6a264c91ea8b5030fadaa8e538b020f0a387421a12de9319dc93368" ; "m_0h_1")]
#[test_case("m/0H/1/2h", "cbce0d719ecf7431d88e6a89fa1483e02e35092af60c042b1df2ff59fa424dca" ; "m_0h_1_2h")]
fn test_bip32_vector_1(path: &str, expected_key: &str) {
    let secp = Secp256k1::signing_only();
    let seed = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
    let path: DerivationPath = path.parse().unwrap();
    let key = ExtendedPrivateKey::from_seed(&seed)
        .unwrap()
        .derive_path(&secp, &path)
        .unwrap();
    assert_eq!(hex::encode(key.private_key()), expected_key);
    assert_eq!(key.depth() as usize, path.depth());
}

#[test_case("0x52908400098527886E0F7030069857D2E4169EE7" ; "all caps 1")]
#[test_case("0x8617E340B3D01FA5F11F306F4090FD50E238070D" ; "all caps 2")]
#[test_case("0xde709f2102306220921060314715629080e2fb77" ; "all lower 1")]
#[test_case("0x27b1fdb04752bbc536007a920d24acb045561c26" ; "all lower 2")]
#[test_case("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed" ; "mixed 1")]
#[test_case("0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359" ; "mixed 2")]
#[test_case("0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB" ; "mixed 3")]
#[test_case("0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb" ; "mixed 4")]
fn test_eip55_vectors(expected: &str) {
    let lower = expected.to_lowercase();
    assert_eq!(to_checksum_address(&lower).unwrap(), expected);
}

#[test]
fn test_derivation_rejects_bad_phrase() {
    let err = derive_ethereum_account("not a real phrase", "").unwrap_err();
    assert!(matches!(err, WalletError::ChecksumError(_)));
}

#[test]
fn test_path_parse_errors() {
    for bad in ["m/44'/60'/x", "44'/60'/0'", "m//0", "m/4294967295"] {
        assert!(matches!(
            bad.parse::<DerivationPath>(),
            Err(WalletError::KeyDerivationError(_))
        ));
    }
}

//! Library configuration and protocol parameters.

/// Smallest admissible secret exponent. `0` and `1` collapse the group action.
pub const DH_MIN_EXPONENT: u32 = 2;

/// Maximum consecutive rejections while sampling a secret exponent.
///
/// Each draw is accepted with probability at least 1/2, so a healthy entropy source
/// exhausts this bound with probability below 2^-128.
pub const DH_SECRET_SAMPLING_MAX_ATTEMPTS: usize = 128;

/// Minimum size (in bits) accepted by [`crate::generate_prime`].
pub const DH_MIN_GENERATED_PRIME_BITS: usize = 64;

/// Maximum candidates tried by [`crate::generate_prime`] before giving up.
pub const DH_PRIME_GEN_MAX_ATTEMPTS: usize = 10_000;

/// Miller-Rabin rounds with random bases.
pub const DH_MILLER_RABIN_ROUNDS: usize = 32;

/// HKDF info label for deriving a symmetric key from the shared secret.
pub const DH_SHARED_SECRET_HKDF_INFO: &[u8] = b"modexp-dh-shared-secret-v1";

/// Generator shared by the RFC 3526 MODP groups.
pub const RFC3526_GENERATOR: u32 = 2;

/// RFC 3526 group 5, 1536-bit MODP prime (hex).
pub const RFC3526_MODP_1536_HEX: &str = "\
    ffffffffffffffffc90fdaa22168c234c4c6628b80dc1cd129024\
    e088a67cc74020bbea63b139b22514a08798e3404ddef9519b3cd\
    3a431b302b0a6df25f14374fe1356d6d51c245e485b576625e7ec\
    6f44c42e9a637ed6b0bff5cb6f406b7edee386bfb5a899fa5ae9f\
    24117c4b1fe649286651ece45b3dc2007cb8a163bf0598da48361\
    c55d39a69163fa8fd24cf5f83655d23dca3ad961c62f356208552\
    bb9ed529077096966d670c354e4abc9804f1746c08ca237327fff\
    fffffffffffff";

/// RFC 3526 group 14, 2048-bit MODP prime (hex).
pub const RFC3526_MODP_2048_HEX: &str = "\
    FFFFFFFFFFFFFFFFC90FDAA22168C234C4C6628B80DC1CD1\
    29024E088A67CC74020BBEA63B139B22514A08798E3404DD\
    EF9519B3CD3A431B302B0A6DF25F14374FE1356D6D51C245\
    E485B576625E7EC6F44C42E9A637ED6B0BFF5CB6F406B7ED\
    EE386BFB5A899FA5AE9F24117C4B1FE649286651ECE45B3D\
    C2007CB8A163BF0598DA48361C55D39A69163FA8FD24CF5F\
    83655D23DCA3AD961C62F356208552BB9ED529077096966D\
    670C354E4ABC9804F1746C08CA18217C32905E462E36CE3B\
    E39E772C180E86039B2783A2EC07A28FB5C55DF06F4C52C9\
    DE2BCBF6955817183995497CEA956AE515D2261898FA0510\
    15728E5A8AACAA68FFFFFFFFFFFFFFFF";

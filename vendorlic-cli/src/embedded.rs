//! Key material compiled into the binary.

/// Seed of the key pair the self-test signs and verifies with.
pub const TEST_SIGNING_SEED: [u8; 32] = [
    0x41, 0x42, 0x43, 0x44, 0x45, 0x46, 0x47, 0x48, 0x49, 0x4a, 0x4b, 0x4c, 0x4d, 0x4e, 0x4f, 0x50,
    0x51, 0x52, 0x53, 0x54, 0x55, 0x56, 0x57, 0x58, 0x59, 0x5a, 0x5b, 0x5c, 0x5d, 0x5e, 0x5f, 0x60,
];

/// Public half of [`TEST_SIGNING_SEED`].
pub const TEST_VERIFYING_KEY: [u8; 32] = [
    0xad, 0xc1, 0x40, 0x11, 0xf8, 0x2d, 0x1c, 0x56, 0xd9, 0x56, 0xaa, 0x4f, 0x9d, 0x73, 0xd8, 0x85,
    0x83, 0x61, 0xa6, 0x06, 0x04, 0x85, 0x25, 0xe0, 0xd0, 0x8c, 0x63, 0x8d, 0xc7, 0x5d, 0xd8, 0xc7,
];

/// Public key `--inspect` verifies against when no `--key` is given.
pub const DEFAULT_VERIFYING_KEY: [u8; 32] = [
    0x61, 0x90, 0x06, 0x2d, 0x4e, 0x58, 0xa5, 0x7e, 0x4a, 0xd7, 0xcc, 0x82, 0xc6, 0x4b, 0x0e, 0x59,
    0xa5, 0xbf, 0x84, 0x69, 0x90, 0x58, 0x7b, 0x13, 0xbf, 0x3d, 0x7b, 0xb3, 0x27, 0x7b, 0xb0, 0xd0,
];

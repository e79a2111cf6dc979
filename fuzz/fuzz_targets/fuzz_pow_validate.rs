#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Validate arbitrary digests against arbitrary difficulty.
    // First byte is the difficulty, the rest is the digest.
    if let Some((&difficulty, digest)) = data.split_first() {
        // This must never panic regardless of input
        let _ = hashcash_work::meets_difficulty(digest, difficulty);
    }

    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(token) = hashcash_types::Token::decode(text) {
            let _ = hashcash_work::is_valid(&token);
        }
    }
});

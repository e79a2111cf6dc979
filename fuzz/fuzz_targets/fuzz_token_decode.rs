#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Decoding arbitrary text must never panic, and anything it accepts
    // must re-encode to a string that decodes to the same token.
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(token) = hashcash_types::Token::decode(text) {
            let again = hashcash_types::Token::decode(&token.encode())
                .expect("re-encoded token must decode");
            assert_eq!(again, token);
        }
    }
});

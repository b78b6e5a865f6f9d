#![no_main]

use libfuzzer_sys::fuzz_target;

use chessgrid::{san::SanPlus, Position};

fuzz_target!(|data: &[u8]| {
    if let Ok(san) = SanPlus::from_ascii(data) {
        let roundtripped = SanPlus::from_ascii(san.to_string().as_bytes()).expect("roundtrip");
        assert_eq!(san, roundtripped);
    }

    if let Ok(text) = std::str::from_utf8(data) {
        let pos = Position::new();
        if let Ok(m) = pos.parse_san(text) {
            assert!(pos.movegen().contains(&m));
        }
    }
});

#![no_main]

use libfuzzer_sys::fuzz_target;

use chessgrid::Position;

fuzz_target!(|data: &[u8]| {
    if let Ok(fen) = std::str::from_utf8(data) {
        if let Ok(pos) = fen.parse::<Position>() {
            let roundtripped: Position = pos.fen().parse().expect("roundtrip");
            assert_eq!(pos, roundtripped);
            assert_eq!(pos.fen(), roundtripped.fen());
        }
    }
});

#![no_main]

use libfuzzer_sys::fuzz_target;

use chessgrid::{Move, Position};

fuzz_target!(|data: &[u8]| {
    // A FEN, a newline, then a move.
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Some((fen, uci)) = text.split_once('\n') else {
        return;
    };
    let Ok(pos) = fen.parse::<Position>() else {
        return;
    };

    let legals = pos.movegen();
    let legal = uci.parse::<Move>().is_ok_and(|m| legals.contains(&m));
    assert_eq!(pos.illegal(uci).is_none(), legal);
    assert_eq!(pos.play_uci(uci).is_ok(), legal);
});

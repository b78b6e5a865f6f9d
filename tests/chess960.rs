use chessgrid::{chess960, CastlingMode, CastlingSide, Position};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Arrangement {
    number: i64,
    arrangement: String,
}

fn reference_arrangements() -> Vec<Arrangement> {
    csv::Reader::from_path("tests/chess960.csv")
        .expect("failed to open reference arrangements")
        .deserialize()
        .map(|record| record.expect("valid record"))
        .collect()
}

#[test]
fn test_reference_arrangements() {
    for record in reference_arrangements() {
        assert_eq!(
            chess960::arrangement_string(record.number),
            record.arrangement,
            "{}",
            record.number
        );
    }
}

#[test]
fn test_reference_fens_load() {
    for record in reference_arrangements() {
        let fen = chess960::fen(record.number);

        let rooks: String = record
            .arrangement
            .char_indices()
            .filter(|&(_, ch)| ch == 'R')
            .map(|(file, _)| char::from(b'A' + file as u8))
            .collect();
        let castling = format!("{}{}", rooks, rooks.to_ascii_lowercase());
        assert_eq!(fen.split(' ').nth(2), Some(castling.as_str()), "{fen}");

        let pos: Position = fen.parse().expect("valid fen");
        assert_eq!(pos, chess960::position(record.number));
        assert_eq!(pos.fen(), fen);
        assert_eq!(
            pos.mode(),
            if record.arrangement == "RNBQKBNR" {
                CastlingMode::Standard
            } else {
                CastlingMode::Chess960
            }
        );
        assert!(!pos.is_check());
    }
}

#[test]
fn test_castling_from_start_with_adjacent_rook() {
    // King on f1 and rook on g1 with nothing else in the way.
    assert_eq!(chess960::arrangement_string(600), "RBQNBKRN");
    let pos = chess960::position(600);
    let m = pos
        .castling_move(CastlingSide::KingSide)
        .expect("castling possible");
    assert_eq!(m.to_string(), "f1g1");
    assert_eq!(pos.nice_string(&m), "O-O");
    assert_eq!(pos.castling_move(CastlingSide::QueenSide), None);
}

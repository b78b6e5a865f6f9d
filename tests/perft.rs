use std::{
    fs::File,
    io::{prelude::*, BufReader},
    num::NonZeroUsize,
};

use chessgrid::{parallel_perft, perft, Position};

fn test_perft_file(path: &str, node_limit: u64) {
    let file = File::open(path).expect("failed to open test suite");
    let reader = BufReader::new(file);

    let mut pos = Position::default();

    for line in reader.lines().map(|l| l.unwrap()) {
        println!("{}", line);

        let trimmed = line.trim();
        let mut slices = trimmed.splitn(2, ' ');

        match slices.next() {
            Some("epd") => {
                pos = slices
                    .next()
                    .expect("missing epd")
                    .parse()
                    .expect("invalid fen");
            }
            Some("perft") => {
                let mut params = slices.next().expect("missing perft params").splitn(2, ' ');

                let depth = params
                    .next()
                    .expect("missing perft depth")
                    .parse()
                    .expect("depth not an integer");

                let nodes = params
                    .next()
                    .expect("missing perft nodes")
                    .parse()
                    .expect("nodes not an integer");

                if nodes <= node_limit {
                    assert_eq!(perft(&pos, depth), nodes);
                }
            }
            _ => {}
        }
    }
}

// macro for generating tests
macro_rules! gen_tests {
    ($($fn_name:ident, $path:tt, $num:expr,)+) => {
        $(
            #[test]
            #[cfg_attr(miri, ignore)]
            fn $fn_name() {
                test_perft_file($path, $num);
            }
        )+
    }
}

gen_tests! {
    test_tricky,      "tests/tricky.perft",        100_000,
    test_chess960,    "tests/chess960.perft",      100_000,
}

#[test]
#[ignore = "deep perft, run with --release --ignored"]
fn test_deep_parallel() {
    let threads = NonZeroUsize::new(4).expect("non-zero");

    let kiwipete: Position = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1"
        .parse()
        .expect("valid fen");
    assert_eq!(parallel_perft(&kiwipete, 4, threads), 4_085_603);

    let chess960: Position =
        "Qr3knr/P1bp1p1p/2pn1q2/4p3/2PP2pB/1p1N1bP1/BP2PP1P/1R3KNR w BHbh - 0 1"
            .parse()
            .expect("valid fen");
    assert_eq!(parallel_perft(&chess960, 4, threads), 1_253_934);
}

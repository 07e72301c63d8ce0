#![no_main]
use libfuzzer_sys::fuzz_target;
use lltrace::grammar::Terminal;
use lltrace::testing::{arithmetic_table, start_symbol};
use lltrace::{build_tree, drive};

const VOCABULARY: [&str; 8] = ["id", "num", "+", "-", "*", "/", "(", ")"];

fuzz_target!(|data: &[u8]| {
    let tokens: Vec<Terminal> = data
        .iter()
        .filter_map(|&byte| Terminal::new(VOCABULARY[usize::from(byte) % VOCABULARY.len()]).ok())
        .collect();

    let table = arithmetic_table();
    match drive(&start_symbol(), &table, &tokens) {
        Ok(trace) => {
            let tree = build_tree(&trace).expect("accepted traces always build");
            assert_eq!(tree.leaf_values().count(), tokens.len());
        }
        Err(err) => {
            assert!(err.is_syntax_error());
            assert!(err.position().is_some_and(|p| p <= tokens.len()));
        }
    }
});

use bytebpe::train;
use proptest::prelude::*;

const CORPUS_LINES: [&str; 8] = [
    "Hello, world!",
    "hello hello helper help",
    " leading space",
    "trailing space ",
    "naïve café",
    "emoji 😊 works",
    "über Straße",
    "日本語テキスト mixed",
];

#[test]
fn trained_tokenizer_roundtrips_corpus_lines() {
    let corpus = CORPUS_LINES.join("\n");
    let (tok, summary) = train(corpus.as_bytes(), 64).expect("training failed");
    assert!(summary.final_vocab_size > 256);
    assert!(summary.post_merge_token_count < summary.raw_token_count);

    for line in CORPUS_LINES {
        let ids = tok.encode(line);
        let decoded = tok.decode(&ids).expect("decoding failed");
        assert_eq!(decoded, line.as_bytes());
    }
}

#[test]
fn roundtrip_holds_for_text_outside_training_corpus() {
    let (tok, _) = train(b"abab abab abab", 8).expect("training failed");
    let samples = ["xyzzy", "tabs\tand spaces", "ababab", ""];
    for sample in samples {
        let ids = tok.encode(sample);
        assert_eq!(tok.decode(&ids).expect("decoding failed"), sample.as_bytes());
    }
}

#[test]
fn training_twice_yields_identical_tables() {
    let corpus = CORPUS_LINES.join("\n");
    let (first, _) = train(corpus.as_bytes(), 32).expect("training failed");
    let (second, _) = train(corpus.as_bytes(), 32).expect("training failed");
    assert_eq!(first.merge_table(), second.merge_table());
    assert_eq!(first.vocab_size(), second.vocab_size());
    assert_eq!(first.encode(&corpus), second.encode(&corpus));
}

#[test]
fn compression_ratio_is_within_bounds() {
    let (_, summary) = train(b"aaaaaaaaaaaaaaaa", 4).expect("training failed");
    let ratio = summary.compression_ratio();
    assert!(ratio > 0.0 && ratio <= 100.0);
}

#[test]
fn vocab_grows_by_exactly_the_merge_count() {
    let (tok, summary) = train(b"abcabcabcabc", 16).expect("training failed");
    assert_eq!(summary.final_vocab_size, 256 + tok.num_merges());
}

proptest! {
    #[test]
    fn roundtrip_arbitrary_bytes(
        corpus in proptest::collection::vec(any::<u8>(), 0..512),
        text in proptest::collection::vec(any::<u8>(), 0..256),
        budget in 0usize..48,
    ) {
        // Any byte-level vocabulary can represent any byte sequence, even
        // one trained on a completely unrelated corpus.
        let (tok, _) = train(&corpus, budget).expect("training failed");
        let ids = tok.encode_bytes(&text);
        let decoded = tok.decode(&ids).expect("decoding failed");
        prop_assert_eq!(decoded, text);
    }

    #[test]
    fn encode_never_lengthens_a_sequence(
        text in proptest::collection::vec(any::<u8>(), 0..256),
        budget in 0usize..32,
    ) {
        let (tok, _) = train(&text, budget).expect("training failed");
        let ids = tok.encode_bytes(&text);
        prop_assert!(ids.len() <= text.len());
    }

    #[test]
    fn training_is_deterministic(
        corpus in proptest::collection::vec(any::<u8>(), 0..256),
        budget in 0usize..32,
    ) {
        let (first, _) = train(&corpus, budget).expect("training failed");
        let (second, _) = train(&corpus, budget).expect("training failed");
        prop_assert_eq!(first.merge_table(), second.merge_table());
    }

    #[test]
    fn all_ids_stay_within_vocab(
        corpus in proptest::collection::vec(any::<u8>(), 1..256),
        budget in 0usize..32,
    ) {
        let (tok, _) = train(&corpus, budget).expect("training failed");
        let ids = tok.encode_bytes(&corpus);
        for id in ids {
            prop_assert!(id < tok.vocab_size());
        }
    }
}

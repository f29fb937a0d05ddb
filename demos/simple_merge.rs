use bytebpe::ErrorMode;

fn main() {
    let text = "abaabbaa abaabbaa abaabbaa";

    let mut trainer = bytebpe::Trainer::new(text.as_bytes());
    let summary = trainer
        .train_with_progress(10, true)
        .expect("training failed");

    println!("{summary}");
    println!("\nFinal tokens: {:?}", trainer.tokens());

    let tokenizer = trainer.into_tokenizer();
    let ids = tokenizer.encode("abaabbaa");
    println!("encode(\"abaabbaa\") = {ids:?}");

    let decoded = tokenizer
        .decode_text(&ids, ErrorMode::Strict)
        .expect("decoding failed");
    println!("decoded back: {decoded:?}");
}

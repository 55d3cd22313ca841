/// Batch prediction example
///
/// Needs a trained model at the configured path (`fakenews train` first).
///
/// Run with:
/// ```
/// cargo run --example batch
/// ```
use fakenews::api::Predictor;
use fakenews::pipeline::config::Config;
use std::time::Instant;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("fakenews Classifier - Batch Prediction Example\n");

    let config = Config::load_or_default("config.toml")?;
    let predictor = Predictor::load(&config.output.model_path)?;
    println!("✓ Model loaded\n");

    let texts = [
        "Senate passes the annual budget after a long floor debate",
        "Doctors stunned by this one weird trick that cures everything",
        "Central bank holds interest rates steady",
        "Leaked footage proves the moon landing was staged",
        "City council approves funding for new transit lines",
        "Insiders reveal aliens are running the treasury",
    ];

    println!("Predicting {} texts in batch...\n", texts.len());

    let start = Instant::now();
    let results = predictor.predict_batch(&texts);
    let elapsed = start.elapsed();

    println!("{}", "=".repeat(80));
    println!("{:<60} | {:^6} | {:>7}", "Text (truncated)", "Label", "Conf %");
    println!("{}", "=".repeat(80));

    for (text, result) in texts.iter().zip(results.iter()) {
        let truncated: String = if text.chars().count() > 57 {
            format!("{}...", text.chars().take(57).collect::<String>())
        } else {
            text.to_string()
        };
        println!(
            "{:<60} | {:^6} | {:>6.1}%",
            truncated,
            result.label.to_string(),
            result.confidence * 100.0
        );
    }

    println!("{}", "=".repeat(80));
    println!("\n✓ Batch prediction complete");
    println!(
        "  Time: {:.2}ms ({:.3}ms per text)",
        elapsed.as_secs_f64() * 1000.0,
        elapsed.as_secs_f64() * 1000.0 / texts.len() as f64
    );

    Ok(())
}

/// Simple example: train a small model, then classify a few headlines.
///
/// Run with:
/// ```
/// cargo run --example simple
/// ```
use fakenews::api::Predictor;
use fakenews::pipeline::config::Config;
use fakenews::pipeline::train::train_model;

const REAL: [&str; 5] = [
    "Senate passes the annual budget after a long floor debate",
    "Central bank holds interest rates steady citing stable inflation",
    "City council approves funding for new public transit lines",
    "Officials confirm the election results after a routine audit",
    "Health ministry publishes the quarterly hospital capacity report",
];

const FAKE: [&str; 5] = [
    "Shocking secret cure that doctors do not want you to know",
    "Aliens secretly control the government, insiders reveal",
    "You will not believe this miracle trick to erase all debt",
    "Celebrity clone exposed in stunning hidden camera footage",
    "Moon landing hoax finally admitted in leaked secret memo",
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("fakenews Classifier - Simple Example\n");

    let workdir = tempfile::tempdir()?;
    let dataset = workdir.path().join("news.csv");
    let mut writer = csv::Writer::from_path(&dataset)?;
    writer.write_record(["title", "text", "label"])?;
    for copy in 0..4 {
        for text in REAL {
            writer.write_record([format!("report {copy}").as_str(), text, "1"])?;
        }
        for text in FAKE {
            writer.write_record([format!("viral {copy}").as_str(), text, "0"])?;
        }
    }
    writer.flush()?;

    let mut config = Config::default();
    config.data.csv_path = dataset;
    config.output.model_path = workdir.path().join("models/fake_news_model.json");
    config.output.vocabulary_path = workdir.path().join("models/vocabulary.json");

    println!("Training...");
    let report = train_model(&config)?;
    println!("{report}\n");

    let predictor = Predictor::with_files(&report.files)?;
    let info = predictor.model_info();
    println!(
        "✓ Model loaded from {} ({} terms)\n",
        info.path.display(),
        info.vocabulary_size
    );

    let headlines = [
        "Parliament approves the new transit budget",
        "Leaked memo reveals secret alien miracle cure",
        "",
    ];

    println!("{}", "=".repeat(70));
    for text in headlines {
        let result = predictor.predict(text);
        println!("\nText: \"{text}\"");
        println!(
            "Prediction: {} (confidence: {:.1}%)",
            result.label,
            result.confidence * 100.0
        );
        println!("{}", "-".repeat(70));
    }

    println!("\n✓ Done!");
    Ok(())
}

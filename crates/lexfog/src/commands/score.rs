//! Score command: readability of a tagged document.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use lexfog_core::report::{IndexValue, ReadabilityReport};
use lexfog_core::{DocumentFormat, Engine, Language, ScoringOptions, VowelGroupOracle};

use super::read_input_file;

/// Arguments for the `score` subcommand.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Tagged document: CCL XML, or JSON when the extension is `.json`.
    pub file: Utf8PathBuf,

    /// Write the annotated HTML to this file.
    #[arg(long, value_name = "OUT")]
    pub html: Option<Utf8PathBuf>,

    /// Language of the text (overrides configuration).
    #[arg(short, long, value_enum)]
    pub language: Option<Language>,
}

/// Score a tagged document and print the report.
#[instrument(name = "cmd_score", skip_all, fields(file = %args.file))]
pub fn cmd_score(
    args: ScoreArgs,
    global_json: bool,
    options: ScoringOptions,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, html = ?args.html, language = ?args.language, "executing score command");

    let content = read_input_file(&args.file, max_input_bytes)?;
    let document = DocumentFormat::from_path(&args.file)
        .parse(&content)
        .with_context(|| format!("failed to read tagged document {}", args.file))?;

    let options = ScoringOptions {
        language: args.language.unwrap_or(options.language),
        ..options
    };
    let oracle = VowelGroupOracle::new();
    let analysis = Engine::new(&oracle)
        .with_options(options)
        .score(&document)
        .with_context(|| format!("failed to score {}", args.file))?;

    if let Some(ref out) = args.html {
        std::fs::write(out.as_std_path(), &analysis.html)
            .with_context(|| format!("failed to write {out}"))?;
        debug!(out = %out, bytes = analysis.html.len(), "annotated HTML written");
    }

    if global_json {
        println!("{}", serde_json::to_string_pretty(&analysis.report)?);
    } else {
        print_report(&args.file, &analysis.report);
        if let Some(ref out) = args.html {
            println!();
            println!("{}: {}", "Annotated HTML".dimmed(), out.cyan());
        }
    }

    Ok(())
}

fn print_report(file: &Utf8Path, report: &ReadabilityReport) {
    println!(
        "{} {} {}",
        file.bold(),
        report.readability_score.green().bold(),
        report.interpretation
    );
    println!("{}: {}", "Readability points".dimmed(), report.readability_points);

    println!();
    println!("{}", "Statistics".bold().underline());
    println!("{}: {}", "Paragraphs".dimmed(), report.paragraph_count);
    println!("{}: {}", "Sentences".dimmed(), report.sentence_count);
    println!("{}: {}", "Words".dimmed(), report.word_count);
    println!(
        "{}: {}",
        "Average sentence length".dimmed(),
        report.average_sentence_length
    );
    println!(
        "{}: {} ({:.2}%)",
        "Hard words".dimmed(),
        report.hard_word_count,
        report.hard_word_percentage
    );
    println!(
        "{}: {} ({:.2}%)",
        "Long sentences".dimmed(),
        report.long_sentence_count,
        report.long_sentence_percentage
    );

    println!();
    println!("{}", "Indices".bold().underline());
    print_index("FOG", &report.fog.orth);
    print_index("FOG (base forms)", &report.fog.base);
    print_index("Pisarek linear", &report.pisarek.linear.orth);
    print_index("Pisarek linear (base forms)", &report.pisarek.linear.base);
    print_index("Pisarek nonlinear", &report.pisarek.nonlinear.orth);
    print_index("Pisarek nonlinear (base forms)", &report.pisarek.nonlinear.base);
    print_index("LIX", &report.lix);
}

fn print_index(label: &str, index: &IndexValue) {
    println!(
        "{}: {:.2} {}",
        label.dimmed(),
        index.value,
        index.interpretation.dimmed()
    );
}

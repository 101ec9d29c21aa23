//! Premorph command: plain text to tagger input.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use tracing::{debug, instrument};

use lexfog_core::premorph::{compose_premorph, docbook_paragraphs, split_paragraphs};

use super::read_input_file;

/// Arguments for the `premorph` subcommand.
#[derive(Args, Debug)]
pub struct PremorphArgs {
    /// Plain-text file with one paragraph per line, or DocBook when the
    /// extension is `.xml`.
    pub file: Utf8PathBuf,

    /// Write the XML here instead of stdout.
    #[arg(short, long, value_name = "OUT")]
    pub output: Option<Utf8PathBuf>,
}

/// Convert a text file to premorph XML.
#[instrument(name = "cmd_premorph", skip_all, fields(file = %args.file))]
pub fn cmd_premorph(
    args: PremorphArgs,
    global_json: bool,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    let content = read_input_file(&args.file, max_input_bytes)?;
    let paragraphs = if args.file.extension() == Some("xml") {
        docbook_paragraphs(&content)
            .with_context(|| format!("failed to read DocBook from {}", args.file))?
    } else {
        split_paragraphs(&content)
    };
    let xml = compose_premorph(&paragraphs);
    debug!(paragraphs = paragraphs.len(), "premorph composed");

    match args.output {
        Some(ref out) => {
            std::fs::write(out.as_std_path(), &xml)
                .with_context(|| format!("failed to write {out}"))?;
            if global_json {
                let summary = serde_json::json!({
                    "output": out,
                    "paragraphs": paragraphs.len(),
                });
                println!("{}", serde_json::to_string_pretty(&summary)?);
            }
        }
        None if global_json => {
            let summary = serde_json::json!({
                "paragraphs": paragraphs.len(),
                "xml": xml,
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        None => print!("{xml}"),
    }

    Ok(())
}

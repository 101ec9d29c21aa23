//! Release helpers: man pages and shell completions.
//!
//! ```text
//! cargo run -p xtask -- man [--out-dir target/man]
//! cargo run -p xtask -- completions [--out-dir target/completions]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "xtask", about = "Project automation for lexfog")]
struct Xtask {
    #[command(subcommand)]
    command: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Render man pages for lexfog and each subcommand.
    Man {
        #[arg(long, default_value = "target/man")]
        out_dir: PathBuf,
    },
    /// Generate completion scripts for every supported shell.
    Completions {
        #[arg(long, default_value = "target/completions")]
        out_dir: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    match Xtask::parse().command {
        Task::Man { out_dir } => man(&out_dir),
        Task::Completions { out_dir } => completions(&out_dir),
    }
}

fn man(out_dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let cmd = lexfog::command();
    render_page(&cmd, "lexfog", out_dir)?;
    for sub in cmd.get_subcommands().filter(|s| !s.is_hide_set()) {
        let name = format!("lexfog-{}", sub.get_name());
        let page = sub.clone().name(name.clone());
        render_page(&page, &name, out_dir)?;
    }
    Ok(())
}

fn render_page(cmd: &clap::Command, name: &str, out_dir: &Path) -> anyhow::Result<()> {
    let mut buf = Vec::new();
    clap_mangen::Man::new(cmd.clone())
        .render(&mut buf)
        .with_context(|| format!("failed to render man page for {name}"))?;
    let path = out_dir.join(format!("{name}.1"));
    fs::write(&path, buf).with_context(|| format!("failed to write {}", path.display()))?;
    println!("wrote {}", path.display());
    Ok(())
}

fn completions(out_dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let mut cmd = lexfog::command();
    for shell in Shell::value_variants() {
        let path = clap_complete::generate_to(*shell, &mut cmd, "lexfog", out_dir)
            .with_context(|| format!("failed to generate {shell} completions"))?;
        println!("wrote {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn man_pages_cover_every_visible_subcommand() {
        let tmp = tempfile::TempDir::new().unwrap();
        man(tmp.path()).unwrap();

        for (name, word) in [
            ("lexfog", "lexfog"),
            ("lexfog-score", "score"),
            ("lexfog-premorph", "premorph"),
            ("lexfog-info", "info"),
        ] {
            let page = fs::read_to_string(tmp.path().join(format!("{name}.1"))).unwrap();
            assert!(page.contains(".TH"), "{name}.1 is not a man page");
            assert!(page.contains(word), "{name}.1 does not name its command");
        }
    }

    #[test]
    fn completions_for_every_shell() {
        let tmp = tempfile::TempDir::new().unwrap();
        completions(tmp.path()).unwrap();
        assert!(tmp.path().join("lexfog.bash").exists());
        assert!(tmp.path().join("_lexfog").exists());
    }
}

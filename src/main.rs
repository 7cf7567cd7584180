use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use exam_gen::generate::{generate_all, standard_variants, FontSource, SeedPolicy};
use exam_gen::layout::LayoutConfig;
use std::path::PathBuf;

/// exam-gen - print shuffled multiple-choice exams and their answer keys
#[derive(Parser, Debug)]
#[command(name = "exam-gen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Question bank (JSON)
    #[arg(value_name = "BANK", default_value = "questions.json")]
    bank: PathBuf,

    /// TrueType / OpenType font to print with (default: bundled DejaVu Sans)
    #[arg(long, value_name = "TTF")]
    font: Option<PathBuf>,

    /// Directory the PDFs are written to
    #[arg(long, value_name = "DIR", default_value = ".")]
    out_dir: PathBuf,

    /// Version labels to print, one unsolved and one solved PDF each
    #[arg(
        long,
        value_name = "LABELS",
        value_delimiter = ',',
        default_values_t = [String::from("A"), String::from("B")]
    )]
    versions: Vec<String>,

    /// Layout overrides (TOML)
    #[arg(long, value_name = "TOML")]
    layout: Option<PathBuf>,

    /// What the question order is seeded from
    #[arg(long, value_enum, default_value_t = SeedArg::OutputName)]
    seed_policy: SeedArg,

    /// Don't print answer keys
    #[arg(long)]
    unsolved_only: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum SeedArg {
    /// every output file gets its own question order
    OutputName,
    /// answer keys share their exam's question order
    Version,
}

impl From<SeedArg> for SeedPolicy {
    fn from(arg: SeedArg) -> Self {
        match arg {
            SeedArg::Version => SeedPolicy::Version,
            SeedArg::OutputName => SeedPolicy::OutputName,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let config = match &cli.layout {
        Some(path) => LayoutConfig::load(path)
            .with_context(|| format!("Failed to load layout from {}", path.display()))?,
        None => LayoutConfig::default(),
    };
    let font = match cli.font {
        Some(path) => FontSource::File(path),
        None => FontSource::Bundled,
    };
    std::fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("Failed to create {}", cli.out_dir.display()))?;

    let policy = SeedPolicy::from(cli.seed_policy);
    log::debug!("seeding question order by {policy}");
    let variants = standard_variants(&cli.out_dir, &cli.versions, !cli.unsolved_only, policy);

    let mut failed = 0;
    for (variant, result) in generate_all(&cli.bank, &font, &variants, &config) {
        if let Err(e) = result {
            failed += 1;
            log::error!("{} was not generated: {e}", variant.output.display());
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {} exams failed to generate", variants.len());
    }
    Ok(())
}

use ahash::AHashSet;
use clap::Parser;
use gtfreq::{
    cohort::{self, DEFAULT_ID_PATTERN},
    error::Result,
    freq::FrequencyTable,
    vcf::read_genotype_matrix,
};
use log::info;
use regex::Regex;
use std::fs::File;
use std::path::PathBuf;

/// Show genotype frequencies from a VCF file, separated by cohorts
#[derive(Parser)]
#[command(name = "genotype-frequencies", author, version, about, long_about = None)]
struct Cli {
    /// Path to the VCF file (input)
    vcf: PathBuf,
    /// Paths to cohort CSV files (space separated)
    #[arg(required = true)]
    cohorts: Vec<PathBuf>,
    /// Output directory for frequency CSV files; if not set, tables are printed
    #[arg(short = 'o', long)]
    output_dir: Option<PathBuf>,
    /// Regex a cell must match for its column to be taken as the sample-id column
    #[arg(long, default_value = DEFAULT_ID_PATTERN)]
    id_pattern: String,
    /// Honor the phasing flag of calls (emit `|` for phased calls) instead of always `/`
    #[arg(long, default_value_t = false)]
    respect_phasing: bool,
    /// Emit raw per-category counts instead of frequencies
    #[arg(long, default_value_t = false)]
    counts: bool,
}

fn main() {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter(None, log::LevelFilter::Info)
        .format_module_path(false)
        .init();

    let pattern = match Regex::new(&cli.id_pattern) {
        Ok(re) => re,
        Err(e) => {
            eprintln!("invalid --id-pattern: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&cli, &pattern) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli, pattern: &Regex) -> Result<()> {
    let cohort_ids = cohort::read_cohort_ids(&cli.cohorts, pattern)?;

    for (k, name) in cohort_ids.names().iter().enumerate() {
        info!("processing cohort: {name}");

        let keep: AHashSet<String> = cohort_ids.ids(k).into_iter().collect();
        let gm = read_genotype_matrix(&cli.vcf, Some(&keep), cli.respect_phasing)?;
        let freq = if cli.counts {
            FrequencyTable::counts_from_matrix(&gm)
        } else {
            FrequencyTable::from_matrix(&gm)
        };

        match cli.output_dir.as_ref() {
            Some(dir) => {
                std::fs::create_dir_all(dir)?;
                let path = dir.join(format!("{name}.csv"));
                freq.write_csv(File::create(&path)?)?;
                info!("genotype frequencies saved to {}", path.display());
            }
            None => freq.write_csv(std::io::stdout().lock())?,
        }
    }
    Ok(())
}

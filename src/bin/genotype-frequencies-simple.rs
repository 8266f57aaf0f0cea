use clap::Parser;
use gtfreq::{error::Result, freq::FrequencyTable, vcf::read_genotype_matrix};
use log::info;
use std::fs::File;
use std::path::PathBuf;

/// Show genotype frequencies from a VCF file over all samples
#[derive(Parser)]
#[command(name = "genotype-frequencies-simple", author, version, about, long_about = None)]
struct Cli {
    /// Path to the VCF file (input)
    vcf: PathBuf,
    /// Output file for the frequency CSV; if not set, the table is printed
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
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

    if let Err(e) = run(&cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let gm = read_genotype_matrix(&cli.vcf, None, cli.respect_phasing)?;
    info!(
        "genotype matrix: {} samples x {} variants",
        gm.nrows(),
        gm.ncols()
    );
    let freq = if cli.counts {
        FrequencyTable::counts_from_matrix(&gm)
    } else {
        FrequencyTable::from_matrix(&gm)
    };

    match cli.output.as_ref() {
        Some(path) => {
            if let Some(dir) = path.parent() {
                if dir != std::path::Path::new("") {
                    std::fs::create_dir_all(dir)?;
                }
            }
            freq.write_csv(File::create(path)?)?;
            info!("genotype frequencies saved to {}", path.display());
        }
        None => freq.write_csv(std::io::stdout().lock())?,
    }
    Ok(())
}

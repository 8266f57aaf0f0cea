use clap::Parser;
use gtfreq::{error::Result, intersect::intersect_variants, report, vcf::read_variant_ids};
use log::info;
use std::path::PathBuf;

/// Intersect variants observed in a VCF file with the selected features of a
/// feature-selection report
#[derive(Parser)]
#[command(name = "intersect-variants", author, version, about, long_about = None)]
struct Cli {
    /// Path to the VCF file (input)
    vcf: PathBuf,
    /// Path to the feature-selection report CSV (input)
    csv: PathBuf,
    /// Feature count selecting which report row to take `selected_features` from
    #[arg(short = 'n', long, default_value_t = 20)]
    n_features: u64,
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
    let observed = read_variant_ids(&cli.vcf)?;
    let selected = report::selected_variants(&cli.csv, cli.n_features)?;
    info!(
        "{} variants in the call source, {} selected in the report",
        observed.len(),
        selected.len()
    );

    let shared = intersect_variants(&observed, &selected);
    let mut w = csv::Writer::from_writer(std::io::stdout().lock());
    w.write_record(["CHROM", "POS"])?;
    for v in shared.iter() {
        let pos = v.pos.to_string();
        w.write_record([v.chrom.as_str(), pos.as_str()])?;
    }
    w.flush()?;
    Ok(())
}

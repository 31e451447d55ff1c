use clap::Parser;
use interscore::{interaction_score, load_model, ScoreError};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, error, warn};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to the PDB or mmCIF file to be scored
    input: PathBuf,

    /// Chains of the first group, comma-separated
    #[arg(short = 'a', long = "first", default_value = "A", value_delimiter = ',')]
    first: Vec<String>,

    /// Chains of the second group, comma-separated
    #[arg(short = 'b', long = "second", default_value = "B", value_delimiter = ',')]
    second: Vec<String>,

    /// Distance cutoff in Ångströms for two atoms to be in contact
    #[arg(short, long, default_value_t = 6.0)]
    radius: f64,

    /// Weight each contact by its distance instead of counting
    #[arg(short, long, default_value_t = false)]
    weight: bool,

    /// Write the residue pair table to this file
    #[arg(short = 'R', long = "residues")]
    residues: Option<PathBuf>,

    /// Write the atom pair table to this file
    #[arg(short = 'A', long = "atoms")]
    atoms: Option<PathBuf>,

    /// Write the score to this file instead of standard output
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbosity of the program:
    /// -v for info, -vv for debug, and -vvv for trace
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(log_level).init();

    if let Err(e) = run(&args) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), ScoreError> {
    debug!("{args:?}");

    let input_file = args.input.to_string_lossy().to_string();
    let (pdb, pdb_warnings) = load_model(&input_file)?;
    for e in &pdb_warnings {
        match e.level() {
            pdbtbx::ErrorLevel::BreakingError => error!("{e}"),
            pdbtbx::ErrorLevel::InvalidatingError => error!("{e}"),
            _ => warn!("{e}"),
        }
    }
    debug!("Loaded {} chains from {input_file}", pdb.chain_count());

    let mut residues_file = match &args.residues {
        Some(path) => Some(File::create(path)?),
        None => None,
    };
    let mut atoms_file = match &args.atoms {
        Some(path) => Some(File::create(path)?),
        None => None,
    };

    let score = interaction_score(
        &pdb,
        args.radius,
        args.weight,
        &args.first,
        &args.second,
        residues_file.as_mut().map(|f| f as &mut dyn Write),
        atoms_file.as_mut().map(|f| f as &mut dyn Write),
    )?;

    match &args.output {
        Some(path) => {
            let mut output = File::create(path)?;
            writeln!(output, "{score}")?;
        }
        None => println!("{score}"),
    }
    Ok(())
}

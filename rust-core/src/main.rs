use anyhow::{Context, Result};
use bravais_lattice::config::{ClassifierOptions, DEFAULT_EPS, DEFAULT_NPOINTS};
use bravais_lattice::lattice::{
    BravaisLattice, BravaisType, Cell, bravais_families, classify_with_options,
};
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{debug, info};

#[derive(Parser)]
#[command(name = "bravais")]
#[command(about = "Identify Bravais lattices, list special k-points and sample band paths")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a cell given as nine numbers, the three basis vectors row by row
    Identify {
        #[arg(long, num_args = 9, value_name = "X", allow_negative_numbers = true, required = true)]
        cell: Vec<f64>,

        /// Absolute tolerance for lengths and angles (degrees)
        #[arg(long, default_value_t = DEFAULT_EPS)]
        eps: f64,

        /// Classify the cell as given, without Niggli reduction
        #[arg(long)]
        no_reduce: bool,

        #[arg(long)]
        json: bool,
    },
    /// Describe one lattice family, or all of them
    Describe { lattice: Option<BravaisType> },
    /// Print a lattice with its variant and special points
    Points {
        lattice: BravaisType,

        /// Lattice parameter, e.g. `-p a=3.5`
        #[arg(short, long = "param", value_parser = parse_param)]
        params: Vec<(String, f64)>,

        #[arg(long, default_value_t = DEFAULT_EPS)]
        eps: f64,

        #[arg(long)]
        json: bool,
    },
    /// Sample a band path of a lattice
    Bandpath {
        lattice: BravaisType,

        #[arg(short, long = "param", value_parser = parse_param)]
        params: Vec<(String, f64)>,

        /// Path string such as "GXM,R"; defaults to the variant's path
        #[arg(long)]
        path: Option<String>,

        #[arg(short, long, default_value_t = DEFAULT_NPOINTS)]
        npoints: usize,

        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    debug!("bravais v{}", bravais_lattice::VERSION);

    match cli.command {
        Commands::Identify {
            cell,
            eps,
            no_reduce,
            json,
        } => identify(&cell, eps, !no_reduce, json),
        Commands::Describe { lattice } => {
            describe(lattice);
            Ok(())
        }
        Commands::Points {
            lattice,
            params,
            eps,
            json,
        } => points(lattice, &params, eps, json),
        Commands::Bandpath {
            lattice,
            params,
            path,
            npoints,
            json,
        } => bandpath(lattice, &params, path.as_deref(), npoints, json),
    }
}

fn parse_param(s: &str) -> std::result::Result<(String, f64), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{s}'"))?;
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("invalid value for {name}: {err}"))?;
    Ok((name.trim().to_string(), value))
}

fn build_lattice(kind: BravaisType, params: &[(String, f64)], eps: f64) -> Result<BravaisLattice> {
    let params: Vec<(&str, f64)> = params
        .iter()
        .map(|(name, value)| (name.as_str(), *value))
        .collect();
    BravaisLattice::with_eps(kind, &params, eps)
        .with_context(|| format!("Failed to build {} lattice", kind))
}

fn identify(values: &[f64], eps: f64, reduce: bool, json: bool) -> Result<()> {
    let rows = [
        [values[0], values[1], values[2]],
        [values[3], values[4], values[5]],
        [values[6], values[7], values[8]],
    ];
    let cell = Cell::from_rows(rows).context("Invalid cell")?;
    let options = ClassifierOptions { eps, reduce };
    info!("Classifying cell with eps={} (reduce: {})", eps, reduce);
    let classification = classify_with_options(&cell, &options).context("Classification failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&classification)?);
        return Ok(());
    }

    print!("{}", classification.lattice);
    println!("Transform to the matched basis (columns): {}", classification.transform);
    println!(
        "Reduced cell patterns: lengths {:?}, angles {:?}",
        classification.length_pattern, classification.angle_pattern
    );
    for skipped in &classification.skipped {
        println!(
            "Skipped {} {:?}: {}",
            skipped.lattice, skipped.parameters, skipped.reason
        );
    }
    Ok(())
}

fn describe(lattice: Option<BravaisType>) {
    match lattice {
        Some(kind) => println!("{}", kind.type_description()),
        None => {
            for family in bravais_families() {
                println!("{}", family.type_description());
            }
        }
    }
}

fn points(kind: BravaisType, params: &[(String, f64)], eps: f64, json: bool) -> Result<()> {
    let lattice = build_lattice(kind, params, eps)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&lattice.special_points())?);
    } else {
        print!("{}", lattice);
    }
    Ok(())
}

fn bandpath(
    kind: BravaisType,
    params: &[(String, f64)],
    path: Option<&str>,
    npoints: usize,
    json: bool,
) -> Result<()> {
    let lattice = build_lattice(kind, params, DEFAULT_EPS)?;
    let bandpath = lattice
        .bandpath(path, npoints, None)
        .with_context(|| format!("Failed to sample band path of {}", lattice.repr()))?;
    info!("Sampled {} k-points along {}", bandpath.len(), bandpath.path());

    if json {
        println!("{}", serde_json::to_string_pretty(&bandpath)?);
        return Ok(());
    }

    println!("{}", bandpath);
    let (x, _, _) = bandpath.linear_kpoint_axis();
    for (k, x) in bandpath.scaled_kpts().iter().zip(x) {
        println!("{:10.6} {:10.6} {:10.6}   {:10.6}", k[0], k[1], k[2], x);
    }
    Ok(())
}

//! # labsim
//!
//! Command-line front end of the simulation engine. Runs one model with the
//! given parameters and prints a summary, the full result as JSON, or writes
//! the dataset to CSV.
//!
//! ## Usage
//!
//! ```bash
//! labsim nanoparticle --concentration 0.8 --temperature 60
//! labsim voltammetry --scan-rate 0.2 --concentration 10 --csv cv.csv
//! labsim distillation --reflux-ratio 4 --trays 20 --json
//! labsim nmr --peak 1.22:t:3 --peak 3.68:q:2 --peak 2.50:s:1 --deterministic
//! labsim list
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use serde::Serialize;

use labsim::config::EngineConfig;
use labsim::engine::Experiment;
use labsim::models::{
    ButlerVolmerCell, DistillationColumn, DistillationParameters, LineShapeSynthesizer,
    Multiplicity, NanoparticleModel, NanoparticleParameters, NmrPeak, NmrSample,
    VoltammetryParameters,
};
use labsim::output::{export_csv, to_json, CsvMetadata};
use labsim::physics::{ExperimentModel, Noise, NoiseMode, ParameterSet, Trace};

/// labsim - virtual chemistry laboratory simulations
#[derive(Parser)]
#[command(name = "labsim")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// TOML configuration file
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Seed the jitter for reproducible output
    #[arg(long, global = true, conflicts_with = "deterministic")]
    seed: Option<u64>,

    /// Switch the jitter off
    #[arg(long, global = true)]
    deterministic: bool,

    /// Write the dataset to a CSV file
    #[arg(long, value_name = "FILE", global = true)]
    csv: Option<PathBuf>,

    /// Print the full result as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Gold nanoparticle synthesis (UV-Vis)
    Nanoparticle {
        /// Reductant concentration (0.1-1.0)
        #[arg(short, long, default_value = "0.5")]
        concentration: f64,

        /// Temperature in °C (25-100)
        #[arg(short, long, default_value = "25")]
        temperature: f64,
    },

    /// Cyclic voltammetry
    Voltammetry {
        /// Scan rate in V/s (0.01-0.5)
        #[arg(short, long, default_value = "0.1")]
        scan_rate: f64,

        /// Analyte concentration in mM (1-20)
        #[arg(short, long, default_value = "5")]
        concentration: f64,
    },

    /// Fractional distillation of ethanol/water
    Distillation {
        /// Reflux ratio (1-10)
        #[arg(short, long, default_value = "2.5")]
        reflux_ratio: f64,

        /// Number of trays (3-30)
        #[arg(short, long, default_value = "10")]
        trays: usize,
    },

    /// ¹H NMR line shapes (defaults to ethanol)
    Nmr {
        /// Peak as shift:multiplicity:integration, e.g. 1.22:t:3
        #[arg(short, long = "peak", value_name = "PEAK")]
        peaks: Vec<NmrPeak>,
    },

    /// List the experiment catalogue
    List,
}

/// What every run hands back to the output stage
struct Run<P, O> {
    experiment: Experiment,
    model: String,
    parameters: P,
    result: O,
    summary: Vec<String>,
    trace: Trace,
    metadata: Vec<(&'static str, String)>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => EngineConfig::default(),
    };

    let noise = Noise::from_mode(noise_mode(&cli, &config));
    info!("Noise mode: {:?}", noise.mode());

    match &cli.command {
        Commands::Nanoparticle {
            concentration,
            temperature,
        } => {
            let run = run_nanoparticle(NanoparticleParameters::new(*concentration, *temperature), noise);
            finish(&cli, &config, run)
        }
        Commands::Voltammetry {
            scan_rate,
            concentration,
        } => {
            let run = run_voltammetry(VoltammetryParameters::new(*scan_rate, *concentration), noise);
            finish(&cli, &config, run)
        }
        Commands::Distillation {
            reflux_ratio,
            trays,
        } => {
            let run = run_distillation(DistillationParameters::new(*reflux_ratio, *trays), noise);
            finish(&cli, &config, run)
        }
        Commands::Nmr { peaks } => {
            let sample = if peaks.is_empty() {
                info!("No peaks given, using ethanol");
                ethanol()
            } else {
                NmrSample::new(peaks.clone())
            };
            finish(&cli, &config, run_nmr(sample, noise))
        }
        Commands::List => {
            run_list(cli.json)
        }
    }
}

fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

/// Command-line flags win over the `[noise]` section
fn noise_mode(cli: &Cli, config: &EngineConfig) -> NoiseMode {
    if cli.deterministic {
        NoiseMode::Disabled
    } else if let Some(seed) = cli.seed {
        NoiseMode::Seeded(seed)
    } else {
        config.noise_mode()
    }
}

fn ethanol() -> NmrSample {
    NmrSample::new(vec![
        NmrPeak::new(1.22, Multiplicity::Triplet, 3.0),
        NmrPeak::new(3.68, Multiplicity::Quartet, 2.0),
        NmrPeak::new(2.50, Multiplicity::Singlet, 1.0),
    ])
}

// =============================================================================
// Models
// =============================================================================

fn run_nanoparticle(
    parameters: NanoparticleParameters,
    mut noise: Noise,
) -> Run<NanoparticleParameters, labsim::models::NanoparticleOutcome> {
    let model = NanoparticleModel::new(&mut noise);
    let parameters = parameters.normalized();
    let result = model.run(&parameters, &mut noise);

    let mut summary = vec![
        format!("Particle size:   {} nm", result.particle_size),
        format!("Solution colour: {} ({})", result.solution_color, result.display_color),
    ];
    if let Some(peak) = result.peak() {
        summary.push(format!(
            "Plasmon peak:    {:.0} nm, A = {:.3}",
            peak.wavelength, peak.absorbance
        ));
    }

    Run {
        experiment: Experiment::NanomaterialsSynthesis,
        model: model.name().to_string(),
        metadata: vec![
            ("concentration", parameters.concentration.to_string()),
            ("temperature_c", parameters.temperature.to_string()),
        ],
        trace: result.to_trace(),
        parameters,
        result,
        summary,
    }
}

fn run_voltammetry(
    parameters: VoltammetryParameters,
    mut noise: Noise,
) -> Run<VoltammetryParameters, labsim::models::CvResult> {
    let cell = ButlerVolmerCell::default();
    let parameters = parameters.normalized();
    let result = cell.run(&parameters, &mut noise);

    let fmt = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |v| format!("{:.4}", v));
    let summary = vec![
        format!("Points:          {}", result.points.len()),
        format!("Anodic peak:     ipa = {}, Epa = {} V", fmt(result.ipa), fmt(result.epa)),
        format!("Cathodic peak:   ipc = {}, Epc = {} V", fmt(result.ipc), fmt(result.epc)),
        format!("Peak separation: {} V", fmt(result.peak_separation())),
    ];

    Run {
        experiment: Experiment::ElectrochemicalAnalysis,
        model: cell.name().to_string(),
        metadata: vec![
            ("scan_rate_v_per_s", parameters.scan_rate.to_string()),
            ("concentration_mm", parameters.concentration.to_string()),
        ],
        trace: result.to_trace(),
        parameters,
        result,
        summary,
    }
}

fn run_distillation(
    parameters: DistillationParameters,
    mut noise: Noise,
) -> Run<DistillationParameters, labsim::models::DistillationResult> {
    let column = DistillationColumn::default();
    let parameters = parameters.normalized();
    let result = column.run(&parameters, &mut noise);

    let mut summary = vec![
        format!("Distillate: {:.2} % ethanol", result.distillate_concentration),
        format!("Bottoms:    {:.2} % ethanol", result.bottoms_concentration),
    ];
    summary.extend(
        result
            .compositions
            .iter()
            .map(|t| format!("  tray {:>2}: {:.2} %", t.tray_number, t.ethanol_concentration)),
    );

    Run {
        experiment: Experiment::ChemicalEngineering,
        model: column.name().to_string(),
        metadata: vec![
            ("reflux_ratio", parameters.reflux_ratio.to_string()),
            ("trays", parameters.tray_count.to_string()),
        ],
        trace: result.to_trace(),
        parameters,
        result,
        summary,
    }
}

fn run_nmr(sample: NmrSample, mut noise: Noise) -> Run<NmrSample, labsim::models::NmrSpectrum> {
    let synthesizer = LineShapeSynthesizer::default();
    let sample = sample.normalized();
    let result = synthesizer.run(&sample, &mut noise);

    let mut summary = vec![format!("Points: {}", result.points.len())];
    summary.extend(sample.peaks.iter().map(|p| {
        format!("  {:.2} ppm  {:<8}  {}H", p.shift, p.multiplicity.to_string(), p.integration)
    }));

    let peaks = sample
        .peaks
        .iter()
        .map(|p| format!("{}:{}:{}", p.shift, p.multiplicity.tag(), p.integration))
        .collect::<Vec<_>>()
        .join(" ");

    Run {
        experiment: Experiment::SpectroscopyAnalysis,
        model: synthesizer.name().to_string(),
        metadata: vec![("peaks", peaks)],
        trace: result.to_trace(),
        parameters: sample,
        result,
        summary,
    }
}

// =============================================================================
// Output
// =============================================================================

fn finish<P: Serialize, O: Serialize>(
    cli: &Cli,
    config: &EngineConfig,
    run: Run<P, O>,
) -> Result<()> {
    if let Some(path) = &cli.csv {
        write_csv(config, &run, path)?;
    }

    if cli.json {
        let report = serde_json::json!({
            "experiment": run.experiment,
            "model": run.model,
            "parameters": run.parameters,
            "result": run.result,
        });
        println!("{}", to_json(&report)?);
    } else {
        println!("{} ({})", run.experiment.title(), run.model);
        for line in &run.summary {
            println!("{}", line);
        }
    }

    Ok(())
}

fn write_csv<P, O>(config: &EngineConfig, run: &Run<P, O>, path: &Path) -> Result<()> {
    let mut metadata = CsvMetadata::new(run.experiment.title(), &run.model);
    for (key, value) in &run.metadata {
        metadata.add_parameter(*key, value);
    }

    export_csv(config, &run.trace, Some(metadata), path)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!("Wrote {} points to {}", run.trace.len(), path.display());
    Ok(())
}

fn run_list(json: bool) -> Result<()> {
    if json {
        let catalogue: Vec<_> = Experiment::all()
            .iter()
            .map(|e| {
                serde_json::json!({
                    "id": e.id(),
                    "title": e.title(),
                    "category": e.category(),
                    "description": e.description(),
                })
            })
            .collect();
        println!("{}", to_json(&catalogue)?);
    } else {
        for experiment in Experiment::all() {
            println!(
                "{:<34} {:<28} {}",
                experiment.id(),
                experiment.title(),
                experiment.category()
            );
        }
    }
    Ok(())
}

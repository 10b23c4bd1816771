mod error;
mod report;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use vl_core::deg;
use vl_project::Project;
use vl_solver::{FlowState, solve_samples};
use vl_surrogate::{SurrogateOutput, TrainedSurrogate};

use crate::error::{CliError, CliResult};
use crate::report::{SampleReport, SolveReport};

#[derive(Parser)]
#[command(name = "vl-cli")]
#[command(about = "VortexLift CLI - vortex-lattice aerodynamics and linear surrogates", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate project file syntax and structure
    Validate {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
    },
    /// Solve the lattice at one or more angles of attack
    Solve {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
        /// Angles of attack in degrees (comma separated or repeated)
        #[arg(long = "alpha-deg", required = true, value_delimiter = ',', allow_hyphen_values = true)]
        alpha_deg: Vec<f64>,
        /// Include section coefficients in the JSON report
        #[arg(long)]
        sections: bool,
        /// Write a JSON report to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Train the surrogate over the project's training grid
    Train {
        /// Path to the project YAML or JSON file
        project_path: PathBuf,
        /// Write the trained surrogate as JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Evaluate a surrogate, training it from a project or loading a saved one
    Evaluate {
        /// Project to train from
        #[arg(long, required_unless_present = "model", conflicts_with = "model")]
        project: Option<PathBuf>,
        /// Previously trained surrogate (JSON written by `train --output`)
        #[arg(long)]
        model: Option<PathBuf>,
        /// Angles of attack in degrees (comma separated or repeated)
        #[arg(long = "alpha-deg", required = true, value_delimiter = ',', allow_hyphen_values = true)]
        alpha_deg: Vec<f64>,
    },
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Solve {
            project_path,
            alpha_deg,
            sections,
            output,
        } => cmd_solve(&project_path, &alpha_deg, sections, output.as_deref()),
        Commands::Train {
            project_path,
            output,
        } => cmd_train(&project_path, output.as_deref()),
        Commands::Evaluate {
            project,
            model,
            alpha_deg,
        } => cmd_evaluate(project.as_deref(), model.as_deref(), &alpha_deg),
    }
}

fn load_project(path: &Path) -> CliResult<Project> {
    let project = vl_project::load(path)?;
    tracing::info!(
        path = %path.display(),
        wings = project.wings.len(),
        "project loaded"
    );
    Ok(project)
}

fn cmd_validate(project_path: &Path) -> CliResult<()> {
    println!("Validating project: {}", project_path.display());
    let project = load_project(project_path)?;
    let geometry = project.geometry()?;
    println!("✓ Project is valid");
    println!(
        "  {} wings, {} panels ({} spanwise x {} chordwise per semi-span)",
        geometry.wings().len(),
        geometry.len(),
        project.settings.spanwise_panels,
        project.settings.chordwise_panels
    );
    for wing in geometry.wings() {
        println!("  {} - area {:.4} m^2, {} strips", wing.tag, wing.area, wing.strips);
    }
    Ok(())
}

fn cmd_solve(
    project_path: &Path,
    alpha_deg: &[f64],
    sections: bool,
    output: Option<&Path>,
) -> CliResult<()> {
    let project = load_project(project_path)?;
    let geometry = project.geometry()?;
    let settings = project.vlm_settings();

    println!("Solving {} at {} angle(s) of attack", project.name, alpha_deg.len());
    let results = solve_samples(&FlowState::from_degrees(alpha_deg), &geometry, &settings)?;

    println!("\n{:>9} {:>10} {:>10} {:>10}", "alpha", "CL", "CDi", "CM");
    for (alpha, result) in alpha_deg.iter().zip(&results) {
        match result {
            Ok(sample) => {
                println!(
                    "{:>9.3} {:>10.5} {:>10.6} {:>10.5}",
                    alpha, sample.lift, sample.induced_drag, sample.moment
                );
                for wing in &sample.wings {
                    println!("{:>9} {:>10.5} {:>10.6}  {}", "", wing.lift, wing.induced_drag, wing.tag);
                }
            }
            Err(err) => println!("{:>9.3}  failed: {}", alpha, err),
        }
    }

    if let Some(path) = output {
        let report = SolveReport {
            project: project.name.clone(),
            spanwise_panels: settings.spanwise_panels,
            chordwise_panels: settings.chordwise_panels,
            samples: alpha_deg
                .iter()
                .zip(&results)
                .map(|(alpha, result)| SampleReport::new(*alpha, result, sections))
                .collect(),
        };
        std::fs::write(path, serde_json::to_string_pretty(&report)?)?;
        println!("\n✓ Report written to {}", path.display());
    }

    let failed = results.iter().filter(|r| r.is_err()).count();
    if failed > 0 {
        return Err(CliError::SamplesFailed {
            failed,
            total: results.len(),
        });
    }
    Ok(())
}

fn train_project(project: &Project) -> CliResult<TrainedSurrogate> {
    let mut analysis = project.analysis()?;
    analysis.train()?;
    Ok(analysis.into_surrogate()?)
}

fn cmd_train(project_path: &Path, output: Option<&Path>) -> CliResult<()> {
    let project = load_project(project_path)?;
    println!(
        "Training surrogate for {} over {} angles",
        project.name,
        project.training.angles_deg.len()
    );
    let model = train_project(&project)?;

    let lift = model.lift_fit();
    let drag = model.induced_drag_fit();
    println!("✓ Surrogate trained ({:?} outside the grid)", model.envelope());
    println!(
        "  CL  = {:.5} + {:.5} * alpha[rad]  (rms {:.2e})",
        lift.intercept, lift.slope, lift.residual_rms
    );
    println!(
        "  CDi = {:.6} + {:.6} * alpha[rad]  (rms {:.2e})",
        drag.intercept, drag.slope, drag.residual_rms
    );
    for wing in model.wing_fits() {
        println!(
            "  CL[{}] = {:.5} + {:.5} * alpha[rad]",
            wing.tag, wing.lift.intercept, wing.lift.slope
        );
    }

    if let Some(path) = output {
        std::fs::write(path, serde_json::to_string_pretty(&model)?)?;
        println!("✓ Surrogate written to {}", path.display());
    }
    Ok(())
}

fn cmd_evaluate(project: Option<&Path>, model: Option<&Path>, alpha_deg: &[f64]) -> CliResult<()> {
    let surrogate: TrainedSurrogate = match (model, project) {
        (Some(path), _) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        (None, Some(path)) => train_project(&load_project(path)?)?,
        (None, None) => return Err(CliError::MissingSource),
    };
    print_evaluations(&surrogate, alpha_deg)
}

fn print_evaluations(surrogate: &TrainedSurrogate, alpha_deg: &[f64]) -> CliResult<()> {
    let angles: Vec<_> = alpha_deg.iter().map(|a| deg(*a)).collect();
    let outputs: Vec<SurrogateOutput> = surrogate.evaluate_many(&angles)?;

    println!("{:>9} {:>10} {:>10}", "alpha", "CL", "CDi");
    for (alpha, out) in alpha_deg.iter().zip(&outputs) {
        println!("{:>9.3} {:>10.5} {:>10.6}", alpha, out.lift, out.induced_drag);
        for wing in &out.wings {
            println!("{:>9} {:>10.5} {:>10}  {}", "", wing.lift, "", wing.tag);
        }
    }
    Ok(())
}

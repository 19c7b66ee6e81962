use clap::{Parser, Subcommand};
use eq_app::{AppResult, RunOptions, case_service, export, query, run_service};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "eq-cli")]
#[command(about = "Reservoir initial-state equilibration", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate case file syntax and structure
    Validate {
        /// Path to the case file (YAML or JSON)
        case_path: PathBuf,
    },
    /// List equilibration regions of a case
    Regions {
        /// Path to the case file (YAML or JSON)
        case_path: PathBuf,
    },
    /// Equilibrate a case
    Run {
        /// Path to the case file (YAML or JSON)
        case_path: PathBuf,
        /// Output CSV file path (optional, defaults to a summary on stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Solve regions one after another instead of in parallel
        #[arg(long)]
        sequential: bool,
    },
    /// Show the initial state of one cell
    Cell {
        /// Path to the case file (YAML or JSON)
        case_path: PathBuf,
        /// Cell index
        cell: usize,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { case_path } => cmd_validate(&case_path),
        Commands::Regions { case_path } => cmd_regions(&case_path),
        Commands::Run {
            case_path,
            output,
            sequential,
        } => cmd_run(&case_path, output.as_deref(), !sequential),
        Commands::Cell { case_path, cell } => cmd_cell(&case_path, cell),
    }
}

fn cmd_validate(case_path: &Path) -> AppResult<()> {
    println!("Validating case: {}", case_path.display());
    let case = case_service::load_case(case_path)?;
    case_service::validate_case(&case)?;

    let summary = case_service::summarize_case(&case);
    println!("✓ Case is valid");
    println!("  Name: {}", summary.name);
    println!("  Version: {}", summary.version);
    println!("  Phases: {}", summary.phases.join(", "));
    println!("  Cells: {}", summary.num_cells);
    println!("  Regions: {}", summary.num_regions);
    if let Some((top, bottom)) = case_service::depth_range(&case.grid) {
        println!("  Depths: {:.1} m to {:.1} m", top, bottom);
    }
    Ok(())
}

fn cmd_regions(case_path: &Path) -> AppResult<()> {
    let case = case_service::load_case(case_path)?;
    let regions = case_service::list_regions(&case);

    println!("Regions in case '{}':", case.name);
    for info in regions {
        println!(
            "  {:>3}: {:>6} cells  datum {:.1} m @ {:.4e} Pa  woc {:.1} m  goc {:.1} m{}",
            info.region,
            info.num_cells,
            info.datum_depth_m,
            info.datum_pressure_pa,
            info.woc_depth_m,
            info.goc_depth_m,
            if info.has_mixing { "  (mixing)" } else { "" }
        );
    }
    Ok(())
}

fn cmd_run(case_path: &Path, output: Option<&Path>, parallel: bool) -> AppResult<()> {
    tracing::info!(case = %case_path.display(), parallel, "running case");
    let state = run_service::run_case_file(case_path, &RunOptions { parallel })?;

    println!("✓ Equilibrated '{}'", state.case_name);
    println!("  Timestamp: {}", state.timestamp);
    println!("  Cells: {}", state.num_cells());
    println!("  Primary pressure: {}", state.formulation);
    println!(
        "  Time: compile {:.3}s, solve {:.3}s",
        state.compile_time_s, state.solve_time_s
    );

    for summary in query::region_summaries(&state) {
        println!(
            "  Region {:>3}: {:>6} cells, depth {:.1}..{:.1} m, mean p {:.4e} Pa, overlap {}, clamped {}, gas held {}{}",
            summary.region.index(),
            summary.num_cells,
            summary.depth_range.0,
            summary.depth_range.1,
            summary.mean_primary_pressure_pa,
            summary.overlap_cells,
            summary.clamped_cells,
            summary.gas_clamped_cells,
            if summary.closed_form {
                " (closed form)"
            } else {
                ""
            }
        );
    }

    if let Some(path) = output {
        export::export_csv(path, &state)?;
        println!("  Wrote {}", path.display());
    }
    Ok(())
}

fn cmd_cell(case_path: &Path, cell: usize) -> AppResult<()> {
    let state = run_service::run_case_file(case_path, &RunOptions::default())?;
    let summary = query::cell_summary(&state, cell)?;

    println!(
        "Cell {} (region {}, depth {:.2} m)",
        summary.cell, summary.region, summary.depth_m
    );
    for values in &summary.phases {
        println!(
            "  {:<5} p = {:.6e} Pa  s = {:.6}",
            values.phase.as_str(),
            values.pressure_pa,
            values.saturation
        );
    }
    println!("  primary p = {:.6e} Pa", summary.primary_pressure_pa);
    Ok(())
}

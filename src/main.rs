use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use toml::Table;

use aggsim::config::{BufferConfig, Config, SimConfig};
use aggsim::graph::VertexStore;
use aggsim::sim::{SimStatus, SimulationDriver};

#[derive(Parser)]
#[command(version, about)]
struct AggsimArgs {
    #[arg(help = "Path to config.toml")]
    config_path: PathBuf,
    #[arg(long, help = "Override vertex dataset path")]
    vertices: Option<PathBuf>,
    #[arg(long, help = "Override working-set capacity")]
    buffer_cap: Option<usize>,
    #[arg(long, help = "Override eviction threshold")]
    gamma: Option<u32>,
    #[arg(long, help = "Override round budget")]
    max_rounds: Option<usize>,
    #[arg(long, help = "Override parallel lane width")]
    lane_width: Option<u64>,
    #[arg(long, help = "Write the full JSON report to this path")]
    report: Option<PathBuf>,
}

pub fn main() -> anyhow::Result<()> {
    env_logger::init();

    let argv = AggsimArgs::parse();
    let config = fs::read_to_string(&argv.config_path)
        .with_context(|| format!("failed to read config file {:?}", argv.config_path))?;
    let config_table: Table = toml::from_str(&config).context("cannot parse config toml")?;
    let mut sim_config = SimConfig::from_section(config_table.get("sim"));
    let mut buffer_config = BufferConfig::from_section(config_table.get("buffer"));

    // override toml configs with argv
    sim_config.vertices = argv.vertices.unwrap_or(sim_config.vertices);
    sim_config.max_rounds = argv.max_rounds.unwrap_or(sim_config.max_rounds);
    sim_config.report = argv.report.or(sim_config.report);
    buffer_config.buffer_cap = argv.buffer_cap.unwrap_or(buffer_config.buffer_cap);
    buffer_config.gamma = argv.gamma.unwrap_or(buffer_config.gamma);
    buffer_config.lane_width = argv.lane_width.unwrap_or(buffer_config.lane_width);

    let store = VertexStore::load_path(&sim_config.vertices)
        .with_context(|| format!("failed to load vertices from {:?}", sim_config.vertices))?;
    let mut driver = SimulationDriver::new(store, &buffer_config, sim_config.max_rounds)?;
    let report = driver.simulate()?;

    match report.status {
        SimStatus::Converged { round } => {
            println!("all vertices processed in round {}", round);
        }
        _ => {
            println!(
                "completed {} rounds and could not process all vertices",
                report.rounds_completed
            );
        }
    }
    println!(
        "processed vertex count: {} / {}",
        report.processed_vertices, report.total_vertices
    );
    println!("estimated cycles: {}", report.total_cycles);
    println!("off-chip volume: {:.3} MiB", report.off_chip_volume_mib);

    if let Some(path) = &sim_config.report {
        let payload = serde_json::to_string_pretty(&report).context("cannot serialize report")?;
        fs::write(path, payload).with_context(|| format!("failed to write report {:?}", path))?;
    }
    Ok(())
}

use clap::{Parser, Subcommand};
use folio::config;
use folio::gui::app::AppModel;
use folio::report;
use folio::sys::runtime;
use orbit::{OrbitLayout, Theme};
use relm4::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "folio", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Start in this theme instead of the configured one
    #[arg(short = 't', long)]
    theme: Option<Theme>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Write the default configuration file if none exists and print its path
    InitConfig,
    /// Print the computed ring layout of each orbit
    Layout {
        /// Only print the orbit at this index
        #[arg(short = 'o', long)]
        orbit: Option<usize>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::InitConfig) => {
            let path = config::write_default_config()?;
            println!("{}", path.display());
            Ok(())
        }
        Some(Commands::Layout { orbit }) => print_layout(orbit),
        None => {
            run_app(cli.theme);
            Ok(())
        }
    }
}

fn print_layout(only: Option<usize>) -> anyhow::Result<()> {
    let config = config::load_or_default();
    let geometry = config.ring_geometry();
    let catalog = config.catalog();
    let systems = config.orbits.systems();

    if let Some(index) = only
        && index >= systems.len()
    {
        anyhow::bail!(
            "No orbit at index {} ({} configured)",
            index,
            systems.len()
        );
    }

    for (index, system) in systems.iter().enumerate() {
        if only.is_some_and(|o| o != index) {
            continue;
        }
        let layout = OrbitLayout::new(
            &system.rings,
            &geometry,
            system.base_duration_secs,
            &catalog,
            config.geometry.marker_radius,
        );
        print!("{}", report::layout_table(system, &layout));
    }
    Ok(())
}

fn run_app(theme: Option<Theme>) {
    let mut config = config::load_or_default();
    if let Some(theme) = theme {
        config.theme = theme;
    }

    let (tx, rx) = async_channel::bounded(32);
    let (jobs_tx, jobs_rx) = async_channel::bounded(8);

    // Start Background Services
    runtime::start_background_services(tx, jobs_rx);

    // GTK would otherwise try to parse our command line
    let app = RelmApp::new("org.folio.folio").with_args(Vec::new());

    app.run::<AppModel>((config, jobs_tx, rx));
}

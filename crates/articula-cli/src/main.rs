//! articula CLI - export, animate and inspect joint rigs

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use articula::mesh::export::{write_obj, write_stl};
use articula::{AnimationState, ArticulaConfig, HeadlessViewer, RigKind, Viewer};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

mod info;

#[derive(Parser)]
#[command(name = "articula")]
#[command(about = "Printable clearance-fit joints and their kinematic animation", long_about = None)]
struct Cli {
    /// Log at debug level regardless of RUST_LOG
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write every part of a rig, posed at one frame
    Export {
        /// Rig to build: hinge or chain
        #[arg(long)]
        rig: RigKind,
        /// Output directory
        #[arg(short, long)]
        out: PathBuf,
        /// Mesh format
        #[arg(long, value_enum, default_value_t = ExportFormat::Obj)]
        format: ExportFormat,
        /// Animation frame to pose the rig at
        #[arg(long, default_value_t = 0)]
        frame: u64,
        /// TOML file overriding the default dimensions
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Run a rig through the headless viewer
    Animate {
        /// Rig to build: hinge or chain
        #[arg(long)]
        rig: RigKind,
        /// Number of ticks to run
        #[arg(long, default_value_t = 240)]
        ticks: u64,
        /// Dump every tick as OBJ files into this directory
        #[arg(long)]
        dump: Option<PathBuf>,
        /// TOML file overriding the default dimensions
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print derived dimensions of a rig
    Info {
        /// Rig to build: hinge or chain
        #[arg(long)]
        rig: RigKind,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
        /// TOML file overriding the default dimensions
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ExportFormat {
    Obj,
    Stl,
}

impl ExportFormat {
    fn extension(self) -> &'static str {
        match self {
            ExportFormat::Obj => "obj",
            ExportFormat::Stl => "stl",
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Export {
            rig,
            out,
            format,
            frame,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            export_rig(rig, &config, &out, format, frame)?;
        }
        Commands::Animate {
            rig,
            ticks,
            dump,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            animate_rig(rig, &config, ticks, dump)?;
        }
        Commands::Info { rig, json, config } => {
            let config = load_config(config.as_deref())?;
            show_info(rig, &config, json)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    // stdout carries reports and JSON
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<ArticulaConfig> {
    match path {
        Some(path) => ArticulaConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(ArticulaConfig::default()),
    }
}

fn export_rig(
    rig: RigKind,
    config: &ArticulaConfig,
    out: &Path,
    format: ExportFormat,
    frame: u64,
) -> Result<()> {
    let mut driver = rig.build(config)?.into_driver()?;
    let mut scene = HeadlessViewer::new(0);
    driver.step(&AnimationState::at(frame), &mut scene)?;

    fs::create_dir_all(out)
        .with_context(|| format!("failed to create {}", out.display()))?;
    for (name, part) in scene.parts() {
        let path = out.join(format!("{name}.{}", format.extension()));
        match format {
            ExportFormat::Obj => write_obj(&part.solid, name, &path)?,
            ExportFormat::Stl => write_stl(&part.solid, &path)?,
        }
        tracing::debug!(
            part = %name,
            triangles = part.solid.num_triangles(),
            path = %path.display(),
            "wrote part"
        );
    }

    println!(
        "Exported {} parts of the {rig} rig at frame {frame} to {}",
        scene.parts().len(),
        out.display()
    );
    Ok(())
}

fn animate_rig(
    rig: RigKind,
    config: &ArticulaConfig,
    ticks: u64,
    dump: Option<PathBuf>,
) -> Result<()> {
    let driver = rig.build(config)?.into_driver()?;
    let mut viewer = HeadlessViewer::new(ticks);
    if let Some(dir) = dump {
        viewer = viewer.with_dump_dir(dir);
    }
    driver.attach(&mut viewer);
    viewer.run()?;

    println!(
        "Ran the {rig} rig for {} ticks ({} parts in scene)",
        viewer.ticks_run(),
        viewer.parts().len()
    );
    Ok(())
}

fn show_info(rig: RigKind, config: &ArticulaConfig, json: bool) -> Result<()> {
    let built = rig.build(config)?;
    let report = info::RigInfo::new(rig, &built);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }
    Ok(())
}

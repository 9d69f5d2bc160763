use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use deform_convert::{ConvertOptions, DEFAULT_BATCH_LABEL, MemoryScene, RigDocument};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "deform-convert", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Toggle selected segments between curve and envelope mode.
    Convert(ConvertArgs),
    /// Print the rest pose of every segment as JSON.
    Pose(PoseArgs),
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Input rig JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output rig JSON path.
    #[arg(long)]
    out: PathBuf,

    /// Node path to convert; groups convert every segment inside. Repeatable.
    /// Defaults to every root node.
    #[arg(long = "select")]
    select: Vec<String>,

    /// Undo label of the conversion batch.
    #[arg(long, default_value = DEFAULT_BATCH_LABEL)]
    label: String,
}

#[derive(Parser, Debug)]
struct PoseArgs {
    /// Input rig JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Convert(args) => cmd_convert(args),
        Command::Pose(args) => cmd_pose(args),
    }
}

fn load_scene(path: &std::path::Path) -> anyhow::Result<MemoryScene> {
    let doc = RigDocument::from_path(path)
        .with_context(|| format!("load rig '{}'", path.display()))?;
    MemoryScene::new(doc).with_context(|| format!("validate rig '{}'", path.display()))
}

fn cmd_convert(args: ConvertArgs) -> anyhow::Result<()> {
    let mut scene = load_scene(&args.in_path)?;
    let before = scene.poses();

    let selection = if args.select.is_empty() {
        scene.roots()
    } else {
        args.select
    };
    let opts = ConvertOptions {
        batch_label: args.label,
    };
    let report = deform_convert::convert_selection(&mut scene, &selection, &opts)?;

    for seg in &report.converted {
        eprintln!(
            "{}: {:?} -> {:?} ({} frame(s))",
            seg.name,
            seg.from,
            seg.to,
            seg.frames.len()
        );
    }
    for seg in &report.skipped {
        eprintln!("{}: skipped: {}", seg.name, seg.reason);
    }

    let after = scene.poses();
    let deviation = before
        .iter()
        .filter_map(|(path, pose)| after.get(path).map(|p| pose.max_deviation(p)))
        .fold(0.0, f64::max);

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    scene
        .document()
        .save(&args.out)
        .with_context(|| format!("write rig '{}'", args.out.display()))?;

    eprintln!(
        "converted {} segment(s), skipped {}; max control-point deviation {deviation:.6}",
        report.converted.len(),
        report.skipped.len()
    );
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_pose(args: PoseArgs) -> anyhow::Result<()> {
    let scene = load_scene(&args.in_path)?;
    let json = serde_json::to_string_pretty(&scene.poses()).context("serialize poses")?;
    println!("{json}");
    Ok(())
}

//! `protview` command line: molecule statistics, SVG projections and 3D
//! scene summaries.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use protview::bonds::{infer_bonds, DEFAULT_BOND_THRESHOLD};
use protview::canvas::{Canvas2d, CanvasHost, SvgCanvas};
use protview::color::ColorMapping;
use protview::options::Style;
use protview::structure::{parse_structure, MoleculeInfo};
use protview::{Host, Options, ProtviewError, Viewer};
use rustc_hash::FxHashMap;

const TOP_ID: &str = "top";
const SIDE_ID: &str = "side";
const SCENE_ID: &str = "scene";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Render protein structures from PDB files as 2D projections \
             and inspect the 3D scene."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print molecule statistics.
    Info(InfoArgs),
    /// Write the top and side projections as SVG files.
    Render(ViewArgs),
    /// Build the 3D scene and print its summary as JSON.
    Scene(ViewArgs),
    /// List the TOML option presets in a directory.
    Presets(PresetArgs),
}

#[derive(Args, Debug)]
struct PresetArgs {
    /// Directory holding `*.toml` presets.
    #[arg(default_value = ".", value_name = "DIR")]
    dir: PathBuf,
}

#[derive(Args, Debug)]
struct InfoArgs {
    /// PDB file.
    file: PathBuf,

    /// Bond distance threshold in Ångström.
    #[arg(long, value_name = "FLOAT")]
    threshold: Option<f32>,
}

#[derive(Args, Debug)]
struct ViewArgs {
    /// PDB file.
    file: PathBuf,

    /// Output directory for the SVG files.
    #[arg(short, long, default_value = ".", value_name = "DIR")]
    out: PathBuf,

    /// Canvas or container width in pixels.
    #[arg(long, default_value_t = 800.0)]
    width: f32,

    /// Canvas or container height in pixels.
    #[arg(long, default_value_t = 600.0)]
    height: f32,

    /// TOML options preset.
    #[arg(long, value_name = "PATH")]
    options: Option<PathBuf>,

    /// Representation (ball-and-stick, protein-ribbon, space-fill).
    #[arg(long)]
    style: Option<Style>,

    /// Color mode (atom, bfactor, residue).
    #[arg(long)]
    color: Option<ColorMapping>,

    /// Bond distance threshold in Ångström.
    #[arg(long, value_name = "FLOAT")]
    threshold: Option<f32>,

    /// Draw atom labels.
    #[arg(long)]
    labels: bool,

    /// Write the resolved options to a TOML preset.
    #[arg(long, value_name = "PATH")]
    save_options: Option<PathBuf>,
}

impl ViewArgs {
    fn resolve_options(&self) -> Result<Options, ProtviewError> {
        let mut options = match &self.options {
            Some(path) => Options::load(path)?,
            None => Options::default(),
        };
        let vis = &mut options.visualization;
        if let Some(style) = self.style {
            vis.style = style;
        }
        if let Some(color) = self.color {
            vis.color_mapping = color;
        }
        if let Some(threshold) = self.threshold {
            vis.bond_threshold = threshold;
        }
        vis.show_labels |= self.labels;
        options.validate()?;
        if let Some(path) = &self.save_options {
            options.save(path)?;
            log::info!("saved options to {}", path.display());
        }
        Ok(options)
    }
}

/// Two SVG canvases plus one fixed-size 3D container.
struct SvgPage {
    canvases: FxHashMap<String, SvgCanvas>,
    container: (f32, f32),
}

impl SvgPage {
    fn new(width: f32, height: f32) -> Self {
        let canvases = [TOP_ID, SIDE_ID]
            .into_iter()
            .map(|id| (id.to_owned(), SvgCanvas::new(width, height)))
            .collect();
        Self {
            canvases,
            container: (width, height),
        }
    }
}

impl CanvasHost for SvgPage {
    fn canvas(&mut self, id: &str) -> Option<&mut dyn Canvas2d> {
        let canvas: &mut dyn Canvas2d = self.canvases.get_mut(id)?;
        Some(canvas)
    }
}

impl Host for SvgPage {
    fn container_size(&self, id: &str) -> Option<(f32, f32)> {
        (id == SCENE_ID).then_some(self.container)
    }
}

fn info(args: &InfoArgs) -> Result<(), ProtviewError> {
    let text = fs::read_to_string(&args.file)?;
    let threshold = args.threshold.unwrap_or(DEFAULT_BOND_THRESHOLD);
    let structure = parse_structure(&text);
    let bonds = infer_bonds(structure.atoms(), threshold);
    let info = MoleculeInfo::compute(&structure, &bonds);
    writeln!(io::stdout(), "{}", info.summary())?;
    Ok(())
}

fn render(args: &ViewArgs) -> Result<(), ProtviewError> {
    let options = args.resolve_options()?;
    let text = fs::read_to_string(&args.file)?;
    let vis = options.visualization.clone();
    let mut viewer = Viewer::new(options);
    let mut page = SvgPage::new(args.width, args.height);
    let report = viewer.render_2d(&mut page, &text, TOP_ID, SIDE_ID, &vis)?;
    log::info!("top: {:?}, side: {:?}", report.top, report.side);

    fs::create_dir_all(&args.out)?;
    for id in [TOP_ID, SIDE_ID] {
        let Some(canvas) = page.canvases.get(id) else {
            continue;
        };
        let path = args.out.join(format!("{id}.svg"));
        svg::save(&path, &canvas.document())?;
        log::info!("wrote {}", path.display());
    }
    Ok(())
}

fn scene(args: &ViewArgs) -> Result<(), ProtviewError> {
    let options = args.resolve_options()?;
    let text = fs::read_to_string(&args.file)?;
    let vis = options.visualization.clone();
    let mut viewer = Viewer::new(options);
    let mut page = SvgPage::new(args.width, args.height);
    let outcome = viewer.load_3d(&mut page, &text, SCENE_ID, &vis)?;
    log::info!("scene: {outcome:?}");
    let Some(scene) = viewer.scene() else {
        return Ok(());
    };
    let json =
        serde_json::to_string_pretty(&scene.summary()).map_err(io::Error::from)?;
    writeln!(io::stdout(), "{json}")?;
    Ok(())
}

fn presets(args: &PresetArgs) -> Result<(), ProtviewError> {
    let mut stdout = io::stdout().lock();
    for name in Options::list_presets(&args.dir) {
        writeln!(stdout, "{name}")?;
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    let result = match &cli.command {
        Command::Info(args) => info(args),
        Command::Render(args) => render(args),
        Command::Scene(args) => scene(args),
        Command::Presets(args) => presets(args),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view_args(argv: &[&str]) -> ViewArgs {
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Render(args) | Command::Scene(args) => args,
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn saved_options_are_listed_as_presets() {
        let dir = std::env::temp_dir()
            .join(format!("protview-cli-presets-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        let preset = dir.join("ribbon.toml");
        let args = view_args(&[
            "protview",
            "render",
            "1crn.pdb",
            "--style",
            "protein-ribbon",
            "--save-options",
            preset.to_str().unwrap(),
        ]);
        let resolved = args.resolve_options().unwrap();
        assert_eq!(resolved.visualization.style, Style::ProteinRibbon);
        assert_eq!(Options::list_presets(&dir), vec!["ribbon"]);

        let reloaded = view_args(&[
            "protview",
            "scene",
            "1crn.pdb",
            "--options",
            preset.to_str().unwrap(),
        ])
        .resolve_options()
        .unwrap();
        assert_eq!(reloaded, resolved);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn presets_defaults_to_current_directory() {
        let Command::Presets(args) =
            Cli::try_parse_from(["protview", "presets"]).unwrap().command
        else {
            panic!("expected presets");
        };
        assert_eq!(args.dir, PathBuf::from("."));
    }
}

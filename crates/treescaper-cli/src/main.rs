use serde::Serialize;
use std::io::{Read, Write};
use std::path::Path;
use treescaper_core::ScaperConfig;
use treescaper_layout::Scene;
use treescaper_layout::export::{export_path_for, export_to_file, export_value};
use treescaper_layout::svg::SvgRenderOptions;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Input(treescaper_core::Error),
    Layout(treescaper_layout::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Input(err) => write!(f, "{err}"),
            CliError::Layout(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<treescaper_core::Error> for CliError {
    fn from(value: treescaper_core::Error) -> Self {
        Self::Input(value)
    }
}

impl From<treescaper_layout::Error> for CliError {
    fn from(value: treescaper_layout::Error) -> Self {
        Self::Layout(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Layout,
    Render,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    config: Option<String>,
    zoom_in: i32,
    zoom_out: i32,
    pan: Option<(f64, f64)>,
    pretty: bool,
    export: bool,
    window: bool,
    diagram_id: Option<String>,
    out: Option<String>,
}

fn usage() -> &'static str {
    "treescaper-cli\n\
\n\
USAGE:\n\
  treescaper-cli [layout] [--pretty] [--export] [OPTIONS] [<path>|-]\n\
  treescaper-cli render [--window] [--id <diagram-id>] [--out <path>] [--export] [OPTIONS] [<path>|-]\n\
\n\
OPTIONS:\n\
  --config <path>      YAML config (defaults apply to missing keys)\n\
  --zoom-in <n>        zoom in n steps from the configured start level\n\
  --zoom-out <n>       zoom out n steps from the configured start level\n\
  --pan <dx>,<dy>      pan by whole scroll steps\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', the JSON tree is read from stdin.\n\
  - layout prints the measured tree as JSON.\n\
  - render prints SVG to stdout by default; use --out to write a file.\n\
  - render fits the viewBox to the tree; --window uses the configured window instead.\n\
  - --export writes <stem>_export.json next to the input file.\n\
  - Set TREESCAPER_LOG (e.g. debug) to see layout logs on stderr.\n\
"
}

fn parse_steps(value: Option<&String>) -> Result<i32, CliError> {
    let Some(value) = value else {
        return Err(CliError::Usage(usage()));
    };
    let steps = value
        .parse::<i32>()
        .map_err(|_| CliError::Usage(usage()))?;
    if steps < 0 {
        return Err(CliError::Usage(usage()));
    }
    Ok(steps)
}

fn parse_pan(value: &str) -> Option<(f64, f64)> {
    let (dx, dy) = value.split_once(',')?;
    let dx = dx.trim().parse::<f64>().ok()?;
    let dy = dy.trim().parse::<f64>().ok()?;
    (dx.is_finite() && dy.is_finite()).then_some((dx, dy))
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "layout" => args.command = Command::Layout,
            "render" => args.command = Command::Render,
            "--pretty" => args.pretty = true,
            "--export" => args.export = true,
            "--window" => args.window = true,
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--zoom-in" => args.zoom_in = parse_steps(it.next())?,
            "--zoom-out" => args.zoom_out = parse_steps(it.next())?,
            "--pan" => {
                let Some(pan) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.pan = Some(parse_pan(pan).ok_or(CliError::Usage(usage()))?);
            }
            "--id" => {
                let Some(id) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.diagram_id = Some(id.clone());
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    if args.export && matches!(args.input.as_deref(), None | Some("-")) {
        return Err(CliError::Usage("--export needs an input file path"));
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn load_config(path: Option<&str>) -> Result<ScaperConfig, CliError> {
    match path {
        None => Ok(ScaperConfig::default()),
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            Ok(ScaperConfig::from_yaml_str(&text)?)
        }
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut stdout, value)?;
    } else {
        serde_json::to_writer(&mut stdout, value)?;
    }
    writeln!(stdout)?;
    Ok(())
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None | Some("-") => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("TREESCAPER_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_scene(args: &Args, text: &str) -> Result<Scene, CliError> {
    let tree = treescaper_core::parse_tree(text)?;
    let config = load_config(args.config.as_deref())?;
    let mut scene = Scene::new(tree, config);
    scene.relayout()?;

    // Step counts may be huge; `set_zoom_level` clamps into the configured range.
    let target = scene
        .zoom()
        .level()
        .saturating_add(args.zoom_in)
        .saturating_sub(args.zoom_out);
    scene.set_zoom_level(target)?;
    if let Some((dx, dy)) = args.pan {
        scene.scroll(dx, dy);
    }
    tracing::debug!(
        zoom = scene.zoom().level(),
        nodes = scene.tree().node_count(),
        "scene ready"
    );
    Ok(scene)
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let scene = build_scene(&args, &text)?;
    let Some(layout) = scene.layout() else {
        return Err(CliError::Usage("layout pass produced no result"));
    };

    if args.export {
        if let Some(input) = args.input.as_deref() {
            let path = export_path_for(Path::new(input));
            export_to_file(layout, &path)?;
            tracing::info!(path = %path.display(), "wrote layout export");
        }
    }

    match args.command {
        Command::Layout => write_json(&export_value(layout)?, args.pretty),
        Command::Render => {
            let options = SvgRenderOptions {
                diagram_id: args.diagram_id.clone(),
                viewport: args.window.then(|| scene.viewport().bounds()),
                ..Default::default()
            };
            let Some(svg) = scene.render_svg(&options) else {
                return Err(CliError::Usage("layout pass produced no result"));
            };
            write_text(&svg, args.out.as_deref())
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    init_tracing();

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(items: &[&str]) -> Vec<String> {
        std::iter::once("treescaper-cli")
            .chain(items.iter().copied())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn parses_render_options() {
        let args = parse_args(&argv(&[
            "render",
            "--zoom-in",
            "2",
            "--pan",
            "-1.5, 3",
            "--window",
            "tree.json",
        ]))
        .unwrap();
        assert!(matches!(args.command, Command::Render));
        assert_eq!(args.zoom_in, 2);
        assert_eq!(args.pan, Some((-1.5, 3.0)));
        assert!(args.window);
        assert_eq!(args.input.as_deref(), Some("tree.json"));
    }

    #[test]
    fn zoom_steps_accept_the_full_i32_range() {
        let args = parse_args(&argv(&[
            "--zoom-in",
            "2147483647",
            "--zoom-out",
            "2147483647",
        ]))
        .unwrap();
        assert_eq!(args.zoom_in, i32::MAX);
        assert_eq!(args.zoom_out, i32::MAX);
    }

    #[test]
    fn rejects_bad_arguments() {
        let cases: [&[&str]; 6] = [
            &["--pan", "1"],
            &["--zoom-out", "-2"],
            &["--bogus"],
            &["a.json", "b.json"],
            &["--export"],
            &["--export", "-"],
        ];
        for bad in cases {
            assert!(
                matches!(parse_args(&argv(bad)), Err(CliError::Usage(_))),
                "{bad:?}"
            );
        }
    }
}

//! Subcommand implementations.

use crate::cli::{Cli, Command, OutputArgs};
use crate::error::{AppError, AppResult};
use crate::script::Script;
use sketchpad_core::canvas::Canvas;
use sketchpad_core::config::{CanvasConfig, ExportFormat};
use sketchpad_core::document::SketchDocument;
use sketchpad_render::{export, ExportArtifact};
use std::fs;
use std::path::{Path, PathBuf};

/// Run a parsed command line. Returns the written files.
pub fn run(cli: Cli) -> AppResult<Vec<PathBuf>> {
    match cli.command {
        Command::Export { input, output } => export_document(&input, &output),
        Command::Replay { script, output } => replay_script(&script, &output),
    }
}

/// Load a structured drawing and write it in the requested formats.
pub fn export_document(input: &Path, output: &OutputArgs) -> AppResult<Vec<PathBuf>> {
    let config = match &output.config {
        Some(path) => load_config(path)?,
        None => CanvasConfig::default(),
    };
    let document = SketchDocument::from_json(&read_text(input)?)?;
    log::info!(
        "Loaded {} with {} strokes",
        input.display(),
        document.strokes.len()
    );

    let mut canvas = Canvas::new(config, output.container)?;
    canvas.load_document(document)?;
    write_exports(&canvas, output)
}

/// Replay a script against a fresh canvas and export the result.
///
/// A configuration file given on the command line takes precedence over one
/// embedded in the script.
pub fn replay_script(path: &Path, output: &OutputArgs) -> AppResult<Vec<PathBuf>> {
    let script = Script::from_json(&read_text(path)?)?;
    let config = match (&output.config, &script.config) {
        (Some(file), _) => load_config(file)?,
        (None, Some(embedded)) => embedded.clone(),
        (None, None) => CanvasConfig::default(),
    };

    let mut canvas = Canvas::new(config, output.container)?;
    let summary = script.run(&mut canvas)?;
    log::info!(
        "Replayed {} steps from {}; {} strokes on canvas",
        summary.steps,
        path.display(),
        canvas.store().len()
    );
    write_exports(&canvas, output)
}

pub fn load_config(path: &Path) -> AppResult<CanvasConfig> {
    Ok(CanvasConfig::from_json(&read_text(path)?)?)
}

fn read_text(path: &Path) -> AppResult<String> {
    fs::read_to_string(path).map_err(|source| AppError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn write_exports(canvas: &Canvas, output: &OutputArgs) -> AppResult<Vec<PathBuf>> {
    let format = output
        .format
        .map(ExportFormat::from)
        .unwrap_or(canvas.config().export_format);
    let artifacts = export(canvas, format)?;
    write_artifacts(&artifacts, &output.out_dir)
}

/// Write each artifact under its default file name.
pub fn write_artifacts(artifacts: &[ExportArtifact], out_dir: &Path) -> AppResult<Vec<PathBuf>> {
    fs::create_dir_all(out_dir).map_err(|source| AppError::Write {
        path: out_dir.to_path_buf(),
        source,
    })?;

    artifacts
        .iter()
        .map(|artifact| {
            let path = out_dir.join(artifact.file_name());
            fs::write(&path, artifact.as_bytes()).map_err(|source| AppError::Write {
                path: path.clone(),
                source,
            })?;
            log::info!("Wrote {} ({})", path.display(), artifact.mime_type());
            Ok(path)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::FormatArg;
    use kurbo::Point;
    use sketchpad_core::color::SerializableColor;
    use sketchpad_core::stroke::Stroke;
    use sketchpad_core::tools::ToolKind;
    use tempfile::TempDir;

    fn output(dir: &Path, format: Option<FormatArg>) -> OutputArgs {
        OutputArgs {
            format,
            out_dir: dir.join("out"),
            config: None,
            container: None,
        }
    }

    fn write_document(dir: &Path) -> PathBuf {
        let document = SketchDocument::new(120.0, 80.0, SerializableColor::white()).with_strokes(vec![
            Stroke::from_points(
                ToolKind::Pen,
                SerializableColor::black(),
                5.0,
                vec![Point::new(10.0, 10.0), Point::new(60.0, 40.0), Point::new(110.0, 20.0)],
            )
            .unwrap(),
        ]);
        let path = dir.join("drawing.json");
        fs::write(&path, document.to_json().unwrap()).unwrap();
        path
    }

    #[test]
    fn test_export_writes_both_formats() {
        let dir = TempDir::new().unwrap();
        let input = write_document(dir.path());

        let written = export_document(&input, &output(dir.path(), Some(FormatArg::Both))).unwrap();
        let names: Vec<_> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["sketch.svg", "sketch.png"]);

        let svg = fs::read_to_string(&written[0]).unwrap();
        assert!(svg.contains(r#"width="120""#));
        let png = fs::read(&written[1]).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }

    #[test]
    fn test_export_defaults_to_config_format() {
        let dir = TempDir::new().unwrap();
        let input = write_document(dir.path());
        let config_path = dir.path().join("config.json");
        fs::write(&config_path, r#"{"exportFormat": "json"}"#).unwrap();

        let mut args = output(dir.path(), None);
        args.config = Some(config_path);
        let written = export_document(&input, &args).unwrap();
        assert_eq!(written.len(), 1);

        let round_trip = SketchDocument::from_json(&fs::read_to_string(&written[0]).unwrap()).unwrap();
        let original = SketchDocument::from_json(&fs::read_to_string(&input).unwrap()).unwrap();
        assert_eq!(round_trip, original);
    }

    #[test]
    fn test_replay_script() {
        let dir = TempDir::new().unwrap();
        let script_path = dir.path().join("script.json");
        fs::write(
            &script_path,
            r#"{
                "config": {"width": 200, "height": 100, "exportFormat": "json"},
                "steps": [
                    {"type": "tool", "tool": "ruler"},
                    {"type": "down", "position": {"x": 0, "y": 0}},
                    {"type": "move", "position": {"x": 10, "y": 1}},
                    {"type": "up", "position": {"x": 10, "y": 1}}
                ]
            }"#,
        )
        .unwrap();

        let written = replay_script(&script_path, &output(dir.path(), None)).unwrap();
        let document = SketchDocument::from_json(&fs::read_to_string(&written[0]).unwrap()).unwrap();
        assert_eq!(document.width, 200.0);
        assert_eq!(document.strokes.len(), 1);
        assert_eq!(document.strokes[0].tool, ToolKind::Pen);
        assert!(document.strokes[0].points[1].y.abs() < 1e-9);
    }

    #[test]
    fn test_missing_input_reports_path() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.json");
        let err = export_document(&missing, &output(dir.path(), None)).unwrap_err();
        assert!(matches!(err, AppError::Read { ref path, .. } if path == &missing));
    }

    #[test]
    fn test_percentage_config_needs_container() {
        let dir = TempDir::new().unwrap();
        let input = write_document(dir.path());
        let config_path = dir.path().join("config.json");
        fs::write(&config_path, r#"{"width": "50%"}"#).unwrap();

        let mut args = output(dir.path(), Some(FormatArg::Svg));
        args.config = Some(config_path);
        assert!(matches!(
            export_document(&input, &args),
            Err(AppError::Canvas(_))
        ));

        args.container = Some(kurbo::Size::new(400.0, 400.0));
        assert!(export_document(&input, &args).is_ok());
    }
}

//! Command line interface
//!
//! Without a subcommand the GUI starts. `compose` runs the same
//! compositor headless and writes the PNG directly.

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::compose::export::{suggested_file_name, write_png};
use crate::compose::{compose, Layering};
use crate::config::Settings;
use crate::error::{FrameError, Result};
use crate::frames::{load_frame_file, FrameCatalog};
use crate::photo::loader::{is_supported, load_photo_blocking};
use crate::state::data::FrameId;
use crate::state::edit::Adjustments;

#[derive(Parser, Debug)]
#[command(name = "mahdiyya-frame", version, about = "Mahdiyya Meet frame generator")]
pub struct Cli {
    /// Settings file (defaults to the user config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Composite a photo with a frame and write a PNG
    Compose(ComposeArgs),
    /// List the bundled frames
    Frames,
}

#[derive(Args, Debug)]
pub struct ComposeArgs {
    /// Photo to place behind the frame; omit to export the frame alone
    #[arg(long, value_name = "FILE")]
    pub photo: Option<PathBuf>,

    /// Bundled frame (see `frames`); defaults to the configured frame
    #[arg(long, value_name = "ID", conflicts_with = "frame_file")]
    pub frame: Option<String>,

    /// Use a frame image from disk instead of a bundled one
    #[arg(long, value_name = "FILE")]
    pub frame_file: Option<PathBuf>,

    /// Scale factor (0.5 to 2.0)
    #[arg(long, default_value_t = 1.0)]
    pub scale: f32,

    /// Horizontal offset in pixels (-100 to 100)
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub offset_x: i32,

    /// Vertical offset in pixels (-100 to 100)
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub offset_y: i32,

    /// Draw the frame first and clip the photo to the content area
    #[arg(long)]
    pub clipped: bool,

    /// Output file (defaults to mahdiyya-meet-framed.png / mahdiyya-meet-frame.png)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Run a subcommand and map the result to an exit code
pub fn run(command: Command, config: Option<&Path>) -> ExitCode {
    let settings = match Settings::load(config) {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("Failed to load settings: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = match command {
        Command::Compose(args) => run_compose(&args, &settings).map(|path| {
            println!("{}", path.display());
        }),
        Command::Frames => {
            for id in FrameId::ALL {
                println!("{:<10} {}", id.key(), id.label());
            }
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Headless composite; returns the written path
pub fn run_compose(args: &ComposeArgs, settings: &Settings) -> Result<PathBuf> {
    let adjustments = Adjustments::checked(args.scale, args.offset_x, args.offset_y)?;

    if let Some(path) = args.photo.as_deref().filter(|p| !is_supported(p)) {
        log::warn!("{} does not look like a photo, trying anyway", path.display());
    }
    let photo = args
        .photo
        .as_deref()
        .map(load_photo_blocking)
        .transpose()?;

    let frame = match (&args.frame_file, &args.frame) {
        (Some(path), _) => std::sync::Arc::new(load_frame_file(path)?),
        (None, Some(key)) => FrameCatalog::new().get(key.parse()?)?,
        (None, None) => {
            let id = settings.default_frame.ok_or(FrameError::NoFrameSelected)?;
            FrameCatalog::new().get(id)?
        }
    };

    let layering = if args.clipped {
        Layering::ClippedOverlay
    } else {
        settings.layering
    };

    let image = compose(
        photo.as_ref().map(|p| p.pixels.as_ref()),
        &frame,
        &adjustments,
        layering,
    );

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(suggested_file_name(photo.is_some())));
    write_png(&image, &output)?;

    log::info!(
        "💾 Wrote {}x{} composite to {}",
        image.width(),
        image.height(),
        output.display()
    );
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn parse(args: &[&str]) -> ComposeArgs {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Some(Command::Compose(args)) => args,
            other => panic!("expected compose, got {:?}", other),
        }
    }

    fn settings() -> Settings {
        Settings {
            export_dir: None,
            ..Settings::default()
        }
    }

    #[test]
    fn test_parse_negative_offsets() {
        let args = parse(&[
            "mahdiyya-frame",
            "compose",
            "--frame",
            "classic",
            "--scale",
            "1.5",
            "--offset-x",
            "-40",
            "--offset-y",
            "25",
        ]);
        assert_eq!(args.frame.as_deref(), Some("classic"));
        assert_eq!(args.scale, 1.5);
        assert_eq!((args.offset_x, args.offset_y), (-40, 25));
        assert!(!args.clipped);
    }

    #[test]
    fn test_frame_and_frame_file_conflict() {
        let result = Cli::try_parse_from([
            "mahdiyya-frame",
            "compose",
            "--frame",
            "classic",
            "--frame-file",
            "x.png",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_no_subcommand_means_gui() {
        let cli = Cli::try_parse_from(["mahdiyya-frame"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_compose_photo_into_bundled_frame() {
        let dir = tempfile::tempdir().unwrap();
        let photo_path = dir.path().join("me.png");
        RgbaImage::from_pixel(400, 300, Rgba([0, 128, 255, 255]))
            .save(&photo_path)
            .unwrap();
        let output = dir.path().join("out.png");

        let mut args = parse(&["mahdiyya-frame", "compose", "--frame", "blossom"]);
        args.photo = Some(photo_path);
        args.output = Some(output.clone());

        let written = run_compose(&args, &settings()).unwrap();
        assert_eq!(written, output);

        let result = image::open(&output).unwrap().to_rgba8();
        assert_eq!(result.dimensions(), (800, 800));
        // Blossom frame is see-through in the middle, so the photo shows
        assert_eq!(*result.get_pixel(400, 400), Rgba([0, 128, 255, 255]));
    }

    #[test]
    fn test_compose_with_frame_file_and_clipping() {
        let dir = tempfile::tempdir().unwrap();
        let frame_path = dir.path().join("frame.png");
        RgbaImage::from_pixel(200, 100, Rgba([9, 9, 9, 255]))
            .save(&frame_path)
            .unwrap();
        let output = dir.path().join("frame-only.png");

        let mut args = parse(&["mahdiyya-frame", "compose", "--clipped"]);
        args.frame_file = Some(frame_path);
        args.output = Some(output.clone());

        run_compose(&args, &settings()).unwrap();
        let result = image::open(&output).unwrap().to_rgba8();
        assert_eq!(result.dimensions(), (200, 100));
        assert_eq!(*result.get_pixel(100, 50), Rgba([9, 9, 9, 255]));
    }

    #[test]
    fn test_compose_without_any_frame_fails() {
        let settings = Settings {
            default_frame: None,
            ..settings()
        };
        let args = parse(&["mahdiyya-frame", "compose"]);
        assert!(matches!(
            run_compose(&args, &settings),
            Err(FrameError::NoFrameSelected)
        ));
    }

    #[test]
    fn test_compose_rejects_out_of_range_scale() {
        let args = parse(&["mahdiyya-frame", "compose", "--scale", "3.0"]);
        assert!(matches!(
            run_compose(&args, &settings()),
            Err(FrameError::InvalidAdjustment(_))
        ));
    }

    #[test]
    fn test_compose_rejects_unknown_frame() {
        let args = parse(&["mahdiyya-frame", "compose", "--frame", "neon"]);
        assert!(matches!(
            run_compose(&args, &settings()),
            Err(FrameError::UnknownFrame(_))
        ));
    }
}

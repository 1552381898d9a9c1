#![deny(future_incompatible)]
#![deny(nonstandard_style)]
#![deny(clippy::pedantic)]
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::wildcard_imports
)]

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{bail, ensure, Context, Result};
use clap::Parser;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

#[macro_use]
extern crate log;

mod check;
mod exhibit;
mod font;
mod layout;
mod settings;
mod text;

use font::Typeface;
use layout::Size;
use settings::{Overrides, RenderSettings};
use text::{MissingInputError, TextBlock};

//
// Outcome
//

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Outcome {
    Done,
    SizeExceeded,
    MissingInput,
}

impl From<Outcome> for ExitCode {
    fn from(value: Outcome) -> Self {
        match value {
            Outcome::Done => ExitCode::SUCCESS,
            Outcome::SizeExceeded => ExitCode::from(1),
            // -1 as seen by the shell.
            Outcome::MissingInput => ExitCode::from(255),
        }
    }
}

//
// Args
//

/// Exhibit creator - convert text to image.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Input text file.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output image file, format is picked from the extension.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Check whether the rendered exhibit would exceed the maximum size.
    #[arg(short, long)]
    check: bool,

    /// Render the exhibit into the output file.
    #[arg(short, long)]
    render: bool,

    /// Font file (TTF or OTF), omit for the built-in font.
    #[arg(short, long)]
    fontfile: Option<PathBuf>,

    /// Font size in pixels.
    #[arg(short = 's', long)]
    fontsize: Option<u32>,

    /// Literal text, rendered as a single line. Takes priority over --input.
    #[arg(short, long)]
    text: Option<String>,

    /// Border thickness in pixels.
    #[arg(short, long)]
    border: Option<u32>,

    /// Padding between border and text in pixels.
    #[arg(short, long)]
    padding: Option<u32>,

    /// Explicit output width.
    #[arg(short = 'x', long)]
    width: Option<u32>,

    /// Explicit output height.
    #[arg(short = 'y', long)]
    height: Option<u32>,

    /// Maximum allowed width for --check.
    #[arg(long, visible_alias = "mw")]
    maxwidth: Option<u32>,

    /// Maximum allowed height for --check.
    #[arg(long, visible_alias = "mh")]
    maxheight: Option<u32>,

    /// RON file with default render settings, flags take priority.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Turn on debugging.
    #[arg(short, long)]
    debug: bool,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            border: self.border,
            padding: self.padding,
            fontfile: self.fontfile.clone(),
            fontsize: self.fontsize,
            width: self.width,
            height: self.height,
        }
    }

    fn maximum(&self) -> Size {
        Size {
            w: self.maxwidth.unwrap_or(u32::MAX),
            h: self.maxheight.unwrap_or(u32::MAX),
        }
    }
}

//
// Main
//

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(args.debug);
    debug!("Arguments: {args:#?}");
    Ok(run(&args)?.into())
}

fn init_logging(debug: bool) {
    let level = if debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
    debug!("Enabled debugging");
}

fn run(args: &Args) -> Result<Outcome> {
    if !args.check && !args.render {
        warn!("Nothing to do, pass --check and/or --render");
        return Ok(Outcome::Done);
    }

    // Resolve settings.
    let overrides = match &args.config {
        Some(path) => args.overrides().or(settings::read_from_file(path)?),
        None => args.overrides(),
    };
    let settings = RenderSettings::from_overrides(overrides);
    if settings.is_auto_scale() {
        debug!("Auto-scale: size is derived from the text");
    } else {
        debug!(
            "Explicit size {:?}x{:?} does not affect the layout",
            settings.width, settings.height
        );
    }

    // Load text.
    let text = match TextBlock::from_sources(args.text.as_deref(), args.input.as_deref()) {
        Ok(text) => text,
        Err(err) if err.is::<MissingInputError>() => {
            error!("{err}");
            return Ok(Outcome::MissingInput);
        }
        Err(err) => return Err(err),
    };
    debug!("Loaded {} line(s)", text.line_count());

    // Check.
    if args.check && check::exceeds_maximum(text.lines(), &settings, args.maximum())? {
        return Ok(Outcome::SizeExceeded);
    }

    // Render.
    if args.render {
        let Some(output) = &args.output else {
            bail!("--render requires --output");
        };
        let exhibit = exhibit::render(text.lines(), &settings)?;
        exhibit.save(output)?;
        info!("Wrote {} to {}", exhibit.size(), output.display());
    }

    Ok(Outcome::Done)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags() {
        let args = Args::try_parse_from([
            "exhibit", "-r", "-t", "Hi", "-b", "2", "-p", "3", "-o", "out.png", "--mw", "100",
        ])
        .unwrap();
        assert!(args.render);
        assert!(!args.check);
        assert_eq!(args.text.as_deref(), Some("Hi"));
        assert_eq!(args.border, Some(2));
        assert_eq!(args.padding, Some(3));
        assert_eq!(args.maximum(), Size { w: 100, h: u32::MAX });
    }

    #[test]
    fn rejects_non_integer_settings() {
        assert!(Args::try_parse_from(["exhibit", "-b", "thick"]).is_err());
        assert!(Args::try_parse_from(["exhibit", "-p", "-1"]).is_err());
    }

    #[test]
    fn missing_input_exits_with_255() {
        let args = Args::try_parse_from(["exhibit", "-r", "-o", "out.png"]).unwrap();
        assert_eq!(run(&args).unwrap(), Outcome::MissingInput);
    }

    #[test]
    fn check_exit_code_follows_verdict() {
        let args = Args::try_parse_from(["exhibit", "-c", "-t", "Hi", "--mw", "0"]).unwrap();
        assert_eq!(run(&args).unwrap(), Outcome::SizeExceeded);

        let args = Args::try_parse_from(["exhibit", "-c", "-t", "Hi"]).unwrap();
        assert_eq!(run(&args).unwrap(), Outcome::Done);
    }

    #[test]
    fn render_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("exhibit.png");
        let args = Args::try_parse_from([
            "exhibit",
            "-r",
            "-t",
            "Hi",
            "-b",
            "1",
            "-o",
            output.to_str().unwrap(),
        ])
        .unwrap();
        assert_eq!(run(&args).unwrap(), Outcome::Done);
        let image = imagelib::open(&output).unwrap().into_rgb8();
        assert_eq!(image.get_pixel(0, 0), &exhibit::INK);
    }
}

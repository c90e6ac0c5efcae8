//! Command line arguments and output path derivation

use clap::Parser;
use slidelines_core::TemplateSizing;
use std::path::{Path, PathBuf};

/// Suffix that replaces `.pdf` in the derived output name
const OUTPUT_SUFFIX: &str = "_with_lines.pdf";

#[derive(Parser, Debug)]
#[command(name = "slidelines")]
#[command(
    version,
    about = "Create a copy of a PDF with a page with lines on it after each page of the original PDF"
)]
pub struct Args {
    /// The filename of the input PDF
    pub filename: PathBuf,

    /// The number of lines to add to each line page
    #[arg(short = 'n', long = "numlines", default_value_t = 7, allow_negative_numbers = true)]
    pub num_lines: i64,

    /// The thickness of each line
    #[arg(short = 't', long = "thickness", default_value_t = 1.0, allow_negative_numbers = true)]
    pub thickness: f64,

    /// Space left at either side of each line
    #[arg(short = 'm', long = "horizontalmargin", default_value_t = 0.0, allow_negative_numbers = true)]
    pub horizontal_margin: f64,

    /// Gap between the bottom/top of the page and the first/last line
    #[arg(short = 'v', long = "verticalmargin", default_value_t = 0.0, allow_negative_numbers = true)]
    pub vertical_margin: f64,

    /// Output path (default: input with `.pdf` replaced by `_with_lines.pdf`)
    #[arg(short = 'o', long = "outputfilename")]
    pub output_filename: Option<PathBuf>,

    /// Overwrite the input file when no output path is given
    #[arg(short = 'r', long)]
    pub replace: bool,

    /// Size each lines page to the page it follows instead of the first page
    #[arg(long)]
    pub match_page_size: bool,

    /// Only log warnings and errors
    #[arg(short = 'q', long)]
    pub quiet: bool,
}

impl Args {
    pub fn sizing(&self) -> TemplateSizing {
        if self.match_page_size {
            TemplateSizing::PerPage
        } else {
            TemplateSizing::FirstPage
        }
    }

    pub fn output_path(&self) -> PathBuf {
        derive_output_path(&self.filename, self.output_filename.as_deref(), self.replace)
    }
}

/// Pick the output path: explicit path, then the input itself when
/// replacing, then `<stem>_with_lines.pdf`
pub fn derive_output_path(input: &Path, output: Option<&Path>, replace: bool) -> PathBuf {
    if let Some(output) = output {
        return output.to_path_buf();
    }
    if replace {
        return input.to_path_buf();
    }

    let input = input.to_string_lossy();
    match input.strip_suffix(".pdf") {
        Some(stem) => PathBuf::from(format!("{}{}", stem, OUTPUT_SUFFIX)),
        // never fall back to the input path itself
        None => PathBuf::from(format!("{}{}", input, OUTPUT_SUFFIX)),
    }
}

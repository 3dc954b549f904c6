use anyhow::Result;
use clap::Parser;
use ext_icon_gen::{
    color::parse_color,
    icon_gen::{
        self, IconConfig, DEFAULT_FONT_PATH, DEFAULT_LETTER, DEFAULT_OUTPUT_DIR,
        DEFAULT_SIZES,
    },
    logging,
};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(
    name = "ext-icon-gen",
    about = "Generate letter-badge PNG icons for a browser extension"
)]
struct Args {
    /// Output directory.
    #[clap(short, long, value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    /// PNG icon sizes to generate.
    #[clap(
        short,
        long,
        value_delimiter = ',',
        value_name = "SIZES",
        default_values_t = DEFAULT_SIZES
    )]
    sizes: Vec<u32>,

    /// The letter drawn on the icon (ASCII letter or digit)
    #[clap(short, long, default_value_t = DEFAULT_LETTER)]
    letter: char,

    /// Preferred TrueType font. The built-in font is used if it can't be loaded.
    #[clap(long, value_name = "PATH", default_value = DEFAULT_FONT_PATH)]
    font: PathBuf,

    /// Circle fill color (CSS color format)
    #[clap(long, default_value = "#007bff")]
    fill_color: String,

    /// Circle outline color (CSS color format)
    #[clap(long, default_value = "#0064c8")]
    outline_color: String,

    /// Circle outline width in pixels
    #[clap(long, default_value_t = 2)]
    outline_width: u32,

    /// Letter color (CSS color format)
    #[clap(long, default_value = "#ffffff")]
    text_color: String,

    /// Also write manifest-icons.json with the manifest.json icon entries
    #[clap(long)]
    manifest: bool,

    /// Log filter directive, e.g. "debug"
    #[clap(long, value_name = "FILTER")]
    log_filter: Option<String>,
}

impl TryFrom<Args> for IconConfig {
    type Error = anyhow::Error;

    fn try_from(args: Args) -> Result<Self> {
        Ok(IconConfig {
            sizes: args.sizes,
            output: args.output,
            letter: args.letter,
            font_path: args.font,
            fill: parse_color(&args.fill_color)?,
            outline: parse_color(&args.outline_color)?,
            outline_width: args.outline_width,
            text_color: parse_color(&args.text_color)?,
            manifest: args.manifest,
        })
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_logging(args.log_filter.as_deref());

    let config = IconConfig::try_from(args)?;
    icon_gen::generate(&config)?;
    Ok(())
}

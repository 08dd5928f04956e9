use clap::{Parser, Subcommand};
use simple_frame::imaging::{FsAssets, Overrides, read_shooting_record};
use simple_frame::request::{CompositionRequest, TextOverrides};
use simple_frame::template::{self, Template};
use simple_frame::{compose, config, output};
use std::path::{Path, PathBuf};
use tracing::Level;

#[derive(Parser)]
#[command(name = "simple-frame")]
#[command(about = "Adaptive photo frames from EXIF metadata")]
#[command(long_about = "\
Adaptive photo frames from EXIF metadata

Reads a photo's shooting parameters, picks the camera brand mark, and lays
out a border with brand and exposure text. The result is a layer list
(JSON) for a rasterizer to draw.

Asset layout (under [assets] root, default ./assets):

  assets/
  └── brands/
      ├── sony.png                 # Dark mark, used on light borders
      ├── sony_white.png           # Light mark, used on dark photos
      └── hasselblad.png

Text resolution (first non-empty wins):
  command-line override → EXIF/XMP metadata → template default

Run 'simple-frame gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Directory holding config.toml and the assets root
    #[arg(long, default_value = ".", global = true)]
    config: PathBuf,

    /// Log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

/// Pixel overrides. Values are final output pixels, not scaled.
#[derive(clap::Args, Clone, Default)]
struct GeometryArgs {
    /// Photo share of the frame, in percent
    #[arg(long)]
    scale: Option<f64>,
    #[arg(long)]
    margin_top: Option<f64>,
    #[arg(long)]
    margin_bottom: Option<f64>,
    #[arg(long)]
    margin_left: Option<f64>,
    #[arg(long)]
    margin_right: Option<f64>,
    /// Photo corner radius
    #[arg(long)]
    corner: Option<f64>,
    /// Drop shadow blur radius
    #[arg(long)]
    shadow: Option<f64>,
    /// Gap between brand letters
    #[arg(long)]
    spacing: Option<f64>,
    /// Vertical nudge for bottom-anchored brand and text
    #[arg(long, allow_hyphen_values = true)]
    logo_offset: Option<f64>,
}

impl GeometryArgs {
    fn apply(&self, mut o: Overrides) -> Overrides {
        let set = |slot: &mut f64, value: Option<f64>| {
            if let Some(v) = value {
                *slot = v;
            }
        };
        set(&mut o.scale_percent, self.scale);
        set(&mut o.margins.top, self.margin_top);
        set(&mut o.margins.bottom, self.margin_bottom);
        set(&mut o.margins.left, self.margin_left);
        set(&mut o.margins.right, self.margin_right);
        set(&mut o.corner_radius, self.corner);
        set(&mut o.shadow_size, self.shadow);
        set(&mut o.text_spacing, self.spacing);
        set(&mut o.logo_offset, self.logo_offset);
        o
    }
}

/// Text overrides. Blank values fall through to metadata.
#[derive(clap::Args, Clone, Default)]
struct TextArgs {
    #[arg(long, default_value = "")]
    make: String,
    #[arg(long, default_value = "")]
    model: String,
    #[arg(long, default_value = "")]
    lens: String,
    #[arg(long, default_value = "")]
    focal_length: String,
    #[arg(long, default_value = "")]
    aperture: String,
    #[arg(long, default_value = "")]
    shutter: String,
    #[arg(long, default_value = "")]
    iso: String,
}

impl From<TextArgs> for TextOverrides {
    fn from(a: TextArgs) -> Self {
        TextOverrides {
            make: a.make,
            model: a.model,
            lens: a.lens,
            focal_length: a.focal_length,
            aperture: a.aperture,
            shutter: a.shutter,
            iso: a.iso,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Print the normalized shooting record of a photo
    Inspect { image: PathBuf },
    /// List the built-in templates
    Templates,
    /// Lay out a frame for a photo and write its layer list
    Compose {
        image: PathBuf,

        /// Template name, or its number from `templates`
        #[arg(long, short, default_value = "classic")]
        template: String,

        #[command(flatten)]
        geometry: GeometryArgs,

        #[command(flatten)]
        text: TextArgs,

        /// Keep margins exactly as given and derive the canvas from them
        #[arg(long, conflicts_with = "no_margin_priority")]
        margin_priority: bool,
        #[arg(long)]
        no_margin_priority: bool,

        /// Disable luminance-based color and placement adjustments
        #[arg(long)]
        no_adaptation: bool,

        /// Where to write the layer list (JSON)
        #[arg(long, short, default_value = "layers.json")]
        out: PathBuf,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Inspect { image } => {
            let record = read_shooting_record(&image);
            output::print_record(&record, &image);
        }
        Command::Templates => {
            output::print_templates(template::catalog());
        }
        Command::Compose {
            image,
            template,
            geometry,
            text,
            margin_priority,
            no_margin_priority,
            no_adaptation,
            out,
        } => {
            let engine = config::load_config(&cli.config)?;
            let template = resolve_template(&template)?;
            let assets = FsAssets::new(engine.assets.resolve_root(&cli.config));

            let pixels = image::open(&image)?;
            let record = read_shooting_record(&image);

            let request = CompositionRequest::new(&pixels, &record, template);
            let overrides = geometry.apply(request.overrides);
            let priority = if margin_priority || no_margin_priority {
                margin_priority
            } else {
                request.margin_priority
            };
            let adaptation = request.smart_adaptation && !no_adaptation;
            let request = request
                .with_overrides(overrides)
                .with_text(text.into())
                .with_margin_priority(priority)
                .with_smart_adaptation(adaptation);

            let composition = compose::compose(&request, &assets, &engine)?;
            let fingerprint = composition.fingerprint()?;
            write_layers(&out, &composition)?;
            output::print_composition(&composition, &fingerprint);
            println!("==> Wrote {}", out.display());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Install the fmt subscriber on stderr. Warnings only unless `-v` is given.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

/// Accept a template name or its 1-based number from the `templates` listing.
fn resolve_template(arg: &str) -> Result<&'static Template, String> {
    let by_number = arg
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(template::by_index);
    by_number
        .or_else(|| template::find(arg))
        .ok_or_else(|| format!("unknown template '{arg}' (see `simple-frame templates`)"))
}

fn write_layers(path: &Path, composition: &compose::Composition) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(composition)?;
    std::fs::write(path, json)
}

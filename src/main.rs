use std::error::Error;
use std::io::Write;
use std::path::PathBuf;

//
// cargo run --features cmd -- logo.png --mode compressed > logo.zpl
//
use clap::Parser;
use log::info;
use zplgfa::{flatten_image, wrap_label, Config, EncodingMode, GraphicField};

#[derive(Debug, Parser)]
#[command(name = "zplgfa", version, about = "Convert an image into a ZPL Graphic Field")]
struct Args {
    /// Image file to convert
    image: PathBuf,

    /// ascii, binary or compressed
    #[arg(long, default_value = "compressed")]
    mode: EncodingMode,

    /// Canvas width in dots (4 inch at 203 dpi)
    #[arg(long, default_value_t = 812)]
    max_width: u32,

    /// Canvas height in dots (6 inch at 203 dpi)
    #[arg(long, default_value_t = 1218)]
    max_height: u32,

    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    #[arg(long, default_value_t = 0.1)]
    darkness: f64,

    /// Print only the ^GF command, without ^XA/^XZ framing
    #[arg(long)]
    field_only: bool,
}

fn main() {
    env_logger::init();

    if let Err(err) = run(Args::parse()) {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let image = image::open(&args.image).map_err(zplgfa::Error::from)?;
    info!("loaded {:?} ({}x{})", args.image, image.width(), image.height());

    let config = Config::for_image(&image, args.max_width, args.max_height)
        .scale(args.scale)
        .darkness(args.darkness);
    let flat = flatten_image(&image, &config)?;
    let field = GraphicField::from_rgba(&flat, args.mode)?;

    let out = if args.field_only {
        field.to_bytes()
    } else {
        wrap_label(&field)
    };

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    handle.write_all(&out)?;
    handle.flush()?;
    Ok(())
}

use std::path::PathBuf;

use arunsawat::config::{self, BotConfig};
use arunsawat::content;
use arunsawat::date::{DateContext, DayOfWeek};
use arunsawat::pipeline::{self, Pipeline, PipelineOptions};
use arunsawat::sources::local::{DirPublisher, DirectoryImageSource, FileFontSource};
use arunsawat::text::FontRenderer;
use arunsawat::{compose, credentials};
use clap::{Parser, Subcommand};
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Parser)]
#[command(name = "arunsawat")]
#[command(about = "Morning-greeting card bot: fit blessing text onto a photo and publish it")]
#[command(long_about = "\
Morning-greeting card bot

One invocation produces one post: a Thai greeting and blessing are picked for
the day of week, composited onto a background photo at the largest font size
that fits, watermarked, and published. Meant to be triggered by cron or a VM
boot script; the process does one run and exits.

Collaborators are filesystem-backed: photos come from a directory, the font
from a file, and \"publishing\" writes the PNG, caption, and a JSON receipt
into an output directory for the posting script to pick up.

Run 'arunsawat gen-config' for a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Config file
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    /// Seed the random generator for a reproducible run
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Override the day of week (1..=7, ISO, Monday=1)
    #[arg(long, global = true)]
    day: Option<u8>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full pipeline: content → photo → font → fit → composite → publish
    Run {
        /// Credentials file for remote adapters (unused by the local ones)
        #[arg(long)]
        credentials: Option<PathBuf>,
    },
    /// Composite one card from explicit inputs, without publishing
    Compose {
        /// Background photo
        image: PathBuf,
        /// Font file covering the text's script
        font: PathBuf,
        /// Output PNG path
        #[arg(long, default_value = "card.png")]
        out: PathBuf,
    },
    /// Print the day's content bundle (greeting, blessing, colors, hashtag)
    Content,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let date = match cli.day {
        Some(day) => DateContext::for_day(DayOfWeek::from_iso(day)?),
        None => DateContext::today(),
    };
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    match cli.command {
        Command::Run { credentials: credentials_path } => {
            let started = chrono::Local::now();
            info!("run triggered at {started}");

            let config = BotConfig::load(&cli.config)?;
            if let Some(path) = credentials_path {
                // remote adapters take the bag at construction; the local
                // ones wired below need none of it
                let bag = credentials::Credentials::load(&path)?;
                info!("loaded {} credential entries from {}", bag.len(), path.display());
            }

            let mut pipeline = Pipeline::new(
                DirectoryImageSource::new(&config.photo_dir),
                FileFontSource::new(&config.font_path),
                DirPublisher::new(&config.out_dir),
                PipelineOptions::from(&config),
            );
            let receipt = pipeline.run(&date, &mut rng)?;
            println!("Published: {}", receipt.media_reference);
            println!("{}", receipt.caption);

            let finished = chrono::Local::now();
            info!("run completed at {finished} (took {})", finished - started);
        }
        Command::Compose { image, font, out } => {
            let config = BotConfig::load(&cli.config)?;
            let receipt = compose_once(&config, &date, &mut rng, &image, &font, &out)?;
            println!("Wrote {} ({})", out.display(), receipt);
        }
        Command::Content => {
            let bundle = content::select(&date, &mut rng);
            let color = bundle.accent_color;
            println!("Greeting: {}", bundle.greeting);
            println!("Blessing: {}", bundle.blessing);
            println!("Accent:   rgb({}, {}, {})", color.0, color.1, color.2);
            println!("Hashtag:  {}", bundle.hashtag);
            println!("Search:   {} / page color {}", content::random_subject(&mut rng), content::search_color(date.day_of_week));
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Local one-shot composition against explicit files, for previewing layout
/// and font choices. Goes through the same card assembly as a full run, so
/// a font without coverage for the day's text is rejected here too.
fn compose_once(
    config: &BotConfig,
    date: &DateContext,
    rng: &mut impl Rng,
    photo_path: &PathBuf,
    font_path: &PathBuf,
    out: &PathBuf,
) -> Result<String, Box<dyn std::error::Error>> {
    let bundle = content::select(date, rng);
    let photo = image::open(photo_path)?;
    let renderer = FontRenderer::new(std::fs::read(font_path)?)?;
    let font_label = font_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("font");

    let card = pipeline::compose_card(
        &renderer,
        font_label,
        photo,
        &bundle,
        &PipelineOptions::from(config),
        rng,
    )?;
    std::fs::write(out, compose::encode_png(&card.image)?)?;
    Ok(format!("{:?}, {}pt", card.template, card.size))
}

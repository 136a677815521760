mod logger;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use photobook_layout::constants::pt_to_px;
use photobook_layout::{Book, LayoutKind, Orientation, PaperSize, RenderOptions};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pbk", about = "Photobook print renderer", version)]
struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a book JSON file to PDF
    Render {
        /// Input book JSON file
        #[arg(short, long)]
        input: PathBuf,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,

        /// Render options JSON file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output paper size (overrides the config file)
        #[arg(long, value_enum)]
        paper: Option<PaperArg>,

        /// Output orientation (overrides the config file)
        #[arg(long, value_enum)]
        orientation: Option<OrientationArg>,

        /// Outline every drop zone
        #[arg(long)]
        outlines: bool,

        /// Document title (defaults to the book title)
        #[arg(long)]
        title: Option<String>,

        /// Show statistics only, don't generate PDF
        #[arg(long)]
        stats_only: bool,
    },

    /// Print the drop zones of a layout
    Zones {
        /// Layout name
        #[arg(short, long, value_enum)]
        layout: LayoutArg,

        /// Paper size
        #[arg(long, default_value = "a4", value_enum)]
        paper: PaperArg,

        /// Orientation
        #[arg(long, default_value = "portrait", value_enum)]
        orientation: OrientationArg,
    },

    /// List the available layouts
    Layouts,

    /// Print statistics for a book JSON file
    Stats {
        /// Input book JSON file
        #[arg(short, long)]
        input: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum LayoutArg {
    HorizontalTriplet,
    VerticalTriplet,
    VerticalTuple,
    #[value(alias = "single-page")]
    FullPage,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    Portrait,
    Landscape,
}

impl From<LayoutArg> for LayoutKind {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::HorizontalTriplet => Self::HorizontalTriplet,
            LayoutArg::VerticalTriplet => Self::VerticalTriplet,
            LayoutArg::VerticalTuple => Self::VerticalTuple,
            LayoutArg::FullPage => Self::FullPage,
        }
    }
}

impl From<PaperArg> for PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A3 => Self::A3,
            PaperArg::A4 => Self::A4,
            PaperArg::A5 => Self::A5,
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
            PaperArg::Tabloid => Self::Tabloid,
        }
    }
}

impl From<OrientationArg> for Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Portrait => Self::Portrait,
            OrientationArg::Landscape => Self::Landscape,
        }
    }
}

async fn load_book(path: &Path) -> Result<Book> {
    Book::load(path)
        .await
        .with_context(|| format!("Failed to load book from {}", path.display()))
}

fn print_statistics(book: &Book) {
    let stats = photobook_layout::calculate_statistics(book);
    println!("Book Statistics: {}", book.title);
    println!("  Pages: {}", stats.pages);
    println!("  Placed images: {}", stats.placed_images);
    println!("  Empty zones: {}", stats.empty_zones);
    if stats.stale_placements > 0 {
        println!("  Placements outside their layout: {}", stats.stale_placements);
    }
    for (layout, count) in &stats.layouts {
        println!("  {}: {} page(s)", layout, count);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logger::CliLogger::new(cli.verbose).init()?;

    match cli.command {
        Commands::Render {
            input,
            output,
            config,
            paper,
            orientation,
            outlines,
            title,
            stats_only,
        } => {
            let mut options = match &config {
                Some(path) => RenderOptions::load(path)
                    .await
                    .with_context(|| format!("Failed to load config from {}", path.display()))?,
                None => RenderOptions::default(),
            };
            if let Some(paper) = paper {
                options.paper_size = paper.into();
            }
            if let Some(orientation) = orientation {
                options.orientation = orientation.into();
            }
            if outlines {
                options.draw_zone_outlines = true;
            }
            if title.is_some() {
                options.title = title;
            }

            let book = load_book(&input).await?;
            print_statistics(&book);

            if stats_only {
                return Ok(());
            }

            let exported = photobook_layout::export_book(&book, &options).await?;
            photobook_layout::save_pdf(&exported.bytes, &output).await?;

            for (page, warning) in exported.report.warnings() {
                println!("  Skipped on page {}: {}", page + 1, warning);
            }
            println!(
                "Rendered {} page(s), {} image(s) → {}",
                exported.report.pages.len().max(1),
                exported.report.images_drawn(),
                output.display()
            );
        }

        Commands::Zones {
            layout,
            paper,
            orientation,
        } => {
            let layout = LayoutKind::from(layout);
            let page_size = PaperSize::from(paper).page_size(orientation.into());
            let zones = photobook_layout::resolve(layout, page_size)?;

            println!(
                "{} on {:.2} x {:.2} pt:",
                layout, page_size.width_pt, page_size.height_pt
            );
            for zone in zones {
                println!(
                    "  zone {}: x={:.2} y={:.2} w={:.2} h={:.2}  ({:.0} x {:.0} px in the editor)",
                    zone.index,
                    zone.rect.x,
                    zone.rect.y,
                    zone.rect.width,
                    zone.rect.height,
                    pt_to_px(zone.rect.width),
                    pt_to_px(zone.rect.height)
                );
            }
        }

        Commands::Layouts => {
            for layout in LayoutKind::all() {
                println!(
                    "{:<20} {} zone(s)  {}",
                    layout.as_str(),
                    layout.zone_count(),
                    layout.description()
                );
            }
        }

        Commands::Stats { input } => {
            let book = load_book(&input).await?;
            print_statistics(&book);
        }
    }

    Ok(())
}

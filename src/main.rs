use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use toilet_finder::config::FinderConfig;
use toilet_finder::journal::FileJournal;
use toilet_finder::models::{CleanlinessStatus, SortKey};
use toilet_finder::pipeline::SelectionOutcome;
use toilet_finder::sources::{
    parse_coordinates, seed_toilets, FixedLocation, GeoapifySource, SUPPORTED_REGIONS,
};
use toilet_finder::{DataOrigin, ToiletFinder};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortArg {
    Rating,
    Cleanliness,
    Distance,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Rating => SortKey::Rating,
            SortArg::Cleanliness => SortKey::Cleanliness,
            SortArg::Distance => SortKey::Distance,
        }
    }
}

#[derive(Parser)]
#[command(name = "toilet-finder")]
#[command(about = "Find clean public toilets and share reviews")]
#[command(version)]
struct Cli {
    /// City or district to look in
    #[arg(long, conflicts_with = "near")]
    city: Option<String>,

    /// Search around a position given as LAT,LON
    #[arg(long, value_name = "LAT,LON")]
    near: Option<String>,

    /// Filter by name, address or landmark
    #[arg(long, default_value = "")]
    search: String,

    #[arg(long, value_enum, default_value = "rating")]
    sort: SortArg,

    /// Toilet id to review
    #[arg(long, requires_all = ["text", "rating"])]
    review: Option<String>,

    /// Review text
    #[arg(long)]
    text: Option<String>,

    /// Review rating from 1 to 5
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    rating: Option<u8>,

    /// Print the cleanliness summary
    #[arg(long)]
    stats: bool,

    /// Write the ranked list as JSON to this file
    #[arg(long, value_name = "PATH")]
    output: Option<String>,

    /// List the supported regions and exit
    #[arg(long)]
    regions: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = FinderConfig::load()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if cli.regions {
        for (region, state) in SUPPORTED_REGIONS {
            println!("{} ({})", region, state);
        }
        return Ok(());
    }

    info!("🚻 Toilet Finder");

    let source = match &config.geoapify_api_key {
        Some(key) => Some(GeoapifySource::with_base_url(
            key.clone(),
            config.geoapify_base_url.clone(),
            config.request_timeout(),
        )?),
        None => {
            warn!("No Geoapify API key configured, using built-in data");
            None
        }
    };
    let journal = FileJournal::new(config.journal_path.clone());
    let mut finder = ToiletFinder::new(source, journal, seed_toilets(), config);

    let origin = match &cli.near {
        Some(near) => {
            let position = parse_coordinates(near)?;
            finder
                .use_current_location(&FixedLocation::new(position))
                .await?
        }
        None => finder.load().await?,
    };

    if let Some(reason) = finder.notice() {
        warn!("{}", reason);
    }
    if origin == DataOrigin::Seed {
        info!("Unable to fetch live data, showing cached toilets");
    }

    if let Some(city) = &cli.city {
        finder.select_region(city);
    }
    finder.set_search(&cli.search);
    finder.set_sort(cli.sort.into());

    if let (Some(id), Some(text), Some(rating)) = (&cli.review, &cli.text, cli.rating) {
        let entry = finder.add_review(id, text, rating)?;
        info!("💾 Saved review {} for toilet {}", entry.id, entry.toilet_id);
    }

    let view = finder.view()?;
    let toilets = &view.selection.toilets;

    match view.selection.outcome {
        SelectionOutcome::Found => {
            println!("{} toilets found\n", toilets.len());
        }
        SelectionOutcome::NoData => println!("No toilet data available"),
        SelectionOutcome::NoneWithinRadius => println!(
            "No toilets found within {} km of your location. Try expanding your search area.",
            finder.radius_km()
        ),
        SelectionOutcome::NoMatch => {
            println!("No toilets found. Try adjusting your location or search criteria")
        }
    }
    if view.selection.from_seed {
        println!("(showing built-in data for this region)\n");
    }

    for (i, t) in toilets.iter().enumerate() {
        let place = &t.record.place;
        println!(
            "{}. {} [{}] {:.1}★",
            i + 1,
            place.name,
            t.record.cleanliness_status(),
            t.record.rating()
        );
        println!("   {}, {}, {}", place.address, place.city, place.state);
        println!("   Landmark: {}", place.landmark);
        if let Some(d) = t.distance_km {
            println!("   Distance: {:.1} km", d);
        }
        println!(
            "   {} · {} reviews",
            if place.is_open { "Open" } else { "Closed" },
            t.record.reviews().len()
        );
        if !place.facilities.is_empty() {
            println!("   Facilities: {}", place.facilities.join(", "));
        }
        println!("   ID: {}", place.id);
        println!();
    }

    if cli.stats {
        let s = &view.summary;
        println!("Cleanliness overview: {:?}", s.verdict());
        for (status, count) in [
            (CleanlinessStatus::Good, s.good),
            (CleanlinessStatus::Average, s.average),
            (CleanlinessStatus::Bad, s.bad),
        ] {
            println!("  {:<8} {:>3} ({:.0}%)", status.to_string(), count, s.percentage(status));
        }
    }

    if let Some(path) = &cli.output {
        let json = serde_json::to_string_pretty(&view.selection)?;
        tokio::fs::write(path, json)
            .await
            .with_context(|| format!("Failed to write {}", path))?;
        info!("💾 Saved {} toilets to {}", toilets.len(), path);
    }

    Ok(())
}

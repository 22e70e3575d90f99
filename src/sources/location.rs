use anyhow::Result;
use async_trait::async_trait;

use crate::models::Coordinates;
use crate::sources::traits::CoordinateSource;

/// Coordinate source that always reports the same position, or none at all
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedLocation {
    position: Option<Coordinates>,
}

impl FixedLocation {
    pub fn new(position: Coordinates) -> Self {
        Self {
            position: Some(position),
        }
    }

    /// A source with no position, as when the user denies location access
    pub fn unavailable() -> Self {
        Self { position: None }
    }
}

#[async_trait]
impl CoordinateSource for FixedLocation {
    async fn current_position(&self) -> Result<Coordinates> {
        self.position
            .ok_or_else(|| anyhow::anyhow!("no position available on this device"))
    }
}

/// Parse `"LAT,LON"` as given on the command line
pub fn parse_coordinates(input: &str) -> Result<Coordinates> {
    let (lat, lon) = input
        .split_once(',')
        .ok_or_else(|| anyhow::anyhow!("expected LAT,LON but got '{}'", input))?;

    let latitude: f64 = lat.trim().parse()?;
    let longitude: f64 = lon.trim().parse()?;

    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        anyhow::bail!("coordinates out of range: {}", input);
    }

    Ok(Coordinates::new(latitude, longitude))
}

pub mod geoapify;
pub mod location;
pub mod seed;
pub mod traits;
pub mod types;

pub use geoapify::GeoapifySource;
pub use location::{parse_coordinates, FixedLocation};
pub use seed::{seed_toilets, SUPPORTED_REGIONS};
pub use traits::{CoordinateSource, PlaceSource};
pub use types::{PlaceQuery, RawPlace};

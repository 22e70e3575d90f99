//! Public toilet finder: turns place records and crowd-sourced reviews into a
//! cleanliness-labelled, geo-filtered and ranked list.

pub mod analysis;
pub mod config;
pub mod error;
pub mod finder;
pub mod journal;
pub mod models;
pub mod pipeline;
pub mod sources;

pub use error::{FinderError, Result};
pub use finder::{DataOrigin, FinderView, ToiletFinder};

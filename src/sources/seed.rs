//! Static toilet data for major Indian cities.
//!
//! Used whenever the live source is unavailable and as the fallback for
//! regions the live source does not cover.

use chrono::{DateTime, Duration, TimeZone, Utc};
use tracing::info;

use crate::models::{Place, Review, ToiletRecord};

#[derive(Debug, Clone, Copy)]
enum Bias {
    Positive,
    Negative,
    Mixed,
}

const POSITIVE_REVIEWS: &[&str] = &[
    "Very clean and well-maintained toilet. Good facilities available.",
    "Excellent cleanliness standards. The staff maintains it regularly.",
    "Clean washroom with proper soap and water supply. Highly recommended.",
    "Well-maintained facility with good ventilation and cleanliness.",
    "Spotless and hygienic. Great job by the maintenance team.",
    "Clean toilet with all necessary amenities. Very satisfied.",
    "Impressive cleanliness level. The facility is well-managed.",
    "Very good condition with regular cleaning. Appreciated the effort.",
];

const NEGATIVE_REVIEWS: &[&str] = &[
    "Very dirty and smelly. Needs immediate attention and cleaning.",
    "Poor maintenance and unhygienic conditions. Avoid if possible.",
    "Extremely dirty with no proper cleaning. Water supply issues too.",
    "Terrible condition. No soap, dirty floors, and bad smell.",
    "Unhygienic and poorly maintained. Needs major improvements.",
    "Dirty toilet with broken facilities. Not recommended at all.",
    "Poor cleanliness standards. The facility is in bad condition.",
    "Awful experience. Very dirty and unmaintained toilet.",
];

const MIXED_REVIEWS: &[&str] = &[
    "Average cleanliness but could be better maintained.",
    "Okay condition but needs more frequent cleaning.",
    "Decent facility but some improvements needed.",
    "Not bad but has room for improvement in cleanliness.",
    "Acceptable but could use better maintenance.",
    "Okay experience, could be cleaner though.",
];

struct SeedEntry {
    id: &'static str,
    name: &'static str,
    address: &'static str,
    city: &'static str,
    district: &'static str,
    state: &'static str,
    landmark: &'static str,
    latitude: f64,
    longitude: f64,
    bias: Bias,
    facilities: &'static [&'static str],
    is_open: bool,
}

const SEED: &[SeedEntry] = &[
    SeedEntry {
        id: "1",
        name: "Connaught Place Public Toilet",
        address: "Block A, Connaught Place",
        city: "Delhi",
        district: "New Delhi",
        state: "Delhi",
        landmark: "Connaught Place Metro Station",
        latitude: 28.6315,
        longitude: 77.2167,
        bias: Bias::Positive,
        facilities: &["WiFi", "Disabled Access", "Electric Hand Dryer"],
        is_open: true,
    },
    SeedEntry {
        id: "2",
        name: "India Gate Public Facility",
        address: "India Gate Circle",
        city: "Delhi",
        district: "New Delhi",
        state: "Delhi",
        landmark: "India Gate Monument",
        latitude: 28.6129,
        longitude: 77.2295,
        bias: Bias::Mixed,
        facilities: &["Disabled Access"],
        is_open: true,
    },
    SeedEntry {
        id: "3",
        name: "Red Fort Public Washroom",
        address: "Red Fort Complex",
        city: "Delhi",
        district: "New Delhi",
        state: "Delhi",
        landmark: "Red Fort",
        latitude: 28.6562,
        longitude: 77.2410,
        bias: Bias::Negative,
        facilities: &[],
        is_open: false,
    },
    SeedEntry {
        id: "4",
        name: "Gateway of India Public Toilet",
        address: "Apollo Bunder, Colaba",
        city: "Mumbai",
        district: "Mumbai City",
        state: "Maharashtra",
        landmark: "Gateway of India",
        latitude: 18.9220,
        longitude: 72.8347,
        bias: Bias::Positive,
        facilities: &["WiFi", "Electric Hand Dryer"],
        is_open: true,
    },
    SeedEntry {
        id: "5",
        name: "Marine Drive Public Facility",
        address: "Netaji Subhashchandra Bose Road",
        city: "Mumbai",
        district: "Mumbai City",
        state: "Maharashtra",
        landmark: "Marine Drive",
        latitude: 18.9443,
        longitude: 72.8231,
        bias: Bias::Mixed,
        facilities: &["Disabled Access"],
        is_open: true,
    },
    SeedEntry {
        id: "6",
        name: "Juhu Beach Public Washroom",
        address: "Juhu Beach, Juhu",
        city: "Mumbai",
        district: "Mumbai Suburban",
        state: "Maharashtra",
        landmark: "Juhu Beach",
        latitude: 19.0968,
        longitude: 72.8265,
        bias: Bias::Negative,
        facilities: &[],
        is_open: true,
    },
    SeedEntry {
        id: "7",
        name: "Cubbon Park Public Toilet",
        address: "Cubbon Park, Kasturba Road",
        city: "Bangalore",
        district: "Bangalore Urban",
        state: "Karnataka",
        landmark: "Cubbon Park",
        latitude: 12.9767,
        longitude: 77.5993,
        bias: Bias::Positive,
        facilities: &["WiFi", "Disabled Access", "Electric Hand Dryer"],
        is_open: true,
    },
    SeedEntry {
        id: "8",
        name: "Lalbagh Botanical Garden Facility",
        address: "Lalbagh Main Road",
        city: "Bangalore",
        district: "Bangalore Urban",
        state: "Karnataka",
        landmark: "Lalbagh Botanical Garden",
        latitude: 12.9507,
        longitude: 77.5848,
        bias: Bias::Mixed,
        facilities: &["Disabled Access"],
        is_open: true,
    },
    SeedEntry {
        id: "9",
        name: "Marina Beach Public Toilet",
        address: "Marina Beach Road",
        city: "Chennai",
        district: "Chennai",
        state: "Tamil Nadu",
        landmark: "Marina Beach",
        latitude: 13.0475,
        longitude: 80.2824,
        bias: Bias::Mixed,
        facilities: &["Disabled Access"],
        is_open: true,
    },
    SeedEntry {
        id: "10",
        name: "Central Railway Station Facility",
        address: "Chennai Central Railway Station",
        city: "Chennai",
        district: "Chennai",
        state: "Tamil Nadu",
        landmark: "Chennai Central",
        latitude: 13.0827,
        longitude: 80.2707,
        bias: Bias::Positive,
        facilities: &["WiFi", "Electric Hand Dryer"],
        is_open: true,
    },
    SeedEntry {
        id: "11",
        name: "Charminar Public Washroom",
        address: "Charminar Area, Old City",
        city: "Hyderabad",
        district: "Hyderabad",
        state: "Telangana",
        landmark: "Charminar",
        latitude: 17.3616,
        longitude: 78.4747,
        bias: Bias::Negative,
        facilities: &[],
        is_open: true,
    },
    SeedEntry {
        id: "12",
        name: "Hussain Sagar Lake Facility",
        address: "Tank Bund Road",
        city: "Hyderabad",
        district: "Hyderabad",
        state: "Telangana",
        landmark: "Hussain Sagar Lake",
        latitude: 17.4239,
        longitude: 78.4738,
        bias: Bias::Positive,
        facilities: &["WiFi", "Disabled Access"],
        is_open: true,
    },
    SeedEntry {
        id: "13",
        name: "Shaniwar Wada Public Toilet",
        address: "Shaniwar Peth",
        city: "Pune",
        district: "Pune",
        state: "Maharashtra",
        landmark: "Shaniwar Wada",
        latitude: 18.5196,
        longitude: 73.8553,
        bias: Bias::Mixed,
        facilities: &["Disabled Access"],
        is_open: true,
    },
    SeedEntry {
        id: "14",
        name: "Victoria Memorial Public Facility",
        address: "Victoria Memorial Hall, Queens Way",
        city: "Kolkata",
        district: "Kolkata",
        state: "West Bengal",
        landmark: "Victoria Memorial",
        latitude: 22.5448,
        longitude: 88.3426,
        bias: Bias::Positive,
        facilities: &["WiFi", "Electric Hand Dryer"],
        is_open: true,
    },
    SeedEntry {
        id: "15",
        name: "Howrah Bridge Area Toilet",
        address: "Strand Road",
        city: "Kolkata",
        district: "Kolkata",
        state: "West Bengal",
        landmark: "Howrah Bridge",
        latitude: 22.5958,
        longitude: 88.3468,
        bias: Bias::Negative,
        facilities: &[],
        is_open: false,
    },
    SeedEntry {
        id: "16",
        name: "Sabarmati Ashram Public Toilet",
        address: "Ashram Road",
        city: "Ahmedabad",
        district: "Ahmedabad",
        state: "Gujarat",
        landmark: "Sabarmati Ashram",
        latitude: 23.0615,
        longitude: 72.5804,
        bias: Bias::Positive,
        facilities: &["Disabled Access", "Electric Hand Dryer"],
        is_open: true,
    },
    SeedEntry {
        id: "17",
        name: "Hawa Mahal Public Washroom",
        address: "Hawa Mahal Road, Badi Choupad",
        city: "Jaipur",
        district: "Jaipur",
        state: "Rajasthan",
        landmark: "Hawa Mahal",
        latitude: 26.9239,
        longitude: 75.8267,
        bias: Bias::Mixed,
        facilities: &["Disabled Access"],
        is_open: true,
    },
    SeedEntry {
        id: "18",
        name: "City Palace Public Facility",
        address: "Jaleb Chowk, City Palace",
        city: "Jaipur",
        district: "Jaipur",
        state: "Rajasthan",
        landmark: "City Palace",
        latitude: 26.9255,
        longitude: 75.8235,
        bias: Bias::Negative,
        facilities: &[],
        is_open: true,
    },
    SeedEntry {
        id: "19",
        name: "Bara Imambara Public Toilet",
        address: "Husainabad",
        city: "Lucknow",
        district: "Lucknow",
        state: "Uttar Pradesh",
        landmark: "Bara Imambara",
        latitude: 26.8695,
        longitude: 80.9177,
        bias: Bias::Mixed,
        facilities: &["Disabled Access"],
        is_open: true,
    },
    SeedEntry {
        id: "20",
        name: "Cyber City Public Facility",
        address: "DLF Cyber City, Phase 2",
        city: "Gurgaon",
        district: "Gurgaon",
        state: "Haryana",
        landmark: "DLF Cyber City",
        latitude: 28.4955,
        longitude: 77.0910,
        bias: Bias::Positive,
        facilities: &["WiFi", "Disabled Access", "Electric Hand Dryer"],
        is_open: true,
    },
];

/// Regions users can pick from, with their state
pub const SUPPORTED_REGIONS: &[(&str, &str)] = &[
    ("Delhi", "Delhi"),
    ("Mumbai", "Maharashtra"),
    ("Bangalore", "Karnataka"),
    ("Chennai", "Tamil Nadu"),
    ("Hyderabad", "Telangana"),
    ("Pune", "Maharashtra"),
    ("Kolkata", "West Bengal"),
    ("Ahmedabad", "Gujarat"),
    ("Jaipur", "Rajasthan"),
    ("Lucknow", "Uttar Pradesh"),
    ("Gurgaon", "Haryana"),
    ("Noida", "Uttar Pradesh"),
    ("Faridabad", "Haryana"),
    ("Ghaziabad", "Uttar Pradesh"),
    ("Thane", "Maharashtra"),
    ("Coimbatore", "Tamil Nadu"),
    ("Kochi", "Kerala"),
    ("Indore", "Madhya Pradesh"),
    ("Bhopal", "Madhya Pradesh"),
    ("Chandigarh", "Chandigarh"),
];

/// Build the seed toilet set. Reviews are generated deterministically so the
/// set classifies the same on every run.
pub fn seed_toilets() -> Vec<ToiletRecord> {
    let now = Utc::now();
    let base = seed_epoch();

    let toilets: Vec<ToiletRecord> = SEED
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let place = Place {
                id: entry.id.to_string(),
                name: entry.name.to_string(),
                address: entry.address.to_string(),
                city: entry.city.to_string(),
                district: entry.district.to_string(),
                state: entry.state.to_string(),
                landmark: entry.landmark.to_string(),
                latitude: entry.latitude,
                longitude: entry.longitude,
                is_open: entry.is_open,
                facilities: entry.facilities.iter().map(|f| f.to_string()).collect(),
            };
            ToiletRecord::new(place, seed_reviews(idx, entry.bias, base), now)
        })
        .collect();

    info!("📋 Prepared {} seed toilets", toilets.len());
    toilets
}

fn seed_epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

fn seed_reviews(seed: usize, bias: Bias, base: DateTime<Utc>) -> Vec<Review> {
    let count = 3 + seed % 6;

    (0..count)
        .map(|i| {
            let k = seed * 7 + i * 3;
            let (text, rating) = match bias {
                Bias::Positive => (pick(POSITIVE_REVIEWS, k), 4 + (k % 2) as u8),
                Bias::Negative => (pick(NEGATIVE_REVIEWS, k), 1 + (k % 2) as u8),
                // Same 40/30/30 split the live reviews tend to show
                Bias::Mixed => match k % 10 {
                    0..=3 => (pick(POSITIVE_REVIEWS, k), 4 + (k % 2) as u8),
                    4..=6 => (pick(MIXED_REVIEWS, k), 3),
                    _ => (pick(NEGATIVE_REVIEWS, k), 1 + (k % 2) as u8),
                },
            };
            let date = base + Duration::days((seed * 11 + i * 17) as i64 % 300);
            Review::new(text, rating, date)
        })
        .collect()
}

fn pick(pool: &[&'static str], k: usize) -> &'static str {
    pool[k % pool.len()]
}

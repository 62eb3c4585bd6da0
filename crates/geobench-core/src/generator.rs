//! Synthetic point generation

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::DatasetConfig;
use crate::models::{Dataset, GeoPoint};

/// Random source for a run: seeded when `config.seed` is set, OS entropy otherwise
pub fn dataset_rng(config: &DatasetConfig) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Scatter `config.point_count` points uniformly around `config.center`.
///
/// Latitude and longitude offsets are drawn independently from
/// `[-max_offset_deg, +max_offset_deg]`. Duplicates are allowed.
pub fn generate_points<R: Rng + ?Sized>(rng: &mut R, config: &DatasetConfig) -> Dataset {
    let offset = config.max_offset_deg;
    let center = config.center;

    (0..config.point_count)
        .map(|_| {
            let lat = center.lat + rng.gen_range(-offset..=offset);
            let lon = center.lon + rng.gen_range(-offset..=offset);
            GeoPoint::new(lat, lon)
        })
        .collect()
}

//! Starter catalogue loaded by the `seed-fruits` binary and optional startup seeding.

use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use tracing::info;

use crate::domain::fruit_service::map_repository_error;
use crate::domain::ports::FruitRepository;
use crate::domain::{Error, Fruit, FruitDraft};

const STARTER_FRUITS: &[(&str, &str)] = &[
    ("Orange", "orange"),
    ("Grape", "purple"),
    ("Banana", "orange"),
    ("Strawberry", "red"),
    ("Coconut", "brown"),
];

/// The starter fruits: ownerless and not ready to eat.
///
/// Each is stamped one millisecond after the previous, starting at `now`, so
/// creation-ordered listings follow the catalogue order.
pub fn starter_fruits(now: DateTime<Utc>) -> Result<Vec<Fruit>, Error> {
    STARTER_FRUITS
        .iter()
        .zip(0_i64..)
        .map(|((name, color), offset)| {
            let stamped = now + TimeDelta::milliseconds(offset);
            FruitDraft::new(name, color, false)
                .map(|draft| Fruit::new(draft, None, stamped))
                .map_err(|err| Error::internal(format!("invalid starter fruit: {err}")))
        })
        .collect()
}

/// Replace the whole catalogue with the starter fruits.
pub async fn seed_starter_fruits<R>(repo: &R, clock: &dyn Clock) -> Result<usize, Error>
where
    R: FruitRepository + ?Sized,
{
    let fruits = starter_fruits(clock.utc())?;
    let written = repo
        .replace_all(&fruits)
        .await
        .map_err(map_repository_error)?;
    info!(count = written, "seeded starter fruits");
    Ok(written)
}

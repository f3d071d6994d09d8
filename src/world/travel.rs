//! Moving between stops and cities. Both cost a day.
use std::fmt;

use crate::ledger::components::Player;

use super::locations::{City, LocationAtlas, LocationId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelError {
    UnknownLocation { city: City, location: LocationId },
    AlreadyThere { city: City, location: LocationId },
    SameCity { city: City },
}

impl fmt::Display for TravelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownLocation { city, location } => {
                write!(f, "{city} has no stop {location}")
            }
            Self::AlreadyThere { city, location } => {
                write!(f, "you are already at stop {location} in {city}")
            }
            Self::SameCity { city } => write!(f, "you are already in {city}"),
        }
    }
}

impl std::error::Error for TravelError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Journey {
    pub from_city: City,
    pub from: LocationId,
    pub to_city: City,
    pub to: LocationId,
    pub days_left: u32,
}

impl Journey {
    pub fn changed_city(&self) -> bool {
        self.from_city != self.to_city
    }
}

/// Rides the subway to another stop in the current city.
pub fn travel(
    player: &mut Player,
    atlas: &LocationAtlas,
    destination: LocationId,
) -> Result<Journey, TravelError> {
    let city = player.city();
    if atlas.location(city, destination).is_none() {
        return Err(TravelError::UnknownLocation {
            city,
            location: destination,
        });
    }
    if player.location() == destination {
        return Err(TravelError::AlreadyThere {
            city,
            location: destination,
        });
    }
    Ok(depart(player, city, destination))
}

/// Takes the train to the other city, arriving at its first stop.
pub fn switch_city(
    player: &mut Player,
    atlas: &LocationAtlas,
    city: City,
) -> Result<Journey, TravelError> {
    if player.city() == city {
        return Err(TravelError::SameCity { city });
    }
    Ok(depart(player, city, atlas.arrival(city)))
}

fn depart(player: &mut Player, city: City, destination: LocationId) -> Journey {
    let from_city = player.city();
    let from = player.location();
    player.move_to(city, destination);
    let days_left = player.spend_days(1);
    Journey {
        from_city,
        from,
        to_city: city,
        to: destination,
        days_left,
    }
}

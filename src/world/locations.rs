//! The two cities and the subway stops the player can travel between.
use std::fmt;

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

const BEIJING_STOPS: [&str; 10] = [
    "Jianguomen",
    "Beijing Railway Station",
    "Xizhimen",
    "Chongwenmen",
    "Dongzhimen",
    "Fuxingmen",
    "Jishuitan",
    "Changchunjie",
    "Gongzhufen",
    "Pingguoyuan",
];

const SHANGHAI_STOPS: [&str; 10] = [
    "People's Square",
    "Xujiahui",
    "West Nanjing Road",
    "Middle Huaihai Road",
    "Yuyuan Old Street",
    "The Bund",
    "Lujiazui",
    "Jing'an Temple",
    "Xuhui Road",
    "Babaiban",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum City {
    Beijing,
    Shanghai,
}

impl City {
    pub const ALL: [City; 2] = [City::Beijing, City::Shanghai];

    pub fn label(self) -> &'static str {
        match self {
            Self::Beijing => "Beijing",
            Self::Shanghai => "Shanghai",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "beijing" | "bj" => Some(Self::Beijing),
            "shanghai" | "sh" => Some(Self::Shanghai),
            _ => None,
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Location id scoped to a city, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct LocationId(u32);

impl LocationId {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct Location {
    pub id: LocationId,
    pub name: &'static str,
}

/// Registry of every location in both cities.
#[derive(Resource, Debug, Clone)]
pub struct LocationAtlas {
    beijing: Vec<Location>,
    shanghai: Vec<Location>,
}

impl Default for LocationAtlas {
    fn default() -> Self {
        let build = |names: &[&'static str]| {
            names
                .iter()
                .enumerate()
                .map(|(index, name)| Location {
                    id: LocationId::new(index as u32 + 1),
                    name,
                })
                .collect::<Vec<_>>()
        };

        Self {
            beijing: build(&BEIJING_STOPS),
            shanghai: build(&SHANGHAI_STOPS),
        }
    }
}

impl LocationAtlas {
    pub fn locations(&self, city: City) -> &[Location] {
        match city {
            City::Beijing => &self.beijing,
            City::Shanghai => &self.shanghai,
        }
    }

    pub fn location(&self, city: City, id: LocationId) -> Option<&Location> {
        self.locations(city).iter().find(|location| location.id == id)
    }

    pub fn name(&self, city: City, id: LocationId) -> &'static str {
        self.location(city, id)
            .map(|location| location.name)
            .unwrap_or("somewhere")
    }

    /// Where the player arrives after switching cities.
    pub fn arrival(&self, city: City) -> LocationId {
        self.locations(city)
            .first()
            .map(|location| location.id)
            .unwrap_or(LocationId::new(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atlas_exposes_both_cities() {
        let atlas = LocationAtlas::default();
        assert_eq!(atlas.locations(City::Beijing).len(), 10);
        assert_eq!(atlas.locations(City::Shanghai).len(), 10);
        assert_eq!(atlas.name(City::Beijing, LocationId::new(1)), "Jianguomen");
        assert_eq!(atlas.name(City::Shanghai, LocationId::new(6)), "The Bund");
        assert!(atlas.location(City::Beijing, LocationId::new(11)).is_none());
        assert_eq!(atlas.name(City::Beijing, LocationId::new(0)), "somewhere");
        assert_eq!(atlas.arrival(City::Shanghai), LocationId::new(1));
    }

    #[test]
    fn city_parsing_accepts_short_names() {
        assert_eq!(City::parse("BJ"), Some(City::Beijing));
        assert_eq!(City::parse(" shanghai "), Some(City::Shanghai));
        assert_eq!(City::parse("guangzhou"), None);
        assert_eq!(City::Shanghai.to_string(), "Shanghai");
    }
}

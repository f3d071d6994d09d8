//! Goods catalog loading and validation.
use std::{fmt, fs, path::Path};

use bevy::log::warn;
use serde::Deserialize;

use crate::world::locations::{City, LocationId};

use super::components::{GoodDefinition, GoodId, PriceBand};

const GOODS_CONFIG_PATH: &str = "config/goods.toml";

/// Widest `max - min` a band may have; one price draw covers the whole span.
pub const MAX_PRICE_SPAN: u64 = u32::MAX as u64 - 1;

#[derive(Debug, Clone, Deserialize)]
pub struct GoodsConfig {
    pub goods: Vec<GoodConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoodConfig {
    pub id: usize,
    pub name: String,
    pub min_price: u64,
    pub max_price: u64,
    #[serde(default = "all_cities")]
    pub cities: Vec<City>,
    #[serde(default)]
    pub absent_at: Vec<u32>,
}

fn all_cities() -> Vec<City> {
    City::ALL.to_vec()
}

/// Defects that make a goods catalog unusable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    Empty,
    OutOfOrderId { expected: usize, found: usize },
    EmptyName { id: usize },
    InvertedBand { id: usize, min: u64, max: u64 },
    BandTooWide { id: usize, min: u64, max: u64 },
    ZeroPrice { id: usize },
    NoCities { id: usize },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "goods catalog must define at least one good"),
            Self::OutOfOrderId { expected, found } => {
                write!(f, "good ids must be contiguous: expected {expected}, found {found}")
            }
            Self::EmptyName { id } => write!(f, "good {id} has an empty name"),
            Self::InvertedBand { id, min, max } => {
                write!(f, "good {id} has min price {min} above max price {max}")
            }
            Self::BandTooWide { id, min, max } => write!(
                f,
                "good {id} price band {min}..={max} is wider than {MAX_PRICE_SPAN}"
            ),
            Self::ZeroPrice { id } => write!(f, "good {id} has a zero minimum price"),
            Self::NoCities { id } => write!(f, "good {id} is not traded in any city"),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Ordered, validated goods definitions.
#[derive(Debug, Clone)]
pub struct GoodsCatalog {
    goods: Vec<GoodDefinition>,
}

impl GoodsCatalog {
    pub fn load_or_default() -> Self {
        match Self::load_from_file(GOODS_CONFIG_PATH) {
            Ok(catalog) => catalog,
            Err(error) => {
                warn!(
                    "Failed to load goods catalog from {}: {error}. Falling back to defaults.",
                    GOODS_CONFIG_PATH
                );
                Self::fallback()
            }
        }
    }

    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data =
            fs::read_to_string(&path).map_err(|err| format!("unable to read file: {err}"))?;
        let config: GoodsConfig =
            toml::from_str(&data).map_err(|err| format!("invalid goods config: {err}"))?;
        Self::from_config(config).map_err(|err| err.to_string())
    }

    pub fn from_config(config: GoodsConfig) -> Result<Self, CatalogError> {
        if config.goods.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut goods = Vec::with_capacity(config.goods.len());
        for (expected, good) in config.goods.into_iter().enumerate() {
            if good.id != expected {
                return Err(CatalogError::OutOfOrderId {
                    expected,
                    found: good.id,
                });
            }
            let name = good.name.trim();
            if name.is_empty() {
                return Err(CatalogError::EmptyName { id: good.id });
            }
            if good.min_price == 0 {
                return Err(CatalogError::ZeroPrice { id: good.id });
            }
            if good.min_price > good.max_price {
                return Err(CatalogError::InvertedBand {
                    id: good.id,
                    min: good.min_price,
                    max: good.max_price,
                });
            }
            if good.max_price - good.min_price > MAX_PRICE_SPAN {
                return Err(CatalogError::BandTooWide {
                    id: good.id,
                    min: good.min_price,
                    max: good.max_price,
                });
            }
            if good.cities.is_empty() {
                return Err(CatalogError::NoCities { id: good.id });
            }

            goods.push(GoodDefinition {
                id: GoodId::new(good.id),
                name: name.to_string(),
                band: PriceBand {
                    min: good.min_price,
                    max: good.max_price,
                },
                cities: good.cities,
                absent_at: good.absent_at.into_iter().map(LocationId::new).collect(),
            });
        }

        Ok(Self { goods })
    }

    pub fn fallback() -> Self {
        let entry = |id: usize, name: &str, min_price: u64, max_price: u64, absent: &[u32]| {
            GoodConfig {
                id,
                name: name.to_string(),
                min_price,
                max_price,
                cities: all_cities(),
                absent_at: absent.to_vec(),
            }
        };

        let config = GoodsConfig {
            goods: vec![
                entry(0, "Pirated Software", 20, 120, &[2, 7]),
                entry(1, "Smuggled Cigarettes", 100, 450, &[5]),
                entry(2, "Pirated VCDs", 5, 55, &[3, 9]),
                entry(3, "Counterfeit Liquor", 1_000, 3_500, &[1, 6]),
                entry(4, "Shanghai Dolls", 5_000, 14_000, &[2, 4, 8]),
                entry(5, "Imported Underwear", 250, 850, &[10]),
                entry(6, "Grey-market Phones", 750, 1_500, &[3, 7]),
                entry(7, "Fake Cosmetics", 65, 245, &[4, 9]),
            ],
        };

        Self::from_config(config).expect("fallback goods catalog should be valid")
    }

    pub fn get(&self, id: GoodId) -> Option<&GoodDefinition> {
        self.goods.get(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &GoodDefinition> {
        self.goods.iter()
    }

    pub fn len(&self) -> usize {
        self.goods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goods.is_empty()
    }

    /// Resolves a good by catalog id or case-insensitive name prefix.
    pub fn lookup(&self, query: &str) -> Option<GoodId> {
        let query = query.trim();
        if let Ok(index) = query.parse::<usize>() {
            return self.get(GoodId::new(index)).map(|good| good.id);
        }
        let lowered = query.to_ascii_lowercase();
        if lowered.is_empty() {
            return None;
        }
        self.goods
            .iter()
            .find(|good| good.name.to_ascii_lowercase().starts_with(&lowered))
            .map(|good| good.id)
    }
}

impl Default for GoodsCatalog {
    fn default() -> Self {
        Self::fallback()
    }
}

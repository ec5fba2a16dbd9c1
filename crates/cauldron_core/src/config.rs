use std::fs;
use std::path::Path;
use std::str::FromStr;

use bevy_math::{Vec2, Vec3};
use serde::Deserialize;
use tracing::debug;

use crate::error::ConfigError;
use crate::item::{ImageRef, Item, ItemCatalog, ItemKind};
use crate::pot::Vessel;
use crate::recipe::{Recipe, RecipeTable};

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");
const DEFAULT_INVENTORY_SLOTS: usize = 8;
const DEFAULT_RESULT_MOVE_DISTANCE: f32 = 40.0;
const DEFAULT_LAUNCH_DURATION: f32 = 0.5;
const DEFAULT_REVEAL_DELAY: f32 = 0.1;
const DEFAULT_PLACEMENT_SIZE: [f32; 2] = [64.0, 64.0];
pub const DEFAULT_INGREDIENT_TAG: &str = "Ingredient";

#[derive(Debug, Deserialize)]
pub struct BrewConfig {
    #[serde(default)]
    pub settings: BrewSettings,
    #[serde(default)]
    pub items: Vec<ItemConfig>,
    #[serde(default)]
    pub recipes: Vec<RecipeConfig>,
    pub vessel: VesselConfig,
    #[serde(default)]
    pub placements: Vec<PlacementConfig>,
    #[serde(default)]
    pub inventory: InventoryConfig,
    #[serde(default)]
    pub title: Option<TitleConfig>,
}

impl BrewConfig {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&data)
    }

    pub fn from_toml_str(data: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(data)?)
    }

    /// The configuration bundled with the crate.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_toml_str(DEFAULT_CONFIG)
    }

    /// Resolves every name reference and produces the immutable tables.
    pub fn build(&self) -> Result<BrewSetup, ConfigError> {
        self.settings.validate()?;

        let mut catalog = ItemCatalog::default();
        for entry in &self.items {
            let item = Item::new(&entry.name, ImageRef::new(&entry.image), entry.kind);
            if catalog.insert(item).is_none() {
                return Err(ConfigError::DuplicateItem(entry.name.clone()));
            }
        }

        let mut recipes = Vec::with_capacity(self.recipes.len());
        for entry in &self.recipes {
            let result = lookup(&catalog, &entry.result, "recipe result")?;
            if entry.ingredients.is_empty() {
                return Err(ConfigError::EmptyRecipe(entry.result.clone()));
            }
            let context = format!("recipe `{}`", entry.result);
            let ingredients = entry
                .ingredients
                .iter()
                .map(|name| lookup(&catalog, name, &context))
                .collect::<Result<Vec<_>, _>>()?;
            recipes.push(Recipe::new(result, ingredients));
        }

        let placements = self
            .placements
            .iter()
            .map(|entry| {
                Ok(Placement {
                    item: lookup(&catalog, &entry.item, "placement")?,
                    position: Vec2::from(entry.position),
                    size: Vec2::from(entry.size),
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        let starting_inventory = self
            .inventory
            .starting
            .iter()
            .map(|name| lookup(&catalog, name, "starting inventory"))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            target: "cauldron.config",
            items = catalog.len(),
            recipes = recipes.len(),
            placements = placements.len(),
            "config resolved"
        );

        Ok(BrewSetup {
            settings: self.settings.clone(),
            catalog,
            recipes: RecipeTable::new(recipes),
            vessel: self.vessel.to_vessel(),
            placements,
            starting_inventory,
            title: self.title.as_ref().map(|t| t.text.clone()),
        })
    }
}

fn lookup(catalog: &ItemCatalog, name: &str, context: &str) -> Result<Item, ConfigError> {
    catalog
        .get(name)
        .cloned()
        .ok_or_else(|| ConfigError::UnknownItem {
            context: context.to_string(),
            name: name.to_string(),
        })
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BrewSettings {
    pub inventory_slots: usize,
    pub result_move_distance: f32,
    pub launch_duration: f32,
    pub reveal_delay: f32,
    pub ingredient_tag: String,
}

impl BrewSettings {
    /// Applies `CAULDRON_*` environment overrides; unparsable values are ignored.
    pub fn overridden_by_env(self) -> Self {
        Self {
            inventory_slots: env_or("CAULDRON_INVENTORY_SLOTS", self.inventory_slots),
            result_move_distance: env_or(
                "CAULDRON_RESULT_MOVE_DISTANCE",
                self.result_move_distance,
            ),
            launch_duration: env_or("CAULDRON_LAUNCH_DURATION", self.launch_duration),
            ..self
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.inventory_slots == 0 {
            return Err(ConfigError::InvalidSetting {
                field: "inventory_slots",
                reason: "must be at least 1",
            });
        }
        if !(self.launch_duration.is_finite() && self.launch_duration > 0.0) {
            return Err(ConfigError::InvalidSetting {
                field: "launch_duration",
                reason: "must be a positive number of seconds",
            });
        }
        if !(self.result_move_distance.is_finite() && self.result_move_distance >= 0.0) {
            return Err(ConfigError::InvalidSetting {
                field: "result_move_distance",
                reason: "must not be negative",
            });
        }
        if !(self.reveal_delay.is_finite() && self.reveal_delay >= 0.0) {
            return Err(ConfigError::InvalidSetting {
                field: "reveal_delay",
                reason: "must not be negative",
            });
        }
        Ok(())
    }
}

impl Default for BrewSettings {
    fn default() -> Self {
        Self {
            inventory_slots: DEFAULT_INVENTORY_SLOTS,
            result_move_distance: DEFAULT_RESULT_MOVE_DISTANCE,
            launch_duration: DEFAULT_LAUNCH_DURATION,
            reveal_delay: DEFAULT_REVEAL_DELAY,
            ingredient_tag: DEFAULT_INGREDIENT_TAG.to_string(),
        }
    }
}

fn env_or<T: FromStr>(key: &str, fallback: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|val| val.parse().ok())
        .unwrap_or(fallback)
}

#[derive(Debug, Deserialize, Clone)]
pub struct ItemConfig {
    pub name: String,
    pub image: String,
    #[serde(default)]
    pub kind: ItemKind,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RecipeConfig {
    pub result: String,
    pub ingredients: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct VesselConfig {
    pub position: [f32; 2],
    pub size: [f32; 2],
    #[serde(default)]
    pub result_anchor: Option<[f32; 2]>,
}

impl VesselConfig {
    fn to_vessel(&self) -> Vessel {
        let position = Vec2::from(self.position).extend(0.0);
        let anchor = self.result_anchor.map(|a| Vec2::from(a).extend(0.0));
        Vessel::new(position, Vec2::from(self.size), anchor)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PlacementConfig {
    pub item: String,
    pub position: [f32; 2],
    #[serde(default = "default_placement_size")]
    pub size: [f32; 2],
}

fn default_placement_size() -> [f32; 2] {
    DEFAULT_PLACEMENT_SIZE
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct InventoryConfig {
    #[serde(default)]
    pub starting: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TitleConfig {
    pub text: String,
}

/// A world ingredient object to spawn at startup.
#[derive(Debug, Clone)]
pub struct Placement {
    pub item: Item,
    pub position: Vec2,
    pub size: Vec2,
}

/// Everything a host needs to stand up a workbench, fully resolved.
#[derive(Debug, Clone)]
pub struct BrewSetup {
    pub settings: BrewSettings,
    pub catalog: ItemCatalog,
    pub recipes: RecipeTable,
    pub vessel: Vessel,
    pub placements: Vec<Placement>,
    pub starting_inventory: Vec<Item>,
    pub title: Option<String>,
}

impl BrewSetup {
    /// An empty workbench: default settings, no items, no recipes.
    pub fn bare() -> Self {
        Self {
            settings: BrewSettings::default(),
            catalog: ItemCatalog::default(),
            recipes: RecipeTable::default(),
            vessel: Vessel::new(Vec3::ZERO, Vec2::new(200.0, 160.0), None),
            placements: Vec::new(),
            starting_inventory: Vec::new(),
            title: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        [[items]]
        name = "Herb"
        image = "herb.png"

        [[items]]
        name = "Potion"
        image = "potion.png"
        kind = "finished_product"

        [[recipes]]
        result = "Potion"
        ingredients = ["Herb", "Herb"]

        [vessel]
        position = [0.0, 0.0]
        size = [100.0, 100.0]
    "#;

    #[test]
    fn builtin_config_builds() {
        let setup = BrewConfig::builtin().and_then(|c| c.build());
        let setup = setup.expect("bundled config must be valid");
        assert!(!setup.recipes.is_empty());
        assert!(setup.title.is_some());
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let setup = BrewConfig::from_toml_str(MINIMAL).unwrap().build().unwrap();
        assert_eq!(setup.settings.inventory_slots, DEFAULT_INVENTORY_SLOTS);
        assert_eq!(setup.settings.ingredient_tag, DEFAULT_INGREDIENT_TAG);
        assert_eq!(
            setup.catalog.get("Potion").map(|i| i.kind()),
            Some(ItemKind::FinishedProduct)
        );
        assert_eq!(setup.vessel.result_anchor(), Vec3::ZERO);
        assert!(setup.placements.is_empty());
    }

    #[test]
    fn unknown_ingredient_is_rejected() {
        let data = MINIMAL.replace(r#"["Herb", "Herb"]"#, r#"["Herb", "Newt"]"#);
        let err = BrewConfig::from_toml_str(&data).unwrap().build().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownItem { ref name, .. } if name == "Newt"));
    }

    #[test]
    fn duplicate_item_is_rejected() {
        let data = format!("{MINIMAL}\n[[items]]\nname = \"Herb\"\nimage = \"x.png\"\n");
        let err = BrewConfig::from_toml_str(&data).unwrap().build().unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateItem(ref name) if name == "Herb"));
    }

    #[test]
    fn zero_slots_is_rejected() {
        let data = format!("[settings]\ninventory_slots = 0\n{MINIMAL}");
        let err = BrewConfig::from_toml_str(&data).unwrap().build().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidSetting {
                field: "inventory_slots",
                ..
            }
        ));
    }

    #[test]
    fn empty_recipe_is_rejected() {
        let data = MINIMAL.replace(r#"["Herb", "Herb"]"#, "[]");
        let err = BrewConfig::from_toml_str(&data).unwrap().build().unwrap_err();
        assert!(matches!(err, ConfigError::EmptyRecipe(_)));
    }
}

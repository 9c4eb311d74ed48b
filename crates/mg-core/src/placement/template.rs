//! Marker templates read from the resource map

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::grid::Direction;
use crate::rng::MapRng;
use crate::tiles::TileRole;

/// Attachment of a marker to another template
///
/// Written as `target` or `target,direction` where direction is a keypad
/// code (2, 4, 6 or 8).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SideOf {
    /// Id or name of the primary template
    pub target: String,
    pub direction: Option<Direction>,
}

impl TryFrom<String> for SideOf {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let mut parts = value.splitn(2, ',');
        let target = parts.next().unwrap_or_default().trim().to_string();
        if target.is_empty() {
            return Err(format!("sideOf '{value}' has no target"));
        }
        let direction = match parts.next().map(str::trim) {
            None | Some("") => None,
            Some(code) => {
                let dir = code
                    .parse::<u8>()
                    .ok()
                    .and_then(Direction::from_code)
                    .ok_or_else(|| format!("sideOf '{value}' has invalid direction '{code}'"))?;
                Some(dir)
            }
        };
        Ok(Self { target, direction })
    }
}

impl From<SideOf> for String {
    fn from(side: SideOf) -> Self {
        side.to_string()
    }
}

impl fmt::Display for SideOf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            Some(dir) => write!(f, "{},{}", self.target, dir.code()),
            None => write!(f, "{}", self.target),
        }
    }
}

fn one() -> u32 {
    1
}

/// Placement tags of a marker template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerMeta {
    /// Role the marker spawns on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tile: Option<TileRole>,

    #[serde(default = "one")]
    pub width: u32,

    #[serde(default = "one")]
    pub height: u32,

    /// Place exactly this many, as candidates allow
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<u32>,

    /// Place up to this many, each gated by `rate`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,

    /// Spawn chance in percent
    #[serde(default)]
    pub rate: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side_of: Option<SideOf>,

    #[serde(default)]
    pub entrance: bool,

    #[serde(default)]
    pub exit: bool,

    /// Clear the marker's local state whenever its map is left
    #[serde(default)]
    pub reset: bool,
}

impl Default for MarkerMeta {
    fn default() -> Self {
        Self {
            tile: None,
            width: 1,
            height: 1,
            min: None,
            max: None,
            rate: 0.0,
            side_of: None,
            entrance: false,
            exit: false,
            reset: false,
        }
    }
}

impl MarkerMeta {
    /// Minimum count, when set and non-zero
    pub fn min_count(&self) -> Option<u32> {
        self.min.filter(|&n| n > 0)
    }

    /// Maximum count, when set and non-zero
    pub fn max_count(&self) -> Option<u32> {
        self.max.filter(|&n| n > 0)
    }

    /// Whole-percent spawn chance
    pub fn rate_percent(&self) -> u32 {
        if self.rate.is_finite() && self.rate > 0.0 {
            self.rate.floor() as u32
        } else {
            0
        }
    }
}

/// A marker defined on the resource map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerTemplate {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub meta: MarkerMeta,
}

/// Templates sorted by how they are spawned
#[derive(Debug, Clone, Default)]
pub struct MarkerRules {
    pub entrance: Option<MarkerTemplate>,
    pub exit: Option<MarkerTemplate>,
    /// Randomly placed templates by the role they spawn on
    pub by_role: BTreeMap<TileRole, Vec<MarkerTemplate>>,
    /// Attached templates by target key, one per side
    pub side_of: HashMap<String, HashMap<Direction, MarkerTemplate>>,
}

impl MarkerRules {
    /// Sort templates into rule groups
    ///
    /// Entrance wins over exit, exit over attachment, attachment over role.
    /// Attachments without a direction get a random side.
    pub fn from_templates<'a>(
        templates: impl IntoIterator<Item = &'a MarkerTemplate>,
        rng: &mut MapRng,
    ) -> Self {
        let mut rules = Self::default();
        for template in templates {
            let meta = &template.meta;
            if meta.entrance {
                rules.entrance = Some(template.clone());
            } else if meta.exit {
                rules.exit = Some(template.clone());
            } else if let Some(side) = &meta.side_of {
                let dir = side.direction.unwrap_or_else(|| random_side(rng));
                rules
                    .side_of
                    .entry(side.target.clone())
                    .or_default()
                    .insert(dir, template.clone());
            } else if let Some(role) = meta.tile {
                rules.by_role.entry(role).or_default().push(template.clone());
            }
        }
        rules
    }

    /// Attachments of a primary template, by id first then by name
    pub fn attachments(&self, primary: &MarkerTemplate) -> Option<&HashMap<Direction, MarkerTemplate>> {
        self.side_of
            .get(&primary.id.to_string())
            .or_else(|| self.side_of.get(&primary.name))
    }
}

/// A uniformly random compass side
pub fn random_side(rng: &mut MapRng) -> Direction {
    Direction::from_code((rng.rand(1, 4) * 2) as u8).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(id: u32, name: &str, meta: MarkerMeta) -> MarkerTemplate {
        MarkerTemplate {
            id,
            name: name.into(),
            x: 0,
            y: 0,
            meta,
        }
    }

    #[test]
    fn test_side_of_parse() {
        let side = SideOf::try_from("chest,6".to_string()).unwrap();
        assert_eq!(side.target, "chest");
        assert_eq!(side.direction, Some(Direction::Right));
        assert_eq!(side.to_string(), "chest,6");

        let side = SideOf::try_from("3".to_string()).unwrap();
        assert_eq!(side.direction, None);

        assert!(SideOf::try_from("chest,5".to_string()).is_err());
        assert!(SideOf::try_from(",2".to_string()).is_err());
    }

    #[test]
    fn test_meta_defaults_from_json() {
        let meta: MarkerMeta = serde_json::from_str(r#"{"tile":"fCenter","min":2,"sideOf":"boss,8"}"#).unwrap();
        assert_eq!(meta.tile, Some(TileRole::FCenter));
        assert_eq!((meta.width, meta.height), (1, 1));
        assert_eq!(meta.min_count(), Some(2));
        assert_eq!(meta.max_count(), None);
        assert_eq!(meta.rate_percent(), 0);
        assert_eq!(meta.side_of.unwrap().direction, Some(Direction::Up));
    }

    #[test]
    fn test_rules_grouping() {
        let mut rng = MapRng::new(1);
        let templates = vec![
            template(1, "door_in", MarkerMeta { entrance: true, ..MarkerMeta::default() }),
            template(2, "door_out", MarkerMeta { exit: true, ..MarkerMeta::default() }),
            template(
                3,
                "chest",
                MarkerMeta { tile: Some(TileRole::FTop), ..MarkerMeta::default() },
            ),
            template(
                4,
                "guard",
                MarkerMeta {
                    side_of: Some(SideOf { target: "chest".into(), direction: None }),
                    ..MarkerMeta::default()
                },
            ),
            template(5, "note", MarkerMeta::default()),
        ];
        let rules = MarkerRules::from_templates(&templates, &mut rng);
        assert_eq!(rules.entrance.as_ref().map(|t| t.id), Some(1));
        assert_eq!(rules.exit.as_ref().map(|t| t.id), Some(2));
        assert_eq!(rules.by_role[&TileRole::FTop].len(), 1);
        assert_eq!(rules.by_role.len(), 1);

        let attached = rules.attachments(&templates[2]).unwrap();
        assert_eq!(attached.len(), 1);
        assert_eq!(attached.values().next().map(|t| t.id), Some(4));
    }
}

//! Attribute groups and the field rules used to corrupt them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::schema::{
    ENV_TIME_HASH, HUMIDITY, INVENTORY_LEVEL, LATITUDE, LOCATION_STATUS_HASH, LONGITUDE,
    SHIPMENT_STATUS, TEMPERATURE, WAITING_TIME,
};

/// How a single field is perturbed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mutation {
    /// Add a uniform offset from `[min, max)` and round to `decimals` places.
    FloatOffset { min: f64, max: f64, decimals: usize },
    /// Add a uniform integer offset from `[min, max]`.
    IntOffset { min: i64, max: i64 },
    /// Replace with a different value from the status vocabulary.
    ReplaceWithOther,
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FloatOffset { min, max, decimals } => {
                write!(f, "+[{min:.1}, {max:.1}) rounded to {decimals} dp")
            }
            Self::IntOffset { min, max } => write!(f, "+[{min}, {max}] integer"),
            Self::ReplaceWithOther => f.write_str("different status"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRule {
    pub column: String,
    pub mutation: Mutation,
}

impl FieldRule {
    pub fn new(column: impl Into<String>, mutation: Mutation) -> Self {
        Self {
            column: column.into(),
            mutation,
        }
    }
}

/// A set of columns corrupted together, invalidating one hash column.
///
/// Field rules are applied, and draw from the generator, in list order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorruptionGroup {
    /// Short name used in the report ("Location").
    pub name: String,
    /// Abbreviated field list used in the report ("Lat/Long/Inv/Shipment").
    pub summary: String,
    /// Hash column left stale by this group.
    pub hash_column: String,
    pub fields: Vec<FieldRule>,
}

impl CorruptionGroup {
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|rule| rule.column.as_str())
    }
}

/// The Location/Status group followed by the Environment/Time group.
pub fn default_groups() -> Vec<CorruptionGroup> {
    vec![
        CorruptionGroup {
            name: "Location".to_string(),
            summary: "Lat/Long/Inv/Shipment".to_string(),
            hash_column: LOCATION_STATUS_HASH.to_string(),
            fields: vec![
                FieldRule::new(
                    LATITUDE,
                    Mutation::FloatOffset {
                        min: 0.5,
                        max: 2.0,
                        decimals: 4,
                    },
                ),
                FieldRule::new(
                    LONGITUDE,
                    Mutation::FloatOffset {
                        min: 0.5,
                        max: 2.0,
                        decimals: 4,
                    },
                ),
                FieldRule::new(INVENTORY_LEVEL, Mutation::IntOffset { min: 1, max: 15 }),
                FieldRule::new(SHIPMENT_STATUS, Mutation::ReplaceWithOther),
            ],
        },
        CorruptionGroup {
            name: "Env/Time".to_string(),
            summary: "Temp/Humidity/Waiting".to_string(),
            hash_column: ENV_TIME_HASH.to_string(),
            fields: vec![
                FieldRule::new(
                    TEMPERATURE,
                    Mutation::FloatOffset {
                        min: 0.3,
                        max: 1.5,
                        decimals: 1,
                    },
                ),
                FieldRule::new(
                    HUMIDITY,
                    Mutation::FloatOffset {
                        min: 0.3,
                        max: 1.5,
                        decimals: 1,
                    },
                ),
                FieldRule::new(WAITING_TIME, Mutation::IntOffset { min: 1, max: 10 }),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_groups_draw_order() {
        let groups = default_groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(
            groups[0].columns().collect::<Vec<_>>(),
            vec![LATITUDE, LONGITUDE, INVENTORY_LEVEL, SHIPMENT_STATUS]
        );
        assert_eq!(
            groups[1].columns().collect::<Vec<_>>(),
            vec![TEMPERATURE, HUMIDITY, WAITING_TIME]
        );
    }

    #[test]
    fn groups_do_not_share_columns() {
        let groups = default_groups();
        for column in groups[0].columns() {
            assert!(groups[1].columns().all(|other| other != column));
        }
    }

    #[test]
    fn mutation_display() {
        let float = Mutation::FloatOffset {
            min: 0.5,
            max: 2.0,
            decimals: 4,
        };
        assert_eq!(float.to_string(), "+[0.5, 2.0) rounded to 4 dp");
        assert_eq!(
            Mutation::IntOffset { min: 1, max: 15 }.to_string(),
            "+[1, 15] integer"
        );
    }
}

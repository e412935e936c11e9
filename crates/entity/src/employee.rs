use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::StringList;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(indexed)]
    pub team: String,
    pub availability: Availability,
    pub strength: i16,
    pub skills: StringList,
    pub qualifications: StringList,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

/// Availability values as they appear on the wire ("Partially Available"
/// rather than an internal code) so serialized rows match the source data.
#[derive(
    Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
pub enum Availability {
    #[sea_orm(string_value = "Available")]
    #[serde(rename = "Available")]
    Available,
    #[sea_orm(string_value = "Partially Available")]
    #[serde(rename = "Partially Available")]
    PartiallyAvailable,
    #[sea_orm(string_value = "Not Available")]
    #[serde(rename = "Not Available")]
    NotAvailable,
}

impl Availability {
    pub fn as_str(self) -> &'static str {
        match self {
            Availability::Available => "Available",
            Availability::PartiallyAvailable => "Partially Available",
            Availability::NotAvailable => "Not Available",
        }
    }

    /// Case-insensitive parse; source sheets carry casings like "not Available".
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "available" => Some(Availability::Available),
            "partially available" => Some(Availability::PartiallyAvailable),
            "not available" => Some(Availability::NotAvailable),
            _ => None,
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

use sea_orm::entity::prelude::*;

/// Staffing requisition row. Column names are the snake_cased form of the
/// source sheet headers; most fields are optional because uploads routinely
/// leave them blank.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "demands")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub sno: Option<i32>,
    #[sea_orm(indexed)]
    pub project_id: Option<i32>,
    #[sea_orm(indexed)]
    pub account_id: Option<i32>,
    #[sea_orm(indexed)]
    pub role: Option<String>,
    pub role_code: Option<String>,
    pub location: Option<String>,
    #[sea_orm(indexed)]
    pub status: Option<String>,
    pub revised: Option<String>,
    pub probability: Option<i32>,
    pub allocation_percentage: Option<i32>,
    #[sea_orm(column_type = "Double", nullable)]
    pub billing_rate: Option<f64>,
    pub original_start_date: Option<Date>,
    pub allocation_end_date: Option<Date>,
    pub fulfillment_date: Option<Date>,
    pub start_month: Option<String>,
    pub resource_mapped: Option<String>,
    pub comment: Option<String>,
    pub added_by: Option<String>,
    pub added_on: Option<DateTimeWithTimeZone>,
    pub last_updated_by: Option<String>,
    pub updated_on: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

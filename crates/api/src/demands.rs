//! Demand table listing: free-text search, column sorting, pagination.

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{DateTime, FixedOffset, NaiveDate};
use entity::demand;
use sea_orm::sea_query::{Alias, Expr, Func};
use sea_orm::{
    Condition, DatabaseConnection, DbErr, EntityTrait, Order, PaginatorTrait, QueryFilter,
    QueryOrder,
};
use serde::{Deserialize, Serialize};
use tracing::info_span;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

const DEFAULT_PER_PAGE: u64 = 50;
const MAX_PER_PAGE: u64 = 100;

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct DemandRow {
    pub id: i32,
    pub sno: Option<i32>,
    pub project_id: Option<i32>,
    pub account_id: Option<i32>,
    pub role: Option<String>,
    pub role_code: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
    pub revised: Option<String>,
    pub probability: Option<i32>,
    pub allocation_percentage: Option<i32>,
    pub billing_rate: Option<f64>,
    pub original_start_date: Option<NaiveDate>,
    pub allocation_end_date: Option<NaiveDate>,
    pub fulfillment_date: Option<NaiveDate>,
    pub start_month: Option<String>,
    pub resource_mapped: Option<String>,
    pub comment: Option<String>,
    pub added_by: Option<String>,
    pub added_on: Option<DateTime<FixedOffset>>,
    pub last_updated_by: Option<String>,
    pub updated_on: Option<DateTime<FixedOffset>>,
}

impl From<demand::Model> for DemandRow {
    fn from(model: demand::Model) -> Self {
        Self {
            id: model.id,
            sno: model.sno,
            project_id: model.project_id,
            account_id: model.account_id,
            role: model.role,
            role_code: model.role_code,
            location: model.location,
            status: model.status,
            revised: model.revised,
            probability: model.probability,
            allocation_percentage: model.allocation_percentage,
            billing_rate: model.billing_rate,
            original_start_date: model.original_start_date,
            allocation_end_date: model.allocation_end_date,
            fulfillment_date: model.fulfillment_date,
            start_month: model.start_month,
            resource_mapped: model.resource_mapped,
            comment: model.comment,
            added_by: model.added_by,
            added_on: model.added_on,
            last_updated_by: model.last_updated_by,
            updated_on: model.updated_on,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DemandSort {
    #[default]
    Id,
    Role,
    Status,
    Probability,
    AllocationPercentage,
    BillingRate,
    StartDate,
    EndDate,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct DemandListQuery {
    pub q: Option<String>,
    #[serde(default)]
    pub sort: DemandSort,
    #[serde(default)]
    pub order: SortOrder,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct DemandPage {
    pub rows: Vec<DemandRow>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

/// Runs the table query. The search box matches role, location, and status
/// as case-insensitive substrings, plus the stringified account and project
/// ids, mirroring what the table used to do over the full fetch.
pub async fn list_demands(
    db: &DatabaseConnection,
    query: &DemandListQuery,
) -> Result<DemandPage, DbErr> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query
        .per_page
        .unwrap_or(DEFAULT_PER_PAGE)
        .clamp(1, MAX_PER_PAGE);
    let needle = query
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase);

    let span = info_span!(
        "demands.list",
        has_q = needle.is_some(),
        page,
        per_page,
        sort = ?query.sort,
    );
    let _guard = span.enter();

    let mut select = demand::Entity::find();
    if let Some(needle) = &needle {
        let pattern = format!("%{}%", needle);
        select = select.filter(
            Condition::any()
                .add(Expr::expr(Func::lower(Expr::col(demand::Column::Role))).like(pattern.clone()))
                .add(
                    Expr::expr(Func::lower(Expr::col(demand::Column::Location)))
                        .like(pattern.clone()),
                )
                .add(
                    Expr::expr(Func::lower(Expr::col(demand::Column::Status)))
                        .like(pattern.clone()),
                )
                .add(
                    Expr::expr(Expr::col(demand::Column::AccountId).cast_as(Alias::new("TEXT")))
                        .like(pattern.clone()),
                )
                .add(
                    Expr::expr(Expr::col(demand::Column::ProjectId).cast_as(Alias::new("TEXT")))
                        .like(pattern),
                ),
        );
    }

    let direction = match query.order {
        SortOrder::Asc => Order::Asc,
        SortOrder::Desc => Order::Desc,
    };
    let sort_column = match query.sort {
        DemandSort::Id => demand::Column::Id,
        DemandSort::Role => demand::Column::Role,
        DemandSort::Status => demand::Column::Status,
        DemandSort::Probability => demand::Column::Probability,
        DemandSort::AllocationPercentage => demand::Column::AllocationPercentage,
        DemandSort::BillingRate => demand::Column::BillingRate,
        DemandSort::StartDate => demand::Column::OriginalStartDate,
        DemandSort::EndDate => demand::Column::AllocationEndDate,
    };
    select = select
        .order_by(sort_column, direction)
        .order_by(demand::Column::Id, Order::Asc);

    let paginator = select.paginate(db, per_page);
    let totals = paginator.num_items_and_pages().await?;
    let rows = paginator.fetch_page(page - 1).await?;

    Ok(DemandPage {
        rows: rows.into_iter().map(DemandRow::from).collect(),
        total: totals.number_of_items,
        page,
        per_page,
        total_pages: totals.number_of_pages,
    })
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<DemandListQuery>,
) -> ApiResult<Json<DemandPage>> {
    let page = list_demands(state.db.as_ref(), &query).await?;
    Ok(Json(page))
}

pub async fn by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<DemandRow>> {
    let found = demand::Entity::find_by_id(id)
        .one(state.db.as_ref())
        .await?
        .ok_or(ApiError::NotFound("Demand"))?;
    Ok(Json(found.into()))
}

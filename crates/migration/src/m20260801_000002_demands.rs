use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Demands {
    Table,
    Id,
    Sno,
    ProjectId,
    AccountId,
    Role,
    RoleCode,
    Location,
    Status,
    Revised,
    Probability,
    AllocationPercentage,
    BillingRate,
    OriginalStartDate,
    AllocationEndDate,
    FulfillmentDate,
    StartMonth,
    ResourceMapped,
    Comment,
    AddedBy,
    AddedOn,
    LastUpdatedBy,
    UpdatedOn,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Demands::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Demands::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Demands::Sno).integer())
                    .col(ColumnDef::new(Demands::ProjectId).integer())
                    .col(ColumnDef::new(Demands::AccountId).integer())
                    .col(ColumnDef::new(Demands::Role).string_len(256))
                    .col(ColumnDef::new(Demands::RoleCode).string_len(64))
                    .col(ColumnDef::new(Demands::Location).string_len(128))
                    .col(ColumnDef::new(Demands::Status).string_len(64))
                    .col(ColumnDef::new(Demands::Revised).string_len(64))
                    .col(ColumnDef::new(Demands::Probability).integer())
                    .col(ColumnDef::new(Demands::AllocationPercentage).integer())
                    .col(ColumnDef::new(Demands::BillingRate).double())
                    .col(ColumnDef::new(Demands::OriginalStartDate).date())
                    .col(ColumnDef::new(Demands::AllocationEndDate).date())
                    .col(ColumnDef::new(Demands::FulfillmentDate).date())
                    .col(ColumnDef::new(Demands::StartMonth).string_len(32))
                    .col(ColumnDef::new(Demands::ResourceMapped).string_len(256))
                    .col(ColumnDef::new(Demands::Comment).text())
                    .col(ColumnDef::new(Demands::AddedBy).string_len(128))
                    .col(ColumnDef::new(Demands::AddedOn).timestamp_with_time_zone())
                    .col(ColumnDef::new(Demands::LastUpdatedBy).string_len(128))
                    .col(ColumnDef::new(Demands::UpdatedOn).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        for (name, column) in [
            ("idx_demands_role", Demands::Role),
            ("idx_demands_status", Demands::Status),
            ("idx_demands_project_id", Demands::ProjectId),
            ("idx_demands_account_id", Demands::AccountId),
        ] {
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name(name)
                        .table(Demands::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Demands::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20240601_000001_create_parts_table::Migration)]
    }
}

mod m20240601_000001_create_parts_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000001_create_parts_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // Aligned with entities::part Model
            manager
                .create_table(
                    Table::create()
                        .table(Parts::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Parts::Id).text().not_null().primary_key())
                        .col(ColumnDef::new(Parts::Reference).string().not_null())
                        .col(
                            ColumnDef::new(Parts::Weight)
                                .double()
                                .not_null()
                                .default(0.0),
                        )
                        .col(
                            ColumnDef::new(Parts::Quantity)
                                .big_integer()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Parts::Location).string().not_null())
                        .col(ColumnDef::new(Parts::Supplier).string().not_null())
                        .col(ColumnDef::new(Parts::Dimensions).string().not_null())
                        .col(ColumnDef::new(Parts::Status).string().not_null())
                        .col(
                            ColumnDef::new(Parts::ArrivalDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Parts::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(
                            ColumnDef::new(Parts::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_parts_reference")
                        .table(Parts::Table)
                        .col(Parts::Reference)
                        .if_not_exists()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Parts::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Parts {
        Table,
        Id,
        Reference,
        Weight,
        Quantity,
        Location,
        Supplier,
        Dimensions,
        Status,
        ArrivalDate,
        CreatedAt,
        UpdatedAt,
    }
}

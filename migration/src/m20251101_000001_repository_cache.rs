use sea_orm_migration::{prelude::*, schema::*};

static UQ_REPOSITORY_ORG: &str = "uq_repository_org";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RepositoryCache::Table)
                    .if_not_exists()
                    .col(pk_auto(RepositoryCache::Id))
                    .col(string_len(RepositoryCache::RepoFullName, 512))
                    .col(string_len_null(RepositoryCache::Org, 255))
                    .col(text(RepositoryCache::Payload))
                    .col(timestamp(RepositoryCache::CreatedAt))
                    .col(timestamp(RepositoryCache::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // NULL orgs are distinct to the index; the repository enforces those inside a transaction.
        manager
            .create_index(
                Index::create()
                    .name(UQ_REPOSITORY_ORG)
                    .table(RepositoryCache::Table)
                    .col(RepositoryCache::RepoFullName)
                    .col(RepositoryCache::Org)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(UQ_REPOSITORY_ORG)
                    .table(RepositoryCache::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(RepositoryCache::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum RepositoryCache {
    Table,
    Id,
    RepoFullName,
    Org,
    Payload,
    CreatedAt,
    UpdatedAt,
}

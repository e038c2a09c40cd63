use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        self.create_media_files_table(manager).await?;
        self.create_cover_art_table(manager).await?;
        self.create_indexes(manager).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CoverArt::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MediaFiles::Table).to_owned())
            .await?;
        Ok(())
    }
}

impl Migration {
    async fn create_media_files_table(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MediaFiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MediaFiles::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MediaFiles::Path).string().not_null())
                    .col(ColumnDef::new(MediaFiles::Size).big_integer().not_null())
                    .col(ColumnDef::new(MediaFiles::ModifiedAt).string().not_null())
                    .col(ColumnDef::new(MediaFiles::Descriptor).text().not_null())
                    .col(ColumnDef::new(MediaFiles::CreatedAt).string().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn create_cover_art_table(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CoverArt::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CoverArt::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CoverArt::Path).string().not_null())
                    .col(ColumnDef::new(CoverArt::Size).big_integer().not_null())
                    .col(ColumnDef::new(CoverArt::ModifiedAt).string().not_null())
                    .col(ColumnDef::new(CoverArt::Data).blob())
                    .col(ColumnDef::new(CoverArt::CreatedAt).string().not_null())
                    .to_owned(),
            )
            .await
    }

    // Identity lookups filter on (path, size, modified_at); index each
    // component on both tables.
    async fn create_indexes(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_media_files_path")
                    .table(MediaFiles::Table)
                    .col(MediaFiles::Path)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_media_files_size")
                    .table(MediaFiles::Table)
                    .col(MediaFiles::Size)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_media_files_modified_at")
                    .table(MediaFiles::Table)
                    .col(MediaFiles::ModifiedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_cover_art_path")
                    .table(CoverArt::Table)
                    .col(CoverArt::Path)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_cover_art_size")
                    .table(CoverArt::Table)
                    .col(CoverArt::Size)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_cover_art_modified_at")
                    .table(CoverArt::Table)
                    .col(CoverArt::ModifiedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum MediaFiles {
    Table,
    Id,
    Path,
    Size,
    ModifiedAt,
    Descriptor,
    CreatedAt,
}

#[derive(DeriveIden)]
enum CoverArt {
    Table,
    Id,
    Path,
    Size,
    ModifiedAt,
    Data,
    CreatedAt,
}

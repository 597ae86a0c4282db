use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ========== USERS ==========
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Email)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::DisplayName).string_len(128).not_null())
                    .col(ColumnDef::new(Users::Role).string_len(32).not_null())
                    // Bcrypt hash, or the raw password for accounts predating
                    // the hash migration.
                    .col(ColumnDef::new(Users::Password).string_len(128).not_null())
                    .col(
                        ColumnDef::new(Users::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .extra("DEFAULT NOW()"),
                    )
                    .to_owned(),
            )
            .await?;

        // ========== LOGIN ATTEMPTS (append-only audit) ==========
        manager
            .create_table(
                Table::create()
                    .table(LoginAttempts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LoginAttempts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    // Null when the attempted email matched no account.
                    .col(ColumnDef::new(LoginAttempts::UserId).integer())
                    .col(ColumnDef::new(LoginAttempts::Email).string_len(255).not_null())
                    .col(ColumnDef::new(LoginAttempts::Success).boolean().not_null())
                    .col(ColumnDef::new(LoginAttempts::Reason).string_len(64))
                    .col(ColumnDef::new(LoginAttempts::ClientIp).string_len(64))
                    .col(
                        ColumnDef::new(LoginAttempts::AttemptedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .extra("DEFAULT NOW()"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_login_attempts_user")
                            .from(LoginAttempts::Table, LoginAttempts::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // The audit listing reads newest-first.
        manager
            .create_index(
                Index::create()
                    .name("idx_login_attempts_attempted_at")
                    .table(LoginAttempts::Table)
                    .col(LoginAttempts::AttemptedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LoginAttempts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Users {
    Table,
    Id,
    Email,
    DisplayName,
    Role,
    Password,
    IsActive,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum LoginAttempts {
    Table,
    Id,
    UserId,
    Email,
    Success,
    Reason,
    ClientIp,
    AttemptedAt,
}

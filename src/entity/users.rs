use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub email: String,
    pub display_name: String,
    pub role: String,
    /// Bcrypt hash, or a legacy plaintext value for rows migrated from the
    /// old user table. See `auth::password::verify`.
    pub password: String,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::login_attempts::Entity")]
    LoginAttempts,
}

impl Related<super::login_attempts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LoginAttempts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

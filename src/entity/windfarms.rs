use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "windfarms")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub abbr: String,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::turbines::Entity")]
    Turbines,
}

impl Related<super::turbines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Turbines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

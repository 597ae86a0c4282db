use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "turbines")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub windfarm_id: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::windfarms::Entity",
        from = "Column::WindfarmId",
        to = "super::windfarms::Column::Id"
    )]
    Windfarm,
}

impl Related<super::windfarms::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Windfarm.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

use sea_orm::entity::prelude::*;

/// Singleton row, always `id = 1`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "restaurant_config")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub name: String,
    pub logo: Option<String>,
    pub primary_color: String,
    pub secondary_color: String,
    pub currency: String,
    pub language: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

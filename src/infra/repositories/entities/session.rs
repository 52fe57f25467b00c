//! Session database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::SessionRecord;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "sessions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    /// Digest of the client-held token; raw tokens are never stored
    #[sea_orm(unique)]
    pub token_hash: String,
    pub user_id: Uuid,
    pub created_at: DateTimeUtc,
    pub expires_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for SessionRecord {
    fn from(model: Model) -> Self {
        SessionRecord {
            id: model.id,
            user_id: model.user_id,
            created_at: model.created_at,
            expires_at: model.expires_at,
        }
    }
}

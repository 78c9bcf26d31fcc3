use sqlx::FromRow;

/// Database model for an external contractor
#[derive(Debug, Clone, FromRow)]
pub struct Contractor {
    pub id: i32,
    pub name: String,
    pub is_archived: bool,
}

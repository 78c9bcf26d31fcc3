use sqlx::FromRow;

/// Database model for an inspector, identified by full name
#[derive(Debug, Clone, FromRow)]
pub struct Artist {
    pub id: i32,
    pub fio: String,
}

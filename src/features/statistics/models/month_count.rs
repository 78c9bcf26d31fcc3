use sqlx::FromRow;

/// Counts of active supervisions starting in one calendar month
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct MonthCount {
    pub month: i32,
    pub all_count: i64,
    pub completed: i64,
    pub take_in_ks: i64,
}

use sqlx::FromRow;

/// Row of any id + name reference table
#[derive(Debug, Clone, FromRow)]
pub struct LookupItem {
    pub id: i32,
    pub name: String,
}

/// Reference tables sharing the id + name shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupTable {
    DayTypes,
    PaidStatuses,
    ResponsibleDepartments,
    StatusesExecution,
    StatusesKs,
}

impl LookupTable {
    pub fn as_sql(&self) -> &'static str {
        match self {
            LookupTable::DayTypes => "day_types",
            LookupTable::PaidStatuses => "paid_statuses",
            LookupTable::ResponsibleDepartments => "responsible_departments",
            LookupTable::StatusesExecution => "statuses_execution",
            LookupTable::StatusesKs => "statuses_ks",
        }
    }
}

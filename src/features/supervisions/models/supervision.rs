use chrono::NaiveDateTime;
use sqlx::FromRow;

/// Database model for a supervision joined with the names of its lookups
#[derive(Debug, Clone, FromRow)]
pub struct Supervision {
    pub id: i32,
    pub datetime_start: NaiveDateTime,
    pub datetime_end: NaiveDateTime,
    pub day_type_id: i32,
    pub station: Option<String>,
    pub department_responsible_id: i32,
    pub department_distance: Option<String>,
    pub artist_id: Option<i32>,
    pub type_work: Option<String>,
    pub contractor_id: Option<i32>,
    pub manufacturer_info: Option<String>,
    pub order_number: Option<String>,
    pub note: Option<String>,
    pub status_ks_id: i32,
    pub comment: Option<String>,
    pub paid_status_id: Option<i32>,
    pub amount: Option<i32>,
    pub status_execution_id: i32,
    pub is_archived: bool,

    // Joined lookup names
    pub artist: Option<String>,
    pub contractor: Option<String>,
    pub day_type: Option<String>,
    pub department_responsible: Option<String>,
    pub paid_status: Option<String>,
    pub status_execution: Option<String>,
    pub status_ks: Option<String>,
}

impl Supervision {
    /// Columns and joins shared by every query returning supervisions
    pub const SELECT: &'static str = r#"
        SELECT s.id, s.datetime_start, s.datetime_end, s.day_type_id, s.station,
               s.department_responsible_id, s.department_distance, s.artist_id, s.type_work,
               s.contractor_id, s.manufacturer_info, s.order_number, s.note, s.status_ks_id,
               s.comment, s.paid_status_id, s.amount, s.status_execution_id, s.is_archived,
               a.fio AS artist,
               c.name AS contractor,
               dt.name AS day_type,
               rd.name AS department_responsible,
               ps.name AS paid_status,
               se.name AS status_execution,
               sk.name AS status_ks
        FROM supervisions s
        LEFT JOIN artists a ON a.id = s.artist_id
        LEFT JOIN contractors c ON c.id = s.contractor_id
        LEFT JOIN day_types dt ON dt.id = s.day_type_id
        LEFT JOIN responsible_departments rd ON rd.id = s.department_responsible_id
        LEFT JOIN paid_statuses ps ON ps.id = s.paid_status_id
        LEFT JOIN statuses_execution se ON se.id = s.status_execution_id
        LEFT JOIN statuses_ks sk ON sk.id = s.status_ks_id
    "#;
}

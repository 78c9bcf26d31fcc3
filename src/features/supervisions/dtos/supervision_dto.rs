use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::supervisions::models::Supervision;
use crate::shared::datetime::{format_datetime, parse_datetime};
use crate::shared::input::{blank_as_none, normalize_text, present};
use crate::shared::validation::{DATETIME_REGEX, DATE_REGEX};

// =============================================================================
// SORTING
// =============================================================================

/// Columns a listing may be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Id,
    DatetimeStart,
    DatetimeEnd,
    Station,
}

impl SortKey {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortKey::Id => "s.id",
            SortKey::DatetimeStart => "s.datetime_start",
            SortKey::DatetimeEnd => "s.datetime_end",
            SortKey::Station => "s.station",
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

// =============================================================================
// LISTING
// =============================================================================

/// Query params for listing supervisions.
///
/// Either `date_start` + `date_end` or `year` + `month` must be given.
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SupervisionQueryParams {
    /// First day of the period (YYYY-MM-DD)
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(regex(path = *DATE_REGEX, message = "date_start must be YYYY-MM-DD"))]
    pub date_start: Option<String>,
    /// Last day of the period, inclusive (YYYY-MM-DD)
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(regex(path = *DATE_REGEX, message = "date_end must be YYYY-MM-DD"))]
    pub date_end: Option<String>,
    #[validate(range(min = 1, max = 9999, message = "year must be between 1 and 9999"))]
    pub year: Option<i32>,
    #[validate(range(min = 1, max = 12, message = "month must be between 1 and 12"))]
    pub month: Option<u32>,
    pub contractor_id: Option<i32>,
    pub status_ks_id: Option<i32>,
    pub status_execution_id: Option<i32>,
    pub sort_key: Option<SortKey>,
    /// Sort direction, ascending when omitted
    pub sort_by: Option<SortDirection>,
}

/// Supervision with lookup names substituted next to the raw ids
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SupervisionResponseDto {
    pub id: i32,
    /// YYYY-MM-DD HH:MM
    pub datetime_start: String,
    /// YYYY-MM-DD HH:MM
    pub datetime_end: String,
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
    pub artist: Option<String>,
    pub contractor: Option<String>,
    pub day_type: Option<String>,
    pub department_responsible: Option<String>,
    pub paid_status: Option<String>,
    pub status_execution: Option<String>,
    pub status_ks: Option<String>,
}

impl From<Supervision> for SupervisionResponseDto {
    fn from(s: Supervision) -> Self {
        Self {
            id: s.id,
            datetime_start: format_datetime(&s.datetime_start),
            datetime_end: format_datetime(&s.datetime_end),
            day_type_id: s.day_type_id,
            station: s.station,
            department_responsible_id: s.department_responsible_id,
            department_distance: s.department_distance,
            artist_id: s.artist_id,
            type_work: s.type_work,
            contractor_id: s.contractor_id,
            manufacturer_info: s.manufacturer_info,
            order_number: s.order_number,
            note: s.note,
            status_ks_id: s.status_ks_id,
            comment: s.comment,
            paid_status_id: s.paid_status_id,
            amount: s.amount,
            status_execution_id: s.status_execution_id,
            is_archived: s.is_archived,
            artist: s.artist,
            contractor: s.contractor,
            day_type: s.day_type,
            department_responsible: s.department_responsible,
            paid_status: s.paid_status,
            status_execution: s.status_execution,
            status_ks: s.status_ks,
        }
    }
}

// =============================================================================
// CREATE
// =============================================================================

/// Request DTO for creating a supervision
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateSupervisionDto {
    /// YYYY-MM-DD HH:MM
    #[validate(regex(path = *DATETIME_REGEX, message = "datetime_start must be YYYY-MM-DD HH:MM"))]
    pub datetime_start: String,
    /// YYYY-MM-DD HH:MM
    #[validate(regex(path = *DATETIME_REGEX, message = "datetime_end must be YYYY-MM-DD HH:MM"))]
    pub datetime_end: String,
    pub day_type_id: i32,
    pub station: Option<String>,
    pub department_responsible_id: i32,
    pub department_distance: Option<String>,
    /// Inspector full name, created when not known yet
    pub artist: Option<String>,
    pub type_work: Option<String>,
    pub contractor_id: Option<i32>,
    pub manufacturer_info: Option<String>,
    pub order_number: Option<String>,
    pub note: Option<String>,
    pub status_ks_id: Option<i32>,
    pub comment: Option<String>,
    pub paid_status_id: Option<i32>,
    pub amount: Option<i32>,
    pub status_execution_id: Option<i32>,
}

/// Normalized values of a supervision about to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewSupervision {
    pub datetime_start: NaiveDateTime,
    pub datetime_end: NaiveDateTime,
    pub day_type_id: i32,
    pub station: Option<String>,
    pub department_responsible_id: i32,
    pub department_distance: Option<String>,
    pub artist: Option<String>,
    pub type_work: Option<String>,
    pub contractor_id: Option<i32>,
    pub manufacturer_info: Option<String>,
    pub order_number: Option<String>,
    pub note: Option<String>,
    pub status_ks_id: Option<i32>,
    pub comment: Option<String>,
    pub paid_status_id: Option<i32>,
    pub amount: Option<i32>,
    pub status_execution_id: Option<i32>,
}

fn required_datetime(field: &str, value: String) -> Result<NaiveDateTime> {
    let value = normalize_text(Some(value))
        .ok_or_else(|| AppError::Validation(format!("{} is required", field)))?;
    parse_datetime(field, &value)
}

impl TryFrom<CreateSupervisionDto> for NewSupervision {
    type Error = AppError;

    fn try_from(dto: CreateSupervisionDto) -> Result<Self> {
        Ok(Self {
            datetime_start: required_datetime("datetime_start", dto.datetime_start)?,
            datetime_end: required_datetime("datetime_end", dto.datetime_end)?,
            day_type_id: dto.day_type_id,
            station: normalize_text(dto.station),
            department_responsible_id: dto.department_responsible_id,
            department_distance: normalize_text(dto.department_distance),
            artist: normalize_text(dto.artist),
            type_work: normalize_text(dto.type_work),
            contractor_id: dto.contractor_id,
            manufacturer_info: normalize_text(dto.manufacturer_info),
            order_number: normalize_text(dto.order_number),
            note: normalize_text(dto.note),
            status_ks_id: dto.status_ks_id,
            comment: normalize_text(dto.comment),
            paid_status_id: dto.paid_status_id,
            amount: dto.amount,
            status_execution_id: dto.status_execution_id,
        })
    }
}

// =============================================================================
// UPDATE
// =============================================================================

/// Request DTO for a partial update.
///
/// Absent fields keep their value. For nullable columns an explicit `null` or
/// blank string clears the value. The inspector is always re-resolved: an
/// absent or blank `artist` clears the reference.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateSupervisionDto {
    pub datetime_start: Option<String>,
    pub datetime_end: Option<String>,
    pub day_type_id: Option<i32>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub station: Option<Option<String>>,
    pub department_responsible_id: Option<i32>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub department_distance: Option<Option<String>>,
    pub artist: Option<String>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub type_work: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i32>)]
    pub contractor_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub manufacturer_info: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub order_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub note: Option<Option<String>>,
    pub status_ks_id: Option<i32>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub comment: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i32>)]
    pub paid_status_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i32>)]
    pub amount: Option<Option<i32>>,
    pub status_execution_id: Option<i32>,
}

/// Value assigned to one column by an update
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValue {
    Text(Option<String>),
    Int(Option<i32>),
    DateTime(NaiveDateTime),
}

/// Normalized update: column assignments plus the inspector name to resolve
#[derive(Debug, Clone, PartialEq)]
pub struct SupervisionPatch {
    pub assignments: Vec<(&'static str, ColumnValue)>,
    pub artist: Option<String>,
}

impl TryFrom<UpdateSupervisionDto> for SupervisionPatch {
    type Error = AppError;

    fn try_from(dto: UpdateSupervisionDto) -> Result<Self> {
        let mut assignments = Vec::new();

        for (column, value) in [
            ("datetime_start", dto.datetime_start),
            ("datetime_end", dto.datetime_end),
        ] {
            if let Some(value) = normalize_text(value) {
                assignments.push((column, ColumnValue::DateTime(parse_datetime(column, &value)?)));
            }
        }

        for (column, value) in [
            ("day_type_id", dto.day_type_id),
            ("department_responsible_id", dto.department_responsible_id),
            ("status_ks_id", dto.status_ks_id),
            ("status_execution_id", dto.status_execution_id),
        ] {
            if let Some(value) = value {
                assignments.push((column, ColumnValue::Int(Some(value))));
            }
        }

        for (column, value) in [
            ("station", dto.station),
            ("department_distance", dto.department_distance),
            ("type_work", dto.type_work),
            ("manufacturer_info", dto.manufacturer_info),
            ("order_number", dto.order_number),
            ("note", dto.note),
            ("comment", dto.comment),
        ] {
            if let Some(value) = value {
                assignments.push((column, ColumnValue::Text(normalize_text(value))));
            }
        }

        for (column, value) in [
            ("contractor_id", dto.contractor_id),
            ("paid_status_id", dto.paid_status_id),
            ("amount", dto.amount),
        ] {
            if let Some(value) = value {
                assignments.push((column, ColumnValue::Int(value)));
            }
        }

        Ok(Self {
            assignments,
            artist: normalize_text(dto.artist),
        })
    }
}

// =============================================================================
// SETTLEMENT
// =============================================================================

/// Request DTO for the bulk settlement (KS) status flip
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct TakeInKsDto {
    /// Records accepted into settlement
    #[serde(default)]
    pub take_in_ks_ids: Option<Vec<i32>>,
    /// Records rejected from settlement; their comment is cleared
    #[serde(default)]
    pub not_take_in_ks_ids: Option<Vec<i32>>,
}

/// Number of rows changed by the settlement flip
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TakeInKsResponseDto {
    pub taken_in: u64,
    pub not_taken_in: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn create_dto() -> CreateSupervisionDto {
        CreateSupervisionDto {
            datetime_start: "2024-01-01 08:00".to_string(),
            datetime_end: "2024-01-01 17:00".to_string(),
            day_type_id: 1,
            station: Some("  ".to_string()),
            department_responsible_id: 1,
            department_distance: Some("ШЧ-1".to_string()),
            artist: Some("".to_string()),
            type_work: None,
            contractor_id: None,
            manufacturer_info: None,
            order_number: Some(" 12/3 ".to_string()),
            note: None,
            status_ks_id: None,
            comment: Some("".to_string()),
            paid_status_id: None,
            amount: Some(1500),
            status_execution_id: None,
        }
    }

    #[test]
    fn test_create_normalizes_blank_strings() {
        let new = NewSupervision::try_from(create_dto()).unwrap();

        assert_eq!(new.station, None);
        assert_eq!(new.artist, None);
        assert_eq!(new.comment, None);
        assert_eq!(new.order_number, Some("12/3".to_string()));
        assert_eq!(
            new.datetime_start,
            NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_create_rejects_blank_and_malformed_dates() {
        let mut dto = create_dto();
        dto.datetime_start = "   ".to_string();
        assert!(matches!(
            NewSupervision::try_from(dto),
            Err(AppError::Validation(_))
        ));

        let mut dto = create_dto();
        dto.datetime_end = "2024-01-32 17:00".to_string();
        assert!(matches!(
            NewSupervision::try_from(dto),
            Err(AppError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_create_validates_datetime_shape() {
        assert!(create_dto().validate().is_ok());

        let mut dto = create_dto();
        dto.datetime_start = "01.01.2024 08:00".to_string();
        let err = dto.validate().unwrap_err();
        assert!(err.to_string().contains("datetime_start"));
    }

    #[test]
    fn test_create_requires_mandatory_fields_in_json() {
        let result = serde_json::from_str::<CreateSupervisionDto>(
            r#"{"datetime_start": "2024-01-01 08:00", "datetime_end": "2024-01-01 17:00"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_patch_keeps_absent_fields_and_clears_explicit_nulls() {
        let dto: UpdateSupervisionDto = serde_json::from_str(
            r#"{"note": null, "station": "", "amount": null, "contractor_id": 4, "status_ks_id": 1}"#,
        )
        .unwrap();
        let patch = SupervisionPatch::try_from(dto).unwrap();

        assert!(patch
            .assignments
            .contains(&("note", ColumnValue::Text(None))));
        assert!(patch
            .assignments
            .contains(&("station", ColumnValue::Text(None))));
        assert!(patch.assignments.contains(&("amount", ColumnValue::Int(None))));
        assert!(patch
            .assignments
            .contains(&("contractor_id", ColumnValue::Int(Some(4)))));
        assert!(patch
            .assignments
            .contains(&("status_ks_id", ColumnValue::Int(Some(1)))));
        assert!(!patch.assignments.iter().any(|(c, _)| *c == "type_work"));
        assert!(!patch.assignments.iter().any(|(c, _)| *c == "datetime_start"));
        assert_eq!(patch.assignments.len(), 5);
    }

    #[test]
    fn test_patch_without_artist_clears_it() {
        let patch = SupervisionPatch::try_from(UpdateSupervisionDto::default()).unwrap();
        assert_eq!(patch.artist, None);
        assert!(patch.assignments.is_empty());

        let dto: UpdateSupervisionDto =
            serde_json::from_str(r#"{"artist": " Иванов И. И. "}"#).unwrap();
        let patch = SupervisionPatch::try_from(dto).unwrap();
        assert_eq!(patch.artist, Some("Иванов И. И.".to_string()));
    }

    #[test]
    fn test_patch_parses_dates() {
        let dto: UpdateSupervisionDto =
            serde_json::from_str(r#"{"datetime_end": "2024-03-01T10:30"}"#).unwrap();
        let patch = SupervisionPatch::try_from(dto).unwrap();

        assert_eq!(
            patch.assignments,
            vec![(
                "datetime_end",
                ColumnValue::DateTime(
                    NaiveDate::from_ymd_opt(2024, 3, 1)
                        .unwrap()
                        .and_hms_opt(10, 30, 0)
                        .unwrap()
                )
            )]
        );

        let dto: UpdateSupervisionDto =
            serde_json::from_str(r#"{"datetime_end": "tomorrow"}"#).unwrap();
        assert!(SupervisionPatch::try_from(dto).is_err());
    }

    #[test]
    fn test_sort_params_deserialize() {
        let key: SortKey = serde_json::from_str(r#""datetime_start""#).unwrap();
        let direction: SortDirection = serde_json::from_str(r#""DESC""#).unwrap();

        assert_eq!(key.as_sql(), "s.datetime_start");
        assert_eq!(direction.as_sql(), "DESC");
        assert!(serde_json::from_str::<SortKey>(r#""note""#).is_err());
        assert!(serde_json::from_str::<SortDirection>(r#""desc""#).is_err());
    }
}

use chrono::NaiveDateTime;
use rust_xlsxwriter::{Format, FormatAlign, Workbook, Worksheet, XlsxError};

use crate::core::error::{AppError, Result};
use crate::features::exports::dtos::LoadType;
use crate::features::supervisions::models::Supervision;
use crate::shared::constants::EXPORT_DATETIME_FORMAT;

const SHEET_NAME: &str = "Выгрузка";
const TITLE: &str = "План работы МТК";
const TITLE_ROW_HEIGHT: f64 = 80.0;
const COLUMN_WIDTHS: [f64; 14] = [
    17.0, 23.0, 23.0, 20.0, 50.0, 14.0, 22.0, 53.0, 31.0, 27.0, 36.0, 60.0, 20.0, 20.0,
];

const HEADERS: [&str; 14] = [
    "№ п/п",
    "Дата, время начала работ",
    "Дата, время окончания работ",
    "Время, всего",
    "Станция (место проведения работ)",
    "Отдел, Дистанция",
    "Ф. И. О. осуществляющего технический надзор",
    "Вид проводимой работы (объем произведенной работы)",
    "Название сторонней организации",
    "Фамилия, Имя, телефон производителя",
    "Номер совместного приказа",
    "Примечание",
    "Подпись работника",
    "Ответственное подразделение",
];

/// One spreadsheet cell value
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
    Blank,
}

impl From<Option<String>> for Cell {
    fn from(value: Option<String>) -> Self {
        value.map_or(Cell::Blank, Cell::Text)
    }
}

/// Header labels of a layout
pub fn headers(layout: LoadType) -> &'static [&'static str] {
    match layout {
        LoadType::Inside => &HEADERS,
        LoadType::Outside => &HEADERS[..13],
    }
}

/// Window length in whole hours, ties rounded to even
pub fn total_hours(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    let seconds = (end - start).num_seconds() as f64;
    (seconds / 3600.0).round_ties_even()
}

/// Cells of one data row; `position` is the 1-based row number
pub fn row_cells(position: usize, supervision: &Supervision, layout: LoadType) -> Vec<Cell> {
    let mut cells = vec![
        Cell::Number(position as f64),
        Cell::Text(
            supervision
                .datetime_start
                .format(EXPORT_DATETIME_FORMAT)
                .to_string(),
        ),
        Cell::Text(
            supervision
                .datetime_end
                .format(EXPORT_DATETIME_FORMAT)
                .to_string(),
        ),
        Cell::Number(total_hours(
            supervision.datetime_start,
            supervision.datetime_end,
        )),
        supervision.station.clone().into(),
        supervision.department_distance.clone().into(),
        supervision.artist.clone().into(),
        supervision.type_work.clone().into(),
        supervision.contractor.clone().into(),
        supervision.manufacturer_info.clone().into(),
        supervision.order_number.clone().into(),
        supervision.note.clone().into(),
        // Signature is filled in by hand on the printout
        Cell::Blank,
    ];

    if layout == LoadType::Inside {
        cells.push(supervision.department_responsible.clone().into());
    }

    cells
}

fn to_export_error(e: XlsxError) -> AppError {
    AppError::Internal(format!("Failed to build spreadsheet: {}", e))
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &Cell,
    format: &Format,
) -> std::result::Result<(), XlsxError> {
    match cell {
        Cell::Number(n) => worksheet.write_number_with_format(row, col, *n, format)?,
        Cell::Text(s) => worksheet.write_string_with_format(row, col, s, format)?,
        Cell::Blank => worksheet.write_blank(row, col, format)?,
    };
    Ok(())
}

/// Render supervisions into an xlsx workbook, rows in the given order
pub fn build_workbook(supervisions: &[Supervision], layout: LoadType) -> Result<Vec<u8>> {
    let headers = headers(layout);
    let last_col = (headers.len() - 1) as u16;

    let title_format = Format::new()
        .set_font_size(22)
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_text_wrap();
    let header_format = Format::new()
        .set_font_size(14)
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_text_wrap();
    let body_format = Format::new().set_font_size(14).set_text_wrap();

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME).map_err(to_export_error)?;

    worksheet
        .merge_range(0, 0, 0, last_col, TITLE, &title_format)
        .map_err(to_export_error)?;
    worksheet
        .set_row_height(0, TITLE_ROW_HEIGHT)
        .map_err(to_export_error)?;

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_string_with_format(1, col as u16, *header, &header_format)
            .map_err(to_export_error)?;
    }

    for (index, supervision) in supervisions.iter().enumerate() {
        let row = (index + 2) as u32;
        for (col, cell) in row_cells(index + 1, supervision, layout).iter().enumerate() {
            write_cell(worksheet, row, col as u16, cell, &body_format).map_err(to_export_error)?;
        }
    }

    for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
        worksheet
            .set_column_width(col as u16, *width)
            .map_err(to_export_error)?;
    }

    workbook.save_to_buffer().map_err(to_export_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn supervision(start: NaiveDateTime, end: NaiveDateTime) -> Supervision {
        Supervision {
            id: 1,
            datetime_start: start,
            datetime_end: end,
            day_type_id: 1,
            station: Some("Тверь".to_string()),
            department_responsible_id: 1,
            department_distance: Some("ШЧ-2".to_string()),
            artist_id: Some(3),
            type_work: Some("Замена стрелочного перевода".to_string()),
            contractor_id: Some(5),
            manufacturer_info: None,
            order_number: Some("17".to_string()),
            note: None,
            status_ks_id: 2,
            comment: None,
            paid_status_id: None,
            amount: None,
            status_execution_id: 1,
            is_archived: false,
            artist: Some("Иванов Иван Иванович".to_string()),
            contractor: Some("ООО Путьстрой".to_string()),
            day_type: Some("Рабочий".to_string()),
            department_responsible: Some("Дирекция".to_string()),
            paid_status: None,
            status_execution: Some("Новая".to_string()),
            status_ks: Some("Не учтено в КС".to_string()),
        }
    }

    #[test]
    fn test_total_hours_of_working_day() {
        assert_eq!(total_hours(at(1, 8, 0), at(1, 17, 0)), 9.0);
        assert_eq!(total_hours(at(1, 22, 0), at(2, 6, 20)), 8.0);
    }

    #[test]
    fn test_total_hours_rounds_ties_to_even() {
        assert_eq!(total_hours(at(1, 8, 0), at(1, 10, 30)), 2.0);
        assert_eq!(total_hours(at(1, 8, 0), at(1, 11, 30)), 4.0);
        assert_eq!(total_hours(at(1, 8, 0), at(1, 8, 31)), 1.0);
    }

    #[test]
    fn test_layouts_differ_by_department_column() {
        assert_eq!(headers(LoadType::Outside).len(), 13);
        assert_eq!(headers(LoadType::Inside).len(), 14);
        assert_eq!(headers(LoadType::Inside)[13], "Ответственное подразделение");

        let s = supervision(at(1, 8, 0), at(1, 17, 0));
        assert_eq!(row_cells(1, &s, LoadType::Outside).len(), 13);

        let inside = row_cells(1, &s, LoadType::Inside);
        assert_eq!(inside[13], Cell::Text("Дирекция".to_string()));
    }

    #[test]
    fn test_row_cells_content() {
        let s = supervision(at(1, 8, 0), at(1, 17, 0));
        let cells = row_cells(4, &s, LoadType::Outside);

        assert_eq!(cells[0], Cell::Number(4.0));
        assert_eq!(cells[1], Cell::Text("01.01.2024 08:00".to_string()));
        assert_eq!(cells[2], Cell::Text("01.01.2024 17:00".to_string()));
        assert_eq!(cells[3], Cell::Number(9.0));
        assert_eq!(cells[8], Cell::Text("ООО Путьстрой".to_string()));
        assert_eq!(cells[9], Cell::Blank);
        assert_eq!(cells[12], Cell::Blank);
    }

    #[test]
    fn test_build_workbook_produces_xlsx() {
        let rows = vec![
            supervision(at(1, 8, 0), at(1, 17, 0)),
            supervision(at(2, 9, 0), at(2, 12, 0)),
        ];

        for layout in [LoadType::Inside, LoadType::Outside] {
            let bytes = build_workbook(&rows, layout).unwrap();
            assert!(bytes.starts_with(b"PK"));
        }

        let empty = build_workbook(&[], LoadType::Outside).unwrap();
        assert!(empty.starts_with(b"PK"));
    }
}

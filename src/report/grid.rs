//! Declarative description of the report table.
//!
//! The paper form is a 7-column grid with merged cells. Rather than building
//! the merges imperatively against the PDF engine, the layout is described
//! here as plain data (spans, alignments, shading, minimum heights) and
//! turned into engine elements by [`crate::report::layout`]. This keeps the
//! merge geometry testable without rendering anything.

use crate::submission::record::SubmissionRecord;

pub const GRID_COLUMNS: usize = 7;

/// Column width ratio of the 7-column grid, scaled by the engine to the
/// usable page width.
pub const COLUMN_WEIGHTS: [usize; GRID_COLUMNS] = [15, 30, 45, 35, 60, 30, 35];

/// Minimum height reserved for the inspection-notes row.
pub const NOTES_MIN_HEIGHT_MM: f64 = 50.0;

pub const REPORT_TITLE: &str = "함정 장비 상태 현황";
pub const NO_PHOTO_LABEL: &str = "사진 없음";
pub const PHOTO_ERROR_LABEL: &str = "이미지 오류";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellAlign {
    Left,
    Center,
}

/// Content of a single grid cell.
pub enum CellBody {
    Text(String),
    /// Multi-line text, one paragraph per line.
    Lines(Vec<String>),
    /// A decoded photo, scaled by the layout routine to the fixed target
    /// width.
    Image(image::DynamicImage),
}

pub struct Cell {
    pub span: usize,
    pub align: CellAlign,
    pub body: CellBody,
}

impl Cell {
    pub fn text(span: usize, align: CellAlign, text: impl Into<String>) -> Self {
        Self {
            span,
            align,
            body: CellBody::Text(text.into()),
        }
    }

    pub fn lines(span: usize, align: CellAlign, lines: Vec<String>) -> Self {
        Self {
            span,
            align,
            body: CellBody::Lines(lines),
        }
    }
}

pub struct Row {
    /// Header rows get the grey background band and bold labels.
    pub header: bool,
    pub min_height_mm: Option<f64>,
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn header(cells: Vec<Cell>) -> Self {
        Self {
            header: true,
            min_height_mm: None,
            cells,
        }
    }

    pub fn data(cells: Vec<Cell>) -> Self {
        Self {
            header: false,
            min_height_mm: None,
            cells,
        }
    }

    pub fn with_min_height(mut self, mm: f64) -> Self {
        self.min_height_mm = Some(mm);
        self
    }

    pub fn span_total(&self) -> usize {
        self.cells.iter().map(|c| c.span).sum()
    }

    /// Column weights for this row, summed over each cell's span so merged
    /// cells keep the same column edges as unmerged rows.
    pub fn weights(&self) -> Vec<usize> {
        let mut weights = Vec::with_capacity(self.cells.len());
        let mut column = 0;
        for cell in &self.cells {
            let weight: usize = COLUMN_WEIGHTS[column..column + cell.span].iter().sum();
            weights.push(weight);
            column += cell.span;
        }
        weights
    }
}

pub struct TableSpec {
    pub rows: Vec<Row>,
}

impl TableSpec {
    /// Every row must cover the full 7-column grid.
    pub fn validate(&self) -> Result<(), String> {
        for (index, row) in self.rows.iter().enumerate() {
            let total = row.span_total();
            if total != GRID_COLUMNS {
                return Err(format!(
                    "row {index} spans {total} columns, expected {GRID_COLUMNS}"
                ));
            }
        }
        Ok(())
    }
}

/// Builds the fixed report table from a validated record. The photo cell's
/// body is decided by the caller (image, or one of the placeholder labels).
pub fn report_grid(record: &SubmissionRecord, photo: CellBody) -> TableSpec {
    let header = Row::header(vec![
        Cell::text(1, CellAlign::Center, "연번"),
        Cell::text(1, CellAlign::Center, "함정(파출소)"),
        Cell::text(1, CellAlign::Center, "구분/기기"),
        Cell::text(1, CellAlign::Center, "제품명(model)"),
        Cell::text(1, CellAlign::Center, "지원 요청 항목"),
        Cell::text(1, CellAlign::Center, "담당자"),
        Cell::text(1, CellAlign::Center, "연락처"),
    ]);

    // Single-record reports only, so the sequence number is constant.
    let data = Row::data(vec![
        Cell::text(1, CellAlign::Center, "1"),
        Cell::text(1, CellAlign::Center, record.vessel.as_str()),
        Cell::text(1, CellAlign::Center, record.dept_equipment()),
        Cell::text(1, CellAlign::Center, record.model.as_str()),
        Cell::text(1, CellAlign::Left, record.action_req.as_str()),
        Cell::text(1, CellAlign::Center, record.reporter()),
        Cell::text(1, CellAlign::Center, record.phone.as_str()),
    ]);

    let sub_header = Row::header(vec![
        Cell::text(1, CellAlign::Center, "기기 상태"),
        Cell::text(4, CellAlign::Center, "함정 점검 사항"),
        Cell::text(2, CellAlign::Center, "문제점 사진"),
    ]);

    let notes = Row::data(vec![
        Cell::text(1, CellAlign::Center, record.condition.as_str()),
        Cell::lines(4, CellAlign::Left, record.status_lines()),
        Cell {
            span: 2,
            align: CellAlign::Center,
            body: photo,
        },
    ])
    .with_min_height(NOTES_MIN_HEIGHT_MM);

    TableSpec {
        rows: vec![header, data, sub_header, notes],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submission::record::ReportForm;

    fn sample_record() -> SubmissionRecord {
        ReportForm {
            vessel: "117정".to_string(),
            department: "기관".to_string(),
            rank: "경사".to_string(),
            name: "홍길동".to_string(),
            phone: "010-1234-5678".to_string(),
            equipment: "발전기".to_string(),
            model: "ABC-100".to_string(),
            action_req: "부품 교체".to_string(),
            condition: "작동 불가".to_string(),
            status: "누유 발생\n소음 심함".to_string(),
        }
        .validate()
        .expect("sample record")
    }

    #[test]
    fn every_row_covers_the_grid() {
        let spec = report_grid(&sample_record(), CellBody::Text(NO_PHOTO_LABEL.to_string()));
        assert_eq!(spec.rows.len(), 4);
        spec.validate().expect("spans cover the grid");
    }

    #[test]
    fn merged_rows_preserve_column_edges() {
        let spec = report_grid(&sample_record(), CellBody::Text(NO_PHOTO_LABEL.to_string()));
        let merged = spec.rows[2].weights();
        assert_eq!(merged, vec![15, 170, 65]);
        assert_eq!(
            merged.iter().sum::<usize>(),
            COLUMN_WEIGHTS.iter().sum::<usize>()
        );
        assert_eq!(spec.rows[0].weights(), COLUMN_WEIGHTS.to_vec());
    }

    #[test]
    fn data_row_composes_cells() {
        let spec = report_grid(&sample_record(), CellBody::Text(NO_PHOTO_LABEL.to_string()));
        let data = &spec.rows[1];
        let texts: Vec<&str> = data
            .cells
            .iter()
            .map(|c| match &c.body {
                CellBody::Text(t) => t.as_str(),
                _ => panic!("data row holds text cells"),
            })
            .collect();
        assert_eq!(
            texts,
            vec![
                "1",
                "117정",
                "기관-발전기",
                "ABC-100",
                "부품 교체",
                "경사 홍길동",
                "010-1234-5678"
            ]
        );
        // The requested-action cell is the only left-aligned one.
        assert_eq!(data.cells[4].align, CellAlign::Left);
        assert!(
            data.cells
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != 4)
                .all(|(_, c)| c.align == CellAlign::Center)
        );
    }

    #[test]
    fn notes_row_splits_status_lines_and_reserves_height() {
        let spec = report_grid(&sample_record(), CellBody::Text(NO_PHOTO_LABEL.to_string()));
        let notes = &spec.rows[3];
        assert_eq!(notes.min_height_mm, Some(NOTES_MIN_HEIGHT_MM));
        match &notes.cells[1].body {
            CellBody::Lines(lines) => assert_eq!(lines, &vec!["누유 발생", "소음 심함"]),
            _ => panic!("notes cell holds lines"),
        }
        assert_eq!(notes.cells[1].align, CellAlign::Left);
    }
}

//! Table extraction.

use crate::error::{Error, Extractor, Result};
use crate::model::{AnalysisResult, BoundingRegionRecord, Cell, CellRecord, Table, TableRecord};

/// Flatten detected tables into records, one per table.
///
/// `table_index` is the table's position in the source sequence. It is not
/// derived from any property of the table, so a re-run over the same input
/// assigns the same indices. Cells and regions keep their source order and
/// polygons are copied point for point.
pub fn extract_tables(result: &AnalysisResult) -> Result<Vec<TableRecord>> {
    result
        .tables
        .iter()
        .enumerate()
        .map(|(table_index, table)| table_record(table_index, table))
        .collect()
}

fn table_record(table_index: usize, table: &Table) -> Result<TableRecord> {
    let cells = table
        .cells
        .iter()
        .enumerate()
        .map(|(cell_idx, cell)| cell_record(table_index, table, cell_idx, cell))
        .collect::<Result<Vec<_>>>()?;

    Ok(TableRecord {
        table_index,
        row_count: table.row_count,
        column_count: table.column_count,
        cells,
    })
}

fn cell_record(
    table_index: usize,
    table: &Table,
    cell_idx: usize,
    cell: &Cell,
) -> Result<CellRecord> {
    let out_of_grid = |what: &str, index: u32, count: u32, count_name: &str| {
        Error::input_shape(
            Extractor::Tables,
            format!("tables[{}].cells[{}]", table_index, cell_idx),
            format!("{} {} is outside {} {}", what, index, count_name, count),
        )
    };

    if cell.row_index >= table.row_count {
        return Err(out_of_grid(
            "row_index",
            cell.row_index,
            table.row_count,
            "row_count",
        ));
    }
    if cell.column_index >= table.column_count {
        return Err(out_of_grid(
            "column_index",
            cell.column_index,
            table.column_count,
            "column_count",
        ));
    }

    // Region page numbers are not checked against the page list: tables may
    // continue onto pages that contributed no lines.
    let bounding_regions = cell
        .bounding_regions
        .iter()
        .map(|region| BoundingRegionRecord {
            page_number: region.page_number,
            polygon: region.polygon.clone(),
        })
        .collect();

    Ok(CellRecord {
        row_index: cell.row_index,
        column_index: cell.column_index,
        content: cell.content.clone(),
        bounding_regions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoundingRegion, Point};

    fn quad() -> Vec<Point> {
        vec![
            Point::new(1.0, 2.0),
            Point::new(3.0, 2.0),
            Point::new(3.0, 4.0),
            Point::new(1.0, 4.0),
        ]
    }

    #[test]
    fn test_table_index_is_positional() {
        let mut result = AnalysisResult::new();
        result.add_table(Table::new(5, 5));
        result.add_table(Table::new(1, 1));
        result.add_table(Table::new(5, 5));

        let records = extract_tables(&result).unwrap();
        let indices: Vec<usize> = records.iter().map(|t| t.table_index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_cells_keep_source_order() {
        let mut result = AnalysisResult::new();
        result.add_table(
            Table::new(2, 2)
                .with_cell(Cell::new(1, 1, "d"))
                .with_cell(Cell::new(0, 0, "a"))
                .with_cell(Cell::new(1, 0, "c")),
        );

        let records = extract_tables(&result).unwrap();
        let contents: Vec<&str> = records[0]
            .cells
            .iter()
            .map(|c| c.content.as_str())
            .collect();
        assert_eq!(contents, vec!["d", "a", "c"]);
    }

    #[test]
    fn test_regions_copied_verbatim() {
        let mut result = AnalysisResult::new();
        result.add_table(
            Table::new(1, 1).with_cell(
                Cell::new(0, 0, "spans pages")
                    .with_region(BoundingRegion::new(4, quad()))
                    .with_region(BoundingRegion::new(9, vec![Point::new(0.1234567, 9.87654321)])),
            ),
        );

        let records = extract_tables(&result).unwrap();
        let regions = &records[0].cells[0].bounding_regions;
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].page_number, 4);
        assert_eq!(regions[0].polygon, quad());
        assert_eq!(regions[1].page_number, 9);
        assert_eq!(regions[1].polygon, vec![Point::new(0.1234567, 9.87654321)]);
    }

    #[test]
    fn test_empty_levels() {
        let mut result = AnalysisResult::new();
        result.add_table(Table::new(0, 0));
        result.add_table(Table::new(1, 1).with_cell(Cell::new(0, 0, "")));

        let records = extract_tables(&result).unwrap();
        assert!(records[0].cells.is_empty());
        assert!(records[1].cells[0].bounding_regions.is_empty());
    }

    #[test]
    fn test_cell_outside_grid_reports_location() {
        let mut result = AnalysisResult::new();
        result.add_table(Table::new(1, 1).with_cell(Cell::new(0, 0, "ok")));
        result.add_table(
            Table::new(2, 2)
                .with_cell(Cell::new(0, 0, "ok"))
                .with_cell(Cell::new(0, 2, "too far right")),
        );

        match extract_tables(&result).unwrap_err() {
            Error::InputShape {
                extractor,
                location,
                message,
            } => {
                assert_eq!(extractor, Extractor::Tables);
                assert_eq!(location, "tables[1].cells[1]");
                assert!(message.contains("column_index 2"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_extract_tables_twice_is_identical() {
        let mut result = AnalysisResult::new();
        result.add_table(
            Table::new(1, 2)
                .with_cell(Cell::new(0, 0, "a").with_region(BoundingRegion::new(1, quad())))
                .with_cell(Cell::new(0, 1, "b")),
        );
        result.add_table(Table::new(0, 0));

        assert_eq!(
            extract_tables(&result).unwrap(),
            extract_tables(&result).unwrap()
        );
    }
}

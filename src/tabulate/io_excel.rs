// Reading the same ranking grid out of an Excel workbook.

use calamine::{open_workbook, DataType, Reader, Xlsx};
use log::debug;
use snafu::prelude::*;

use crate::tabulate::{io_common::make_default_id, *};

pub fn read_excel_ranking(
    path: &str,
    worksheet_name: &Option<String>,
    skip_cols: usize,
) -> CliResult<Vec<ParsedBallot>> {
    let default_id = make_default_id(path);
    let wrange = get_range(path, worksheet_name)?;

    let mut rows = wrange.rows();
    let header = match rows.next() {
        Some(row) => row,
        None => return MissingHeaderSnafu {}.fail(),
    };
    debug!("read_excel_ranking: header: {:?}", header);
    let candidates: Vec<String> = header
        .iter()
        .skip(skip_cols)
        .map(|cell| match cell {
            DataType::String(s) => s.trim().to_string(),
            _ => String::new(),
        })
        .collect();

    let mut res: Vec<ParsedBallot> = Vec::new();
    for (idx, row) in rows.enumerate() {
        let lineno = idx + 2;
        let mut ranks: Vec<(String, u32)> = Vec::new();
        for (col, cell) in row.iter().skip(skip_cols).enumerate() {
            let rank = read_rank_cell(cell, lineno as u64)?;
            if let (Some(rank), Some(candidate)) = (rank, candidates.get(col)) {
                if !candidate.is_empty() {
                    ranks.push((candidate.clone(), rank));
                }
            }
        }
        debug!("read_excel_ranking: lineno: {:?} ranks: {:?}", lineno, ranks);
        res.push(ParsedBallot {
            id: default_id(lineno),
            ranks,
        });
    }
    Ok(res)
}

// A rank cell holds a number, a numeric string, or nothing at all.
fn read_rank_cell(cell: &DataType, lineno: u64) -> CliResult<Option<u32>> {
    match cell {
        DataType::Int(i) if *i >= 0 => Ok(Some(*i as u32)),
        DataType::Float(f) if *f >= 0.0 && f.fract() == 0.0 => Ok(Some(*f as u32)),
        // Out-of-range numbers rank no one, like any other junk cell.
        DataType::Int(_) | DataType::Float(_) => Ok(None),
        DataType::String(s) => Ok(s.trim().parse::<u32>().ok()),
        DataType::Empty => Ok(None),
        _ => ExcelWrongCellTypeSnafu {
            lineno,
            content: format!("{:?}", cell),
        }
        .fail(),
    }
}

fn get_range(
    path: &str,
    worksheet_name: &Option<String>,
) -> CliResult<calamine::Range<DataType>> {
    debug!("get_range: path: {:?} worksheet: {:?}", path, worksheet_name);
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;

    // A worksheet name was provided, use it.
    if let Some(worksheet_name) = worksheet_name {
        let wrange = workbook
            .worksheet_range(worksheet_name)
            .context(MissingWorksheetSnafu {
                name: worksheet_name,
            })?
            .context(OpeningExcelSnafu { path })?;
        Ok(wrange)
    } else {
        let all_worksheets = workbook.worksheets();
        match all_worksheets.as_slice() {
            [] => EmptyExcelSnafu {}.fail(),
            [(worksheet_name, wrange)] => {
                debug!("get_range: using the single worksheet {:?}", worksheet_name);
                Ok(wrange.clone())
            }
            _ => {
                whatever!(
                    "The workbook holds several worksheets; pass --excel-worksheet-name to select one"
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_cells_accept_numbers_and_numeric_strings() {
        assert_eq!(read_rank_cell(&DataType::Int(2), 1).unwrap(), Some(2));
        assert_eq!(read_rank_cell(&DataType::Float(3.0), 1).unwrap(), Some(3));
        assert_eq!(
            read_rank_cell(&DataType::String("1".to_string()), 1).unwrap(),
            Some(1)
        );
        assert_eq!(
            read_rank_cell(&DataType::String("abstain".to_string()), 1).unwrap(),
            None
        );
        assert_eq!(read_rank_cell(&DataType::Empty, 1).unwrap(), None);
    }

    #[test]
    fn fractional_and_boolean_cells_are_not_ranks() {
        assert_eq!(read_rank_cell(&DataType::Float(1.5), 1).unwrap(), None);
        assert_eq!(read_rank_cell(&DataType::Int(-2), 1).unwrap(), None);
        assert!(matches!(
            read_rank_cell(&DataType::Bool(true), 1),
            Err(CliError::ExcelWrongCellType { .. })
        ));
    }
}

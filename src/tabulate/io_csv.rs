// Primitives for reading CSV ranking grids.

use std::io::Read;

use log::debug;
use snafu::prelude::*;

use crate::tabulate::{io_common::make_default_id, *};

/// Reads a ranking grid: a header row naming the candidates after
/// `skip_cols` metadata columns, then one row per voter whose cells hold
/// the rank given to each candidate, or anything else to rank no one.
pub fn read_csv_ranking<R: Read>(
    rdr: R,
    skip_cols: usize,
    source: &str,
) -> CliResult<Vec<ParsedBallot>> {
    let default_id = make_default_id(source);

    let reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(rdr);
    let mut records = reader.into_records();

    let header = match records.next() {
        Some(line_r) => line_r.context(CsvLineParseSnafu { lineno: 1usize })?,
        None => return MissingHeaderSnafu {}.fail(),
    };
    let candidates: Vec<String> = header
        .iter()
        .skip(skip_cols)
        .map(|s| s.trim().to_string())
        .collect();
    debug!("read_csv_ranking: candidates: {:?}", candidates);

    let mut res: Vec<ParsedBallot> = Vec::new();
    for (idx, line_r) in records.enumerate() {
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        let mut ranks: Vec<(String, u32)> = Vec::new();
        for (col, cell) in line.iter().skip(skip_cols).enumerate() {
            if let Ok(rank) = cell.trim().parse::<u32>() {
                if let Some(candidate) = candidates.get(col) {
                    if !candidate.is_empty() {
                        ranks.push((candidate.clone(), rank));
                    }
                }
            }
        }
        debug!("read_csv_ranking: lineno: {:?} ranks: {:?}", lineno, ranks);
        res.push(ParsedBallot {
            id: default_id(lineno),
            ranks,
        });
    }
    Ok(res)
}

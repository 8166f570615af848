use log::{debug, info, warn};

use instant_runoff::builder::Builder;
use instant_runoff::{ElectionError, ElectionResult};
use snafu::{prelude::*, Snafu};

use std::fs;
use std::io;

use serde::{Deserialize, Serialize};
use text_diff::print_diff;

use crate::args::Args;

pub mod io_common;
pub mod io_csv;
pub mod io_excel;

/// Columns before this one (1-based) hold voter metadata in the expected
/// spreadsheet exports.
pub const DEFAULT_FIRST_VOTE_COLUMN: usize = 18;

#[derive(Debug, Snafu)]
pub enum CliError {
    #[snafu(display("Error opening input file {path}"))]
    OpeningInput { source: io::Error, path: String },
    #[snafu(display("Error reading CSV line {lineno}"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Error opening Excel file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("The Excel workbook has no readable worksheet"))]
    EmptyExcel {},
    #[snafu(display("Worksheet {name} not found in the workbook"))]
    MissingWorksheet { name: String },
    #[snafu(display("Line {lineno} holds a cell that is not a rank: {content}"))]
    ExcelWrongCellType { lineno: u64, content: String },
    #[snafu(display("The input holds no header row"))]
    MissingHeader {},
    #[snafu(display("Error opening JSON file"))]
    OpeningJson { source: io::Error },
    #[snafu(display("Error parsing JSON content"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error writing summary to {path}"))]
    WritingJson { source: io::Error, path: String },
    #[snafu(display("The election could not be resolved: {source}"))]
    Tabulation { source: ElectionError },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type CliResult<T> = Result<T, CliError>;

/// A voter row, as parsed by the readers: the candidate/rank pairs found in
/// the ranking columns, in column order. The id is only used in diagnostics.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ParsedBallot {
    pub id: String,
    pub ranks: Vec<(String, u32)>,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
enum InputType {
    Csv,
    Excel,
}

fn input_type(args: &Args) -> CliResult<InputType> {
    match args.input_type.as_deref() {
        Some("csv") => Ok(InputType::Csv),
        Some("excel") | Some("xlsx") => Ok(InputType::Excel),
        Some(x) => whatever!("Unknown input type {:?}", x),
        None => match args.input.as_deref() {
            Some(p) if p.to_lowercase().ends_with(".xlsx") => Ok(InputType::Excel),
            _ => Ok(InputType::Csv),
        },
    }
}

fn read_parsed_ballots(args: &Args, skip_cols: usize) -> CliResult<Vec<ParsedBallot>> {
    match (args.input.as_deref(), input_type(args)?) {
        (None, InputType::Csv) => {
            info!("Reading ballots from the standard input");
            io_csv::read_csv_ranking(io::stdin(), skip_cols, "stdin")
        }
        (Some(path), InputType::Csv) => {
            info!("Attempting to read rank file {:?}", path);
            let file = fs::File::open(path).context(OpeningInputSnafu { path })?;
            io_csv::read_csv_ranking(file, skip_cols, path)
        }
        (Some(path), InputType::Excel) => {
            info!("Attempting to read rank file {:?}", path);
            io_excel::read_excel_ranking(path, &args.excel_worksheet_name, skip_cols)
        }
        (None, InputType::Excel) => {
            whatever!("Excel input requires --input with a file path")
        }
    }
}

// Rows without a single valid rank are not ballots; malformed rows (a
// candidate ranked twice through duplicated header columns) are rejected
// before reaching the engine.
fn assemble_ballots(parsed: &[ParsedBallot]) -> Builder {
    let mut builder = Builder::new();
    for pb in parsed.iter() {
        let choices = io_common::order_by_rank(&pb.ranks);
        if choices.is_empty() {
            debug!("assemble_ballots: skipping row {} with no rankings", pb.id);
            continue;
        }
        if let Err(e) = builder.add_ballot(&choices) {
            warn!("assemble_ballots: rejecting malformed ballot {}: {}", pb.id, e);
        }
    }
    builder
}

// Presentation of the elimination history, kept on stdout so that it is
// visible without verbose logging.
fn report(result: &ElectionResult) {
    for round in result.rounds.iter() {
        println!("Round {}", round.round);
        for (name, votes) in round.tally.iter() {
            println!("    {:5} {}", votes, name);
        }
        if round.exhausted > 0 {
            println!("    {:5} (exhausted)", round.exhausted);
        }
        if let Some(name) = round.eliminated.as_deref() {
            println!("    eliminated: {}", name);
        }
    }
    println!("Winner: {}", result.winner);
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct SummaryRound {
    pub round: u32,
    pub tally: Vec<(String, u64)>,
    pub exhausted: u64,
    pub eliminated: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub winner: String,
    pub rounds: Vec<SummaryRound>,
}

impl Summary {
    fn from_result(result: &ElectionResult) -> Summary {
        Summary {
            winner: result.winner.clone(),
            rounds: result
                .rounds
                .iter()
                .map(|r| SummaryRound {
                    round: r.round,
                    tally: r.tally.clone(),
                    exhausted: r.exhausted,
                    eliminated: r.eliminated.clone(),
                })
                .collect(),
        }
    }
}

fn write_summary(summary: &Summary, out: &str) -> CliResult<()> {
    let pretty = serde_json::to_string_pretty(summary).context(ParsingJsonSnafu {})?;
    if out == "stdout" {
        println!("{}", pretty);
    } else {
        fs::write(out, pretty).context(WritingJsonSnafu { path: out })?;
    }
    Ok(())
}

// The reference summary, if provided for comparison.
fn check_reference(summary: &Summary, path: &str) -> CliResult<()> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu {})?;
    let reference: serde_json::Value =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    let pretty_reference =
        serde_json::to_string_pretty(&reference).context(ParsingJsonSnafu {})?;
    let pretty = serde_json::to_string_pretty(summary).context(ParsingJsonSnafu {})?;
    if pretty_reference != pretty {
        warn!("Found differences with the reference summary");
        print_diff(pretty_reference.as_str(), pretty.as_str(), "\n");
        whatever!("Difference detected between calculated summary and reference summary");
    }
    Ok(())
}

pub fn run_tabulation(args: &Args) -> CliResult<()> {
    let first_vote_column = args.first_vote_column.unwrap_or(DEFAULT_FIRST_VOTE_COLUMN);
    if first_vote_column == 0 {
        whatever!("--first-vote-column is 1-based and may not be 0");
    }
    let skip_cols = first_vote_column - 1;

    let parsed = read_parsed_ballots(args, skip_cols)?;
    debug!("run_tabulation: parsed {} rows", parsed.len());

    let builder = assemble_ballots(&parsed);
    info!(
        "Tabulating {} ballots out of {} rows",
        builder.ballots().len(),
        parsed.len()
    );

    let result = builder
        .into_election()
        .and_then(|e| e.resolve())
        .context(TabulationSnafu {})?;
    report(&result);

    let summary = Summary::from_result(&result);
    if let Some(out) = args.out.as_deref() {
        write_summary(&summary, out)?;
    }
    if let Some(reference) = args.reference.as_deref() {
        check_reference(&summary, reference)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRID: &str = "\
id,time,Alice,Bob,Charlie
1,9:00,1,2,
2,9:05,1,,2
3,9:10,,1,2
4,9:15,2,,1
";

    #[test]
    fn csv_grid_end_to_end() {
        let parsed = io_csv::read_csv_ranking(GRID.as_bytes(), 2, "test.csv").unwrap();
        assert_eq!(parsed.len(), 4);
        assert_eq!(
            parsed[0].ranks,
            vec![("Alice".to_string(), 1), ("Bob".to_string(), 2)]
        );

        let builder = assemble_ballots(&parsed);
        assert_eq!(builder.ballots().len(), 4);

        let result = builder.into_election().unwrap().resolve().unwrap();
        assert_eq!(result.winner, "Alice");
        assert_eq!(result.rounds.len(), 2);
        assert_eq!(result.rounds[0].eliminated.as_deref(), Some("Charlie"));
        assert_eq!(
            result.standings(),
            &[("Alice".to_string(), 3), ("Bob".to_string(), 1)]
        );
    }

    #[test]
    fn rows_without_rankings_are_dropped() {
        let data = "\
id,time,Alice,Bob
1,9:00,1,2
2,9:05,n/a,abstain
3,9:10,,
";
        let parsed = io_csv::read_csv_ranking(data.as_bytes(), 2, "test.csv").unwrap();
        assert_eq!(parsed.len(), 3);
        let builder = assemble_ballots(&parsed);
        assert_eq!(builder.ballots().len(), 1);
    }

    #[test]
    fn duplicate_candidate_columns_reject_the_ballot() {
        let data = "\
id,Alice,Alice
1,1,2
2,1,
";
        let parsed = io_csv::read_csv_ranking(data.as_bytes(), 1, "test.csv").unwrap();
        let builder = assemble_ballots(&parsed);
        // The first row ranks Alice twice and is rejected; the second one
        // only touches a single Alice column.
        assert_eq!(builder.ballots().len(), 1);
    }

    #[test]
    fn summary_shape() {
        let parsed = io_csv::read_csv_ranking(GRID.as_bytes(), 2, "test.csv").unwrap();
        let result = assemble_ballots(&parsed)
            .into_election()
            .unwrap()
            .resolve()
            .unwrap();
        let summary = Summary::from_result(&result);
        let js = serde_json::to_value(&summary).unwrap();
        assert_eq!(js["winner"], "Alice");
        assert_eq!(js["rounds"][0]["round"], 1);
        assert_eq!(js["rounds"][0]["tally"][0][0], "Alice");
        assert_eq!(js["rounds"][0]["tally"][0][1], 2);
        assert_eq!(js["rounds"][0]["eliminated"], "Charlie");
        assert_eq!(js["rounds"][1]["eliminated"], serde_json::Value::Null);
    }

    #[test]
    fn reference_comparison_accepts_identical_summaries() {
        let parsed = io_csv::read_csv_ranking(GRID.as_bytes(), 2, "test.csv").unwrap();
        let result = assemble_ballots(&parsed)
            .into_election()
            .unwrap()
            .resolve()
            .unwrap();
        let summary = Summary::from_result(&result);

        let path = std::env::temp_dir().join("rctab_reference_identical.json");
        fs::write(&path, serde_json::to_string_pretty(&summary).unwrap()).unwrap();
        check_reference(&summary, path.to_str().unwrap()).unwrap();
    }

    #[test]
    fn reference_comparison_rejects_differences() {
        let parsed = io_csv::read_csv_ranking(GRID.as_bytes(), 2, "test.csv").unwrap();
        let result = assemble_ballots(&parsed)
            .into_election()
            .unwrap()
            .resolve()
            .unwrap();
        let summary = Summary::from_result(&result);
        let mut other = summary.clone();
        other.winner = "Bob".to_string();

        let path = std::env::temp_dir().join("rctab_reference_differs.json");
        fs::write(&path, serde_json::to_string_pretty(&other).unwrap()).unwrap();
        assert!(check_reference(&summary, path.to_str().unwrap()).is_err());
    }

    #[test]
    fn empty_grid_is_an_empty_election() {
        let data = "id,time,Alice,Bob\n";
        let parsed = io_csv::read_csv_ranking(data.as_bytes(), 2, "test.csv").unwrap();
        assert!(parsed.is_empty());
        assert_eq!(
            assemble_ballots(&parsed).into_election().unwrap_err(),
            ElectionError::EmptyElection
        );
    }
}

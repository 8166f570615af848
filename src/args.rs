use clap::Parser;

/// This is a ranked voting tabulation program for spreadsheet ballot exports.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path or empty) The tabular file holding one row of candidate rankings per
    /// voter. If not specified, a CSV document is read from the standard input.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (default csv) The type of the input: 'csv' or 'excel'. If not specified, it is
    /// guessed from the file extension.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (1-based, default 18) The first column holding candidate rankings. All the columns
    /// before it carry voter metadata and are ignored.
    #[clap(long, value_parser)]
    pub first_vote_column: Option<usize>,

    /// (default the only worksheet) When using an Excel file, indicates the name of the
    /// worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the election will be
    /// written in JSON format to the given location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing the expected summary of the election in
    /// JSON format. If provided, rctab will check that the tabulated output matches the
    /// reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}

use clap::Parser;

/// This program ranks the contestants of a contest and joins them with the roster
/// of registered contestants.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The file containing the report configuration in JSON.
    /// For more information about the file format, read the documentation of the
    /// contest_ranking::manual module.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,
    /// (file path) A reference report in CSV format. If provided, cfstandings will
    /// check that the produced report matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the report will be written in CSV format to the given
    /// location. Setting this option overrides the output settings of the --config option. An empty
    /// value keeps the location given by the configuration.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path or empty) The saved answer of the contest.standings API method.
    /// Setting this option overrides the standings file of the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (file path or empty) The roster of the registered contestants, in .xlsx or .csv format.
    /// Setting this option overrides the roster sources of the --config option.
    #[clap(long, value_parser)]
    pub roster: Option<String>,

    /// (login, can be repeated) A login to leave out of the report, in addition to the
    /// excluded logins of the configuration.
    #[clap(long, value_parser)]
    pub exclude: Vec<String>,

    /// (default results) The name of the report file, without the extension.
    #[clap(long, value_parser)]
    pub table_name: Option<String>,

    /// (default: first worksheet) When using an Excel roster, indicates the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard error.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}

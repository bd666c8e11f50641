use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about = "Price prediction and trading strategy console", long_about = None)]
pub struct Cli {
    /// Date to predict from, as YYYY-MM-DD. Defaults to today.
    #[arg(short, long)]
    pub date: Option<String>,

    /// Base URL of the prediction service. Overrides PREDICTION_API_URL.
    #[arg(short, long)]
    pub endpoint: Option<String>,

    /// Request timeout in seconds. Overrides PREDICTION_TIMEOUT_SECS.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: Option<u64>,

    /// Request a single prediction, print it and exit.
    #[arg(long)]
    pub once: bool,

    /// With --once, print the final snapshot as JSON instead of tables.
    #[arg(long, requires = "once")]
    pub json: bool,
}

/// One line typed into the interactive console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Re-request the current date.
    Predict,
    /// Select this date, then request it.
    PredictDate(String),
    Reset,
    Cancel,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            "" | "predict" => Self::Predict,
            "reset" => Self::Reset,
            "cancel" => Self::Cancel,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            date => Self::PredictDate(date.to_string()),
        }
    }
}

pub const HELP: &str = "\
Type a date (YYYY-MM-DD) to predict from it, or:
  <enter>  predict again for the current date
  reset    clear the result
  cancel   drop the request in flight
  quit     leave the console";

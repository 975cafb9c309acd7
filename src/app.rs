//! Command line parsing, init file defaults and dispatch to the commands
use std::collections::HashMap;
use std::env;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use structopt::clap::ErrorKind;
use structopt::StructOpt;
use tracing::debug;

use crate::commands::{add, delete, list, summary};
use crate::models::DATE_FORMAT;
use crate::store::{Store, DEFAULT_DATA_FILE};
use crate::Error;

const HELP_MESSAGE: &str = "
Welcome to the Expense Tracker CLI!

Usage:
  expenses <command> [options]

Commands:
  add --desc (description) --amt (amount)  Add a new expense (description and amount required)
  delete --id (expense_id)                  Delete an expense by its unique ID
  list                                      List all recorded expenses
  summary [--month <month_number>]          Summary of total or monthly expenses

Options:
  -f, --file <FILE>       Data file, data.json by default
  --init-file <FILE>      Read default options from FILE
  --args-only             Ignore init files
  --now <DD-MM-YYYY>      Date to use as today
";

#[derive(Debug, StructOpt)]
enum Command {
    /// Add a new expense
    Add {
        #[structopt(flatten)]
        options: CommonOpts,
        /// What the money was spent on
        #[structopt(long = "description", alias = "desc")]
        description: Option<String>,
        /// Amount spent, in whole currency units
        #[structopt(long = "amount", alias = "amt", allow_hyphen_values = true)]
        amount: Option<i64>,
    },
    /// Delete an expense by its id
    Delete {
        #[structopt(flatten)]
        options: CommonOpts,
        #[structopt(long = "id", allow_hyphen_values = true)]
        id: Option<i64>,
    },
    /// List all recorded expenses
    List(CommonOpts),
    /// Total of all expenses, or of one month
    Summary {
        #[structopt(flatten)]
        options: CommonOpts,
        /// Month number, from 1 to 12
        #[structopt(long = "month", parse(try_from_str = month_parser))]
        month: Option<u32>,
    },
}

#[derive(Debug, StructOpt)]
#[structopt(about = "Command line expense tracker",
version = env ! ("CARGO_PKG_VERSION"),
name = "expenses"
)]
struct Opt {
    #[structopt(subcommand)]
    cmd: Command,
}

/// Command line options
#[derive(Debug, StructOpt, Clone)]
pub struct CommonOpts {
    /// Data file
    #[structopt(name = "FILE", short = "f", long = "file", parse(from_os_str), default_value = DEFAULT_DATA_FILE)]
    pub input_file: PathBuf,

    /// Ignore init file if it exists
    #[structopt(long = "args-only")]
    args_only: bool,

    /// Init file
    #[structopt(long = "init-file", parse(from_os_str))]
    init_file: Option<PathBuf>,

    /// Date to use as today, DD-MM-YYYY
    #[structopt(long = "now", parse(try_from_str = date_parser))]
    _now: Option<NaiveDate>,

    #[structopt(long = "force-color")]
    pub force_color: bool,
}

impl CommonOpts {
    pub fn now(&self) -> NaiveDate {
        match self._now {
            Some(x) => x,
            None => Local::now().date_naive(),
        }
    }

    /// The data file, with a leading ```~``` expanded
    ///
    /// Paths that are not valid UTF-8 are used as given.
    pub fn data_file(&self) -> PathBuf {
        match self.input_file.to_str() {
            Some(path) => PathBuf::from(shellexpand::tilde(path).into_owned()),
            None => self.input_file.clone(),
        }
    }

    fn open_store(&self) -> Result<Store, Error> {
        if self.force_color {
            env::set_var("CLICOLOR_FORCE", "1");
        }
        debug!(
            init_file = ?self.init_file,
            args_only = self.args_only,
            "Opening {:?}",
            self.data_file()
        );
        Store::load(self.data_file())
    }
}

const HELP_COMMANDS: [&str; 3] = ["help", "--help", "-h"];
const INIT_FILE_FLAG: &str = "--init-file";
const NO_INIT_FILE_FLAG: &str = "--args-only";
const INIT_PATH_UNDER_HOME: &str = "~/.expensesrc";
const INIT_PATH: &str = ".expensesrc";

/// Options every command accepts
const COMMON_OPTIONS: [&str; 5] = [
    "--file",
    "--init-file",
    "--args-only",
    "--now",
    "--force-color",
];

/// Whether ```command``` accepts the long ```option```
fn accepts_option(command: &str, option: &str) -> bool {
    let own: &[&str] = match command {
        "add" => &["--description", "--amount"],
        "delete" => &["--id"],
        "summary" => &["--month"],
        _ => &[],
    };
    COMMON_OPTIONS.contains(&option) || own.contains(&option)
}

fn init_paths(args: &[String]) -> Vec<String> {
    let mut possible_paths: Vec<String> = Vec::new();
    let mut ignore_init = false;
    for i in 0..args.len() {
        if args[i] == NO_INIT_FILE_FLAG {
            ignore_init = true;
            break;
        } else if args[i] == INIT_FILE_FLAG {
            if let Some(path) = args.get(i + 1) {
                possible_paths.push(shellexpand::tilde(path).to_string());
            }
        }
    }

    if !ignore_init {
        possible_paths.push(shellexpand::tilde(INIT_PATH_UNDER_HOME).to_string());
        possible_paths.push(INIT_PATH.to_string());

        possible_paths
    } else {
        vec![]
    }
}

/// Adds the options in the init ```file``` that are not already in ```args```
///
/// Options the selected command does not accept are skipped.
fn merge_init_file(file: &Path, args: &mut Vec<String>) -> Result<(), Error> {
    let command = args.get(1).cloned().unwrap_or_default();
    let mut aliases = HashMap::new();
    aliases.insert("-f", "--file");
    aliases.insert("--desc", "--description");
    aliases.insert("--amt", "--amount");

    let contents = read_to_string(file).map_err(|e| Error::io(file, e))?;
    for line in contents.lines() {
        let option = line.trim();
        match option.chars().next() {
            Some(c) => match c {
                '-' if option.starts_with("--") => {
                    let mut iter = option.split_whitespace();
                    let name = match iter.next() {
                        Some(name) => name,
                        None => continue,
                    };
                    let canonical = |x: &str| -> String {
                        let x = x.split('=').next().unwrap_or(x);
                        aliases.get(x).unwrap_or(&x).to_string()
                    };
                    let option_name = canonical(name);
                    if !accepts_option(&command, &option_name) {
                        debug!("{} does not take {}, ignoring it", command, option_name);
                        continue;
                    }
                    let given = args.iter().any(|x| canonical(x.as_str()) == option_name);
                    if !given {
                        args.push(name.to_string());
                        let rest = iter.collect::<Vec<&str>>().join(" ");
                        if !rest.is_empty() {
                            args.push(rest);
                        }
                    }
                }
                ';' | '#' | '!' | '%' => (), // a comment
                _ => {
                    return Err(Error::Config {
                        path: file.to_path_buf(),
                        line: line.to_string(),
                    })
                }
            },
            None => (),
        }
    }
    Ok(())
}

/// Entry point for the command line app
///
/// Load the options from the init file, add them to the supplied command line options
/// and call the command accordingly.
pub fn run_app(mut args: Vec<String>) -> Result<(), Error> {
    match args.get(1) {
        None => return Err(Error::InvalidArgument),
        Some(first) if HELP_COMMANDS.contains(&first.as_str()) => {
            print!("{}", HELP_MESSAGE);
            return Ok(());
        }
        Some(_) => (),
    }

    // Look for any file with configuration options
    let config_file = init_paths(&args)
        .into_iter()
        .map(PathBuf::from)
        .find(|path| path.exists());
    if let Some(file) = config_file {
        debug!("Reading options from {:?}", file);
        merge_init_file(&file, &mut args)?;
    }

    // Build options from the argument vector
    let opt = match Opt::from_iter_safe(args.iter()) {
        Ok(opt) => opt,
        Err(e) => {
            return match e.kind {
                ErrorKind::HelpDisplayed | ErrorKind::VersionDisplayed => {
                    if !e.message.is_empty() {
                        println!("{}", e.message);
                    }
                    Ok(())
                }
                ErrorKind::UnrecognizedSubcommand
                | ErrorKind::UnknownArgument
                | ErrorKind::InvalidSubcommand
                | ErrorKind::MissingSubcommand
                | ErrorKind::MissingArgumentOrSubcommand => Err(Error::InvalidArgument),
                _ => Err(Error::Usage(e.message)),
            }
        }
    };

    match opt.cmd {
        Command::Add {
            options,
            description,
            amount,
        } => {
            let mut store = options.open_store()?;
            add::execute(&mut store, &options, description, amount)
        }
        Command::Delete { options, id } => {
            let mut store = options.open_store()?;
            delete::execute(&mut store, id)
        }
        Command::List(options) => list::execute(&options.open_store()?),
        Command::Summary { options, month } => summary::execute(&options.open_store()?, month),
    }
}

/// A parser for the ```--now``` option
pub fn date_parser(date: &str) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map_err(|_| Error::Usage(format!("Invalid date {}, expected DD-MM-YYYY", date)))
}

/// A parser for the ```--month``` option
pub fn month_parser(month: &str) -> Result<u32, Error> {
    match month.parse::<u32>() {
        Ok(x) if (1..=12).contains(&x) => Ok(x),
        _ => Err(Error::Usage(format!(
            "Invalid month {}, it should be a number between 1 and 12",
            month
        ))),
    }
}

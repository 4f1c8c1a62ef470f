use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use datebook::{prelude::*, store};
use std::{
    fs::File,
    io::{self, BufReader, BufWriter},
    path::{Path, PathBuf},
    process::ExitCode,
};
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;

/// Environment variable holding `EnvFilter` directives. Overrides `-v` when set.
const LOG_ENV_VAR: &str = "DATEBOOK_LOG";

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("{0}")]
    Date(#[from] DateError),

    #[error("{0}")]
    Collection(#[from] CollectionError),

    #[error("{}: {source}", .path.display())]
    Store { path: PathBuf, source: StoreError },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum, Debug)]
enum FormatArg {
    #[value(name = "yyyymmdd")]
    YyyyMmDd,
    #[value(name = "ymmdd")]
    YMmDd,
    #[value(name = "month-d-y")]
    MonthDayYear,
    #[value(name = "d-month-y")]
    DayMonthYear,
    #[value(name = "m-d-y")]
    SlashedMonthFirst,
    #[value(name = "d-mon-y")]
    DayMonYear,
    #[value(name = "y-m-d")]
    DashedYearFirst,
}

impl FormatArg {
    fn to_date_format(self) -> DateFormat {
        match self {
            FormatArg::YyyyMmDd => DateFormat::YyyyMmDd,
            FormatArg::YMmDd => DateFormat::YMmDd,
            FormatArg::MonthDayYear => DateFormat::MonthDayYear,
            FormatArg::DayMonthYear => DateFormat::DayMonthYear,
            FormatArg::SlashedMonthFirst => DateFormat::SlashedMonthFirst,
            FormatArg::DayMonYear => DateFormat::DayMonYear,
            FormatArg::DashedYearFirst => DateFormat::DashedYearFirst,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum, Debug)]
enum OrderArg {
    Insertion,
    Date,
    Principal,
    Description,
}

impl OrderArg {
    fn to_iteration_mode(self) -> IterationMode {
        match self {
            OrderArg::Insertion => IterationMode::Insertion,
            OrderArg::Date => IterationMode::Date,
            OrderArg::Principal => IterationMode::Principal,
            OrderArg::Description => IterationMode::Description,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log more. Repeat for even more (-v info, -vv debug, -vvv trace). Ignored when
    /// DATEBOOK_LOG is set.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Reads a date written in any supported format and prints it.
    ///
    /// Without `--as`, the date is printed once in every format, labelled.
    Date {
        /// The date text, e.g. "December 25, 1978" or "25-Dec-1978"
        text: String,

        /// Print the date in this format only
        #[arg(long = "as", value_enum, value_name = "FORMAT")]
        format: Option<FormatArg>,

        /// Use 0001-01-01 for unrecognized text instead of failing
        #[arg(long)]
        lenient: bool,
    },

    /// Prints the number of days from EARLIER to LATER (negative if LATER is the earlier one).
    Diff {
        /// The date to count to
        later: String,

        /// The date to count from
        earlier: String,
    },

    /// Prints the events in an event file, one per line.
    List {
        /// The event file to read
        file: PathBuf,

        /// The order to print the events in
        #[arg(short, long, value_enum, default_value_t = OrderArg::Insertion)]
        order: OrderArg,

        /// The most events the file may hold
        #[arg(long, default_value_t = EventCollection::DEFAULT_CAPACITY)]
        capacity: usize,
    },

    /// Appends an event to an event file, creating the file if needed.
    Add {
        /// The event file to update
        file: PathBuf,

        /// When the event happened, in any supported format
        #[arg(long)]
        date: String,

        /// Who or what the event involved
        #[arg(long)]
        principal: String,

        /// What happened
        #[arg(long)]
        description: String,

        /// The most events the file may hold
        #[arg(long, default_value_t = EventCollection::DEFAULT_CAPACITY)]
        capacity: usize,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match do_work(cli.command) {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = match std::env::var(LOG_ENV_VAR) {
        Ok(directives) => EnvFilter::new(directives),
        Err(_) => EnvFilter::default().add_directive(level.into()),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn do_work(command: Commands) -> Result<Vec<String>, CliError> {
    match command {
        Commands::Date {
            text,
            format,
            lenient,
        } => {
            let text = text.trim();
            let date = if lenient {
                CalendarDate::parse_or_default(text)
            } else {
                let (date, recognized) = CalendarDate::parse_with_format(text)?;
                info!(format = %recognized, "recognized date");
                date
            };
            Ok(match format {
                Some(format) => vec![date.format(format.to_date_format())],
                None => DateFormat::ALL
                    .iter()
                    .map(|&format| format!("{:<9} {}", format.name(), date.format(format)))
                    .collect(),
            })
        }
        Commands::Diff { later, earlier } => {
            let later = CalendarDate::parse(later.trim())?;
            let earlier = CalendarDate::parse(earlier.trim())?;
            Ok(vec![later.days_since(&earlier).to_string()])
        }
        Commands::List {
            file,
            order,
            capacity,
        } => {
            let collection = load_file(&file, capacity, false)?;
            Ok(collection
                .ordered(order.to_iteration_mode())
                .map(ToString::to_string)
                .collect())
        }
        Commands::Add {
            file,
            date,
            principal,
            description,
            capacity,
        } => {
            let mut collection = load_file(&file, capacity, true)?;
            let event = Event::from_parts(&date, principal, description)?;
            let line = event.to_string();
            collection.insert(event)?;
            save_file(&file, &collection)?;
            info!(path = %file.display(), events = collection.len(), "saved event file");
            Ok(vec![line])
        }
    }
}

/// Reads an event file into a new collection. A missing file reads as empty when `allow_missing`.
fn load_file(path: &Path, capacity: usize, allow_missing: bool) -> Result<EventCollection, CliError> {
    let store_error = |source: StoreError| CliError::Store {
        path: path.to_owned(),
        source,
    };
    let mut collection = EventCollection::with_capacity(capacity);
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if allow_missing && e.kind() == io::ErrorKind::NotFound => {
            info!(path = %path.display(), "event file does not exist yet");
            return Ok(collection);
        }
        Err(e) => return Err(store_error(e.into())),
    };
    let loaded = store::load(BufReader::new(file), &mut collection).map_err(store_error)?;
    info!(path = %path.display(), events = loaded, "loaded event file");
    Ok(collection)
}

fn save_file(path: &Path, collection: &EventCollection) -> Result<(), CliError> {
    let store_error = |source: StoreError| CliError::Store {
        path: path.to_owned(),
        source,
    };
    let file = File::create(path).map_err(|e| store_error(e.into()))?;
    store::save(collection, IterationMode::Insertion, BufWriter::new(file)).map_err(store_error)?;
    Ok(())
}

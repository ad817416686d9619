use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use dataview::infra::import::{open_file_source, FileFormat};
use dataview::ui::table::render_page;
use dataview::{BrowseService, DataView, Row, ViewOptions, ViewOverrides};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "dataview",
    version,
    about = "Search, sort and page through a CSV or JSON record file",
    long_about = "Loads a CSV or JSON file (an array of objects) and prints one page of it.\n\nExamples:\n  dataview people.csv --search tok\n  dataview mockdata.json --sort-by item --desc -n 10 -p 2\n  dataview mockdata.json --config view.json"
)]
struct CliArgs {
    #[arg(value_name = "FILE", help = "Record file to load.")]
    file: PathBuf,

    #[arg(
        long,
        value_name = "FORMAT",
        help_heading = "Input",
        help = "Input format (csv or json). Detected from the extension by default."
    )]
    format: Option<FileFormat>,

    #[arg(
        long,
        value_name = "FILE",
        help_heading = "Input",
        help = "JSON file with view options (sort_by, desc, results_per_page, search_fields)."
    )]
    config: Option<PathBuf>,

    #[arg(
        short = 's',
        long,
        value_name = "TEXT",
        help_heading = "View",
        help = "Case-insensitive substring matched against field values."
    )]
    search: Option<String>,

    #[arg(
        long = "search-field",
        value_name = "NAME",
        action = ArgAction::Append,
        help_heading = "View",
        help = "Only search this field (repeatable)."
    )]
    search_fields: Vec<String>,

    #[arg(long, value_name = "KEY", help_heading = "View", help = "Field to sort by.")]
    sort_by: Option<String>,

    #[arg(long, help_heading = "View", help = "Sort descending.")]
    desc: bool,

    #[arg(
        short = 'n',
        long,
        value_name = "N",
        allow_negative_numbers = true,
        help_heading = "View",
        help = "Results per page (values below one become one)."
    )]
    page_size: Option<i64>,

    #[arg(
        short = 'p',
        long,
        value_name = "N",
        default_value_t = 1,
        allow_negative_numbers = true,
        help_heading = "View",
        help = "Page to show."
    )]
    page: i64,

    #[arg(
        short = 'v',
        long,
        action = ArgAction::Count,
        help_heading = "Output",
        help = "Increase log verbosity (-v, -vv, -vvv)."
    )]
    verbose: u8,
}

impl CliArgs {
    fn overrides(&self) -> ViewOverrides {
        ViewOverrides {
            sort_by: self.sort_by.clone(),
            desc: self.desc.then_some(true),
            results_per_page: self.page_size,
            search_fields: (!self.search_fields.is_empty()).then(|| self.search_fields.clone()),
        }
    }
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
        Ok(()) => ExitCode::SUCCESS,
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &CliArgs) -> Result<()> {
    let view = build_view(args)?;
    print!("{}", render_page(&view));
    Ok(())
}

/// Flags win over the config file, which wins over the defaults.
fn resolve_options(args: &CliArgs) -> Result<ViewOptions> {
    let file_overrides = match &args.config {
        Some(path) => ViewOverrides::from_json_file(path)?,
        None => ViewOverrides::default(),
    };
    let options = ViewOptions::merged(args.overrides().or(file_overrides));
    debug!(?options, "resolved view options");
    Ok(options)
}

fn build_view(args: &CliArgs) -> Result<DataView<Row>> {
    let options = resolve_options(args)?;

    let format = match args.format {
        Some(format) => format,
        None => FileFormat::detect(&args.file)?,
    };
    let service = BrowseService::new(open_file_source(&args.file, format));
    let mut view = service
        .open(options)
        .with_context(|| format!("failed to load {}", args.file.display()))?;

    if let Some(search) = &args.search {
        view.set_search_value(search.as_str());
    }
    view.set_current_page_number(args.page);
    if i64::try_from(view.current_page_number()).ok() != Some(args.page) {
        warn!(
            requested = args.page,
            shown = view.current_page_number(),
            ceiling = view.page_ceiling(),
            "requested page is out of range"
        );
    }
    Ok(view)
}

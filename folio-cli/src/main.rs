// Command-line interface for folio
//
// This binary drives the folio-babel block pipeline: converting between markdown, editor markup
// and rendered pages, validating widget blocks, and measuring compile latency.
//
// Converting:
//
// The conversion needs a to and from pair. The from is auto-detected from the file extension,
// while being overridable by an explicit --from flag.
// Usage:
//  folio <input> --to <format> [--from <format>] [--output <file>]          - Convert (default)
//  folio convert <input> --to <format> [--from <format>] [--output <file>]  - Same as above
//  folio validate <input> [--json]        - Validate every widget block, exit 1 if any is invalid
//  folio blocks                           - List recognized block types
//  folio bench <input> [--iterations N]   - Round-trip through the compile worker, print latency
//  folio generate-css                     - Print the baseline stylesheet
//  folio --list-formats                   - List conversion formats
//
// Extra Parameters:
//
// Format-specific parameters can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix and passes the parameters to the format.
// Example:
//  folio post.md --to page --extra-title "Release notes" --extra-chart-height 400
//
// Logging goes to stderr. RUST_LOG takes precedence over the configured level.

use clap::{Arg, ArgAction, Command, ValueHint};
use folio_babel::blocks::schema::schema_for;
use folio_babel::formats::blocks_json::inspect;
use folio_babel::{
    CompileWorker, Direction, Document, FormatRegistry, LatencySnapshot, BLOCK_TYPES,
};
use folio_config::{FolioConfig, Loader, LOCAL_CONFIG_FILE};
use std::collections::HashMap;
use std::fs;
use tracing_subscriber::EnvFilter;

const SUBCOMMANDS: &[&str] = &["convert", "validate", "blocks", "bench", "generate-css", "help"];

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = if let Some(key) = arg.strip_prefix("--extra-") {
            Some(key)
        } else {
            arg.strip_prefix("--extras-")
        };

        if let Some(key) = key_opt {
            // A following token that is not a flag is the value
            let has_value = i + 1 < args.len() && !args[i + 1].starts_with('-');

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn build_cli() -> Command {
    Command::new("folio")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for converting and checking folio markdown with widget blocks")
        .long_about(
            "folio works with markdown posts that embed widget blocks: fenced code blocks\n\
            tagged card, alert, badge, barchart, linechart, areachart, piechart,\n\
            radarchart, scatterchart or tablejson with a JSON body.\n\n\
            Commands:\n  \
            - convert:      Transform between markdown, editor HTML and rendered pages\n  \
            - validate:     Check every widget block against its schema\n  \
            - blocks:       List recognized block types\n  \
            - bench:        Measure compile latency through the background worker\n  \
            - generate-css: Print the baseline stylesheet\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass format-specific options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            folio post.md --to html                       # Editor markup with placeholders\n  \
            folio edited.html --to markdown               # Back to markdown\n  \
            folio post.md --to page -o post.html          # Published page\n  \
            folio validate post.md                        # Schema check",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available conversion formats")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a folio.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between document formats (default command)")
                .long_about(
                    "Convert documents between different formats.\n\n\
                    Supported formats:\n  \
                    - markdown:    Markdown with widget fences (.md)\n  \
                    - html:        Editor markup with block placeholders (.html)\n  \
                    - page:        Self-contained rendered page (export only)\n  \
                    - blocks-json: Annotated and validated blocks as JSON (export only)\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\n\
                    Page options (--extra-*): title, chart-height, table-page-size, css, css-path",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("validate")
                .about("Validate every widget block in a markdown file")
                .long_about(
                    "Annotate a markdown file and check each recognized widget block against\n\
                    its schema. Exits with status 1 when any block is invalid.\n\n\
                    Examples:\n  \
                    folio validate post.md          # One line per block\n  \
                    folio validate post.md --json   # Machine-readable report",
                )
                .arg(
                    Arg::new("input")
                        .help("Markdown file to check")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the report as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("blocks").about("List recognized widget block types and their required fields"))
        .subcommand(
            Command::new("bench")
                .about("Round-trip a file through the background compile worker")
                .long_about(
                    "Compiles the input markdown to editor HTML and back, repeatedly, on the\n\
                    background worker, then prints the latency snapshot (p50, p95, average\n\
                    over the configured window) as JSON.",
                )
                .arg(
                    Arg::new("input")
                        .help("Markdown file to compile")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("iterations")
                        .long("iterations")
                        .short('n')
                        .help("Number of round trips")
                        .default_value("20")
                        .value_parser(clap::value_parser!(u64).range(1..)),
                ),
        )
        .subcommand(
            Command::new("generate-css")
                .about("Output the baseline CSS used for rendered pages")
                .long_about(
                    "Outputs the baseline stylesheet embedded in rendered pages.\n\n\
                    Use this as a starting point for custom styling and pass the result back\n\
                    with --extra-css-path or the render.custom_css config key.",
                ),
        )
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Parse extra-* arguments before clap processing
    let (cleaned_args, extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            // A bare path as first argument means an implicit convert
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && !SUBCOMMANDS.contains(&cleaned_args[1].as_str())
            {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    let config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    init_logging(&config);

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let to = sub_matches.get_one::<String>("to").expect("to is required");

            let from = match sub_matches.get_one::<String>("from") {
                Some(f) => f.to_string(),
                None => {
                    let registry = FormatRegistry::default();
                    match registry.detect_format_from_filename(input) {
                        Some(detected) => detected,
                        None => {
                            eprintln!("Error: Could not detect format from filename '{input}'");
                            eprintln!("Please specify --from explicitly");
                            std::process::exit(1);
                        }
                    }
                }
            };

            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, &from, to, output, &extra_params, &config);
        }
        Some(("validate", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            handle_validate_command(input, sub_matches.get_flag("json"));
        }
        Some(("blocks", _)) => handle_blocks_command(),
        Some(("bench", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let iterations = *sub_matches
                .get_one::<u64>("iterations")
                .expect("iterations has a default");
            handle_bench_command(input, iterations, &config);
        }
        Some(("generate-css", _)) => handle_generate_css_command(),
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Install the stderr subscriber. `RUST_LOG` wins over `logging.level`.
fn init_logging(config: &FolioConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn read_input(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    })
}

/// Handle the convert command
fn handle_convert_command(
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    extra_params: &HashMap<String, String>,
    config: &FolioConfig,
) {
    let registry = FormatRegistry::default();

    // Validate formats exist
    if let Err(e) = registry.get(from) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    if let Err(e) = registry.get(to) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let source = read_input(input);

    let doc = registry.parse(&source, from).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
    tracing::debug!(from, to, bytes = doc.markdown().len(), "parsed input");

    // Config supplies page defaults; --extra-* parameters win.
    let mut format_options = if to == "page" {
        page_params_from_config(config)
    } else {
        HashMap::new()
    };
    for (key, value) in extra_params {
        format_options.insert(key.clone(), value.clone());
    }

    let result = registry
        .serialize_with_options(&doc, to, &format_options)
        .unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            std::process::exit(1);
        });

    match output {
        Some(path) => {
            fs::write(path, result).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => print!("{result}"),
    }
}

fn page_params_from_config(config: &FolioConfig) -> HashMap<String, String> {
    let render = &config.render;
    let mut params = HashMap::new();
    params.insert("title".to_string(), render.title.clone());
    params.insert("chart-height".to_string(), render.chart_height.to_string());
    params.insert(
        "table-page-size".to_string(),
        render.table_page_size.to_string(),
    );
    if let Some(css) = &render.custom_css {
        params.insert("css".to_string(), css.clone());
    }
    params
}

/// Handle the validate command
fn handle_validate_command(input: &str, json: bool) {
    let source = read_input(input);
    let reports = inspect(&Document::from_markdown(source));
    let invalid = reports
        .iter()
        .filter(|report| !report.validation.valid)
        .count();

    if json {
        let text = serde_json::to_string_pretty(&reports).unwrap_or_else(|e| {
            eprintln!("Serialization error: {e}");
            std::process::exit(1);
        });
        println!("{text}");
    } else {
        for report in &reports {
            let block = &report.annotation;
            if report.validation.valid {
                println!("{input}:{}: {} ok", block.line, block.block_type);
            }
            for error in report.validation.errors() {
                println!("{input}:{}: {} {error}", block.line, block.block_type);
            }
        }
        println!("{} blocks, {invalid} invalid", reports.len());
    }

    if invalid > 0 {
        std::process::exit(1);
    }
}

/// Handle the blocks command
fn handle_blocks_command() {
    for block_type in BLOCK_TYPES {
        let required = schema_for(*block_type).required_fields().join(", ");
        println!(
            "{:<14}{:<15}requires: {required}",
            block_type.as_str(),
            block_type.display_name()
        );
    }
}

/// Handle the bench command
fn handle_bench_command(input: &str, iterations: u64, config: &FolioConfig) {
    let source = read_input(input);
    let worker = CompileWorker::spawn(config.worker.latency_window).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    let mut html_bytes = 0;
    for iteration in 0..iterations {
        let id = iteration * 2;
        let (html, _) = worker
            .compile(id, Direction::MdToHtml, source.as_str())
            .unwrap_or_else(worker_failed);
        html_bytes = html.len();
        worker
            .compile(id + 1, Direction::HtmlToMd, html)
            .unwrap_or_else(worker_failed);
    }

    let snapshot: LatencySnapshot = worker
        .metrics(iterations * 2)
        .unwrap_or_else(worker_failed);
    let report = serde_json::json!({
        "input": input,
        "iterations": iterations,
        "compiles": iterations * 2,
        "html_bytes": html_bytes,
        "latency": snapshot,
    });
    match serde_json::to_string_pretty(&report) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("Serialization error: {e}");
            std::process::exit(1);
        }
    }
}

fn worker_failed<T>(error: folio_babel::WorkerError) -> T {
    eprintln!("Error: {error}");
    std::process::exit(1);
}

/// Handle the generate-css command
fn handle_generate_css_command() {
    print!("{}", folio_babel::formats::get_default_css());
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    println!("Conversion formats:");
    let registry = FormatRegistry::default();
    for format in registry.formats() {
        let mut modes = Vec::new();
        if format.supports_parsing() {
            modes.push("parse");
        }
        if format.supports_serialization() {
            modes.push("serialize");
        }
        println!(
            "  {:<12} {} [{}]",
            format.name(),
            format.description(),
            modes.join(", ")
        );
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> FolioConfig {
    let loader = Loader::new().with_optional_file(LOCAL_CONFIG_FILE);
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

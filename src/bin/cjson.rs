use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;

use clap::{CommandFactory, Parser, ValueEnum};
use is_terminal::IsTerminal;

use compact_json::{EolStyle, Formatter, FormatterOptions};

/// Format JSON into compact, human-readable form.
///
/// cjson reads JSON from files or stdin and writes it back with smart
/// layout: short structures inline, similar siblings aligned as table
/// rows, and everything else expanded.
#[derive(Parser, Debug)]
#[command(name = "cjson")]
#[command(version, about, long_about = None)]
struct Args {
    /// Input file(s). Use "-" to read from stdin.
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Output file(s). When given, the count must match the inputs.
    /// Defaults to stdout.
    #[arg(short, long, value_name = "FILE")]
    output: Vec<PathBuf>,

    /// Use Windows-style CRLF line endings.
    #[arg(long)]
    crlf: bool,

    /// Limit inline elements to N columns, excluding indentation and
    /// leading property names.
    #[arg(long, value_name = "N", default_value = "50")]
    max_inline_length: usize,

    /// Maximum nesting to display on a single line: 0=primitives,
    /// 1=simple containers, 2=all (-1 to disable).
    #[arg(long, value_name = "N", default_value = "2", allow_hyphen_values = true)]
    max_inline_complexity: isize,

    /// Maximum nesting for the multiple-items-per-line layout
    /// (-1 to disable).
    #[arg(long, value_name = "N", default_value = "1", allow_hyphen_values = true)]
    max_compact_list_complexity: isize,

    /// Where to put spaces inside brackets: on simple containers, or on
    /// containers that hold other containers.
    #[arg(long, value_enum, default_value = "nested")]
    bracket_padding: BracketPaddingArg,

    /// Indent N spaces per level.
    #[arg(long, value_name = "N", default_value = "4")]
    indent: usize,

    /// Use one tab per level instead of spaces.
    #[arg(long)]
    tab_indent: bool,

    /// Don't put a space after property colons.
    #[arg(long)]
    no_colon_padding: bool,

    /// Don't put a space after commas.
    #[arg(long)]
    no_comma_padding: bool,

    /// Always fully expand containers at depth N or shallower
    /// (-1 to disable).
    #[arg(long, value_name = "N", default_value = "-1", allow_hyphen_values = true)]
    always_expand_depth: isize,

    /// Don't right-align numeric siblings to a common precision.
    #[arg(long)]
    dont_justify_numbers: bool,

    /// String attached to the beginning of every line.
    #[arg(long, value_name = "STRING")]
    prefix_string: Option<String>,

    /// Align property names of expanded dicts.
    #[arg(long)]
    align_properties: bool,

    /// Measure strings by East-Asian display width.
    #[arg(long)]
    unicode: bool,

    /// Emit non-ASCII characters as-is instead of \uXXXX escapes.
    #[arg(long)]
    no_ensure_ascii: bool,

    /// Minimum similarity (0-100) for dicts to form table rows;
    /// above 100 disables dict tables.
    #[arg(long, value_name = "N", default_value = "75")]
    table_dict_similarity: u32,

    /// Minimum similarity (0-100) for lists to form table rows;
    /// above 100 disables list tables.
    #[arg(long, value_name = "N", default_value = "75")]
    table_list_similarity: u32,

    /// Let dicts use the multiple-items-per-line layout.
    #[arg(long)]
    multiline_compact_dict: bool,

    /// Strip trailing whitespace from every output line.
    #[arg(long)]
    omit_trailing_whitespace: bool,

    /// Enable trace logging of layout decisions to stderr.
    #[arg(long)]
    debug: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BracketPaddingArg {
    Simple,
    Nested,
}

fn main() {
    let args = Args::parse();

    if args.debug {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_writer(io::stderr)
            .init();
    }

    if let Err(e) = run(args) {
        eprintln!("cjson: {}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    if args.files.is_empty() && io::stdin().is_terminal() {
        Args::command().print_help()?;
        return Ok(());
    }

    let inputs: Vec<PathBuf> = if args.files.is_empty() {
        vec![PathBuf::from("-")]
    } else {
        args.files.clone()
    };

    if !args.output.is_empty() && args.output.len() != inputs.len() {
        return Err(format!(
            "got {} input file(s) but {} output file(s); the counts must match",
            inputs.len(),
            args.output.len()
        )
        .into());
    }

    let mut formatter = Formatter::new();
    configure_options(&mut formatter.options, &args);
    formatter.options.validate()?;
    let eol = if args.crlf { "\r\n" } else { "\n" };

    for (index, input) in inputs.iter().enumerate() {
        let content = if input.as_os_str() == "-" {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| format!("cannot read stdin: {}", e))?;
            buffer
        } else {
            fs::read_to_string(input)
                .map_err(|e| format!("cannot read '{}': {}", input.display(), e))?
        };

        let output = formatter
            .reformat(&content)
            .map_err(|e| format!("'{}': {}", input.display(), e))?;
        for warning in formatter.take_warnings() {
            eprintln!("cjson: warning: {}", warning);
        }

        if let Some(path) = args.output.get(index) {
            fs::write(path, format!("{}{}", output, eol))
                .map_err(|e| format!("cannot write '{}': {}", path.display(), e))?;
        } else {
            let mut stdout = io::stdout().lock();
            stdout.write_all(output.as_bytes())?;
            stdout.write_all(eol.as_bytes())?;
        }
    }

    Ok(())
}

fn configure_options(opts: &mut FormatterOptions, args: &Args) {
    opts.json_eol_style = if args.crlf { EolStyle::Crlf } else { EolStyle::Lf };
    opts.max_inline_length = args.max_inline_length;
    opts.max_inline_complexity = args.max_inline_complexity;
    opts.max_compact_list_complexity = args.max_compact_list_complexity;

    match args.bracket_padding {
        BracketPaddingArg::Simple => {
            opts.nested_bracket_padding = false;
            opts.simple_bracket_padding = true;
        }
        BracketPaddingArg::Nested => {
            opts.nested_bracket_padding = true;
            opts.simple_bracket_padding = false;
        }
    }

    opts.indent_spaces = args.indent;
    opts.use_tab_to_indent = args.tab_indent;
    opts.colon_padding = !args.no_colon_padding;
    opts.comma_padding = !args.no_comma_padding;
    opts.always_expand_depth = args.always_expand_depth;
    opts.dont_justify_numbers = args.dont_justify_numbers;
    if let Some(prefix) = &args.prefix_string {
        opts.prefix_string = prefix.clone();
    }
    opts.align_expanded_property_names = args.align_properties;
    opts.east_asian_string_widths = args.unicode;
    opts.ensure_ascii = !args.no_ensure_ascii;
    opts.table_dict_minimum_similarity = args.table_dict_similarity;
    opts.table_list_minimum_similarity = args.table_list_similarity;
    opts.multiline_compact_dict = args.multiline_compact_dict;
    opts.omit_trailing_whitespace = args.omit_trailing_whitespace;
}

use clap::{Parser, Subcommand};
use hsx_parser::parser::DEFAULT_MAX_DEPTH;
use hsx_parser::ParseOptions;
use std::path::Path;

#[derive(Parser)]
#[command(name = "hsx")]
#[command(about = "HSX: element markup to hyperscript compiler")]
#[command(version)]
struct Cli {
    /// Maximum element nesting depth
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile a markup file to JavaScript
    Build {
        /// Input file, or `-` for stdin
        path: String,

        /// Output file (defaults to <stem>.js next to the input, stdout for stdin)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Check a markup file for errors without generating output
    Check {
        /// Input file, or `-` for stdin
        path: String,
    },

    /// Print the syntax tree as ESTree JSON
    Ast {
        /// Input file, or `-` for stdin
        path: String,

        /// Print on a single line
        #[arg(long)]
        compact: bool,
    },

    /// Print the token stream, one token per line
    Tokens {
        /// Input file, or `-` for stdin
        path: String,
    },
}

fn main() {
    let cli = Cli::parse();
    let options = ParseOptions {
        max_depth: cli.max_depth,
    };

    match cli.command {
        Command::Build { path, output } => cmd_build(&path, output.as_deref(), &options),
        Command::Check { path } => cmd_check(&path, &options),
        Command::Ast { path, compact } => cmd_ast(&path, compact, &options),
        Command::Tokens { path } => cmd_tokens(&path),
    }
}

fn fail(message: String) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

fn read_source(path: &str) -> String {
    if path == "-" {
        return std::io::read_to_string(std::io::stdin())
            .unwrap_or_else(|e| fail(format!("Error reading stdin: {e}")));
    }

    let p = Path::new(path);
    if !p.exists() {
        fail(format!("Error: file not found: {path}"));
    }
    std::fs::read_to_string(p).unwrap_or_else(|e| fail(format!("Error reading {path}: {e}")))
}

fn parse(path: &str, options: &ParseOptions) -> hsx_parser::Program {
    let source = read_source(path);
    hsx_parser::Parser::parse_with(&source, options).unwrap_or_else(|e| fail(format!("{path}: {e}")))
}

fn cmd_build(path: &str, output: Option<&str>, options: &ParseOptions) {
    let program = parse(path, options);
    let js = hsx_codegen::generate(&program);

    let target = match output {
        Some(out) => Path::new(out).to_path_buf(),
        None if path == "-" => {
            print!("{js}");
            return;
        }
        None => {
            let p = Path::new(path);
            let stem = p.file_stem().and_then(|s| s.to_str()).unwrap_or("out");
            p.parent()
                .unwrap_or(Path::new("."))
                .join(format!("{stem}.js"))
        }
    };

    if let Err(e) = std::fs::write(&target, &js) {
        fail(format!("Error writing {}: {e}", target.display()));
    }

    eprintln!("Built: {}", target.display());
}

fn cmd_check(path: &str, options: &ParseOptions) {
    let program = parse(path, options);
    eprintln!("OK: {path} ({} top-level elements)", program.body.len());
}

fn cmd_ast(path: &str, compact: bool, options: &ParseOptions) {
    let program = parse(path, options);

    let json = if compact {
        serde_json::to_string(&program)
    } else {
        serde_json::to_string_pretty(&program)
    };
    match json {
        Ok(json) => println!("{json}"),
        Err(e) => fail(format!("Error serializing syntax tree: {e}")),
    }
}

fn cmd_tokens(path: &str) {
    let source = read_source(path);
    let tokens = hsx_lexer::lex(&source).unwrap_or_else(|e| fail(format!("{path}: {e}")));

    for token in tokens {
        println!(
            "{}:{}\t{}..{}\t{}\t{}",
            token.span.line,
            token.span.column,
            token.span.start,
            token.span.end,
            token.kind.describe(),
            token.kind,
        );
    }
}

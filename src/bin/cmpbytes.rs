use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::path::PathBuf;

use compare_bytes::{run, CompareConfig, CompareError};

/// cmpbytes – byte-by-byte file comparison
#[derive(Parser)]
#[command(name = "cmpbytes", version, about = "Compare two files byte by byte")]
struct Cli {
    /// Path of first file
    #[arg(long = "f1", value_name = "PATH")]
    file_a: Option<PathBuf>,

    /// Path of second file
    #[arg(long = "f2", value_name = "PATH")]
    file_b: Option<PathBuf>,

    /// Also write mismatches to this file
    #[arg(short, long = "out", value_name = "PATH")]
    output: Option<PathBuf>,

    /// Print mismatches to the console
    #[arg(short, long)]
    print: bool,

    /// Emit the final result as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Disable coloured output
    #[arg(long)]
    no_color: bool,
}

impl Cli {
    fn into_config(self, color: bool) -> Result<CompareConfig, CompareError> {
        let Cli { file_a, file_b, output, print, .. } = self;

        let (Some(file_a), Some(file_b)) = (file_a, file_b) else {
            return Err(CompareError::MissingPaths);
        };

        let mut config = CompareConfig::new(file_a, file_b)
            .print_mismatches(print)
            .color(color);
        if let Some(out) = output {
            config = config.output(out);
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_module_path(false)
        .format_target(false)
        .init();

    log::info!("Starting cmpbytes");

    let cli = Cli::parse();
    let color = !cli.no_color && std::io::stderr().is_terminal();
    let json = cli.json;

    let config = match cli.into_config(color) {
        Ok(config) => config,
        Err(err @ CompareError::MissingPaths) => {
            log::info!("{err}");
            Cli::command().print_help()?;
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    let result = run(&config).with_context(|| {
        format!("Comparing {:?} with {:?}", config.file_a, config.file_b)
    })?;

    if json {
        let output = serde_json::to_string_pretty(&result)?;
        println!("{output}");
    } else if result.is_identical() {
        let msg = "Files are identical.";
        if color { println!("{}", msg.green().bold()) } else { println!("{msg}") }
    } else {
        let msg = "Files differ.";
        if color { println!("{}", msg.red().bold()) } else { println!("{msg}") }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_all_flags() {
        let args = ["cmpbytes", "--f1", "a.bin", "--f2", "b.bin", "-o", "out.txt", "-p"];
        let cli = Cli::parse_from(&args);
        assert_eq!(cli.file_a, Some(PathBuf::from("a.bin")));
        assert_eq!(cli.file_b, Some(PathBuf::from("b.bin")));
        assert_eq!(cli.output, Some(PathBuf::from("out.txt")));
        assert!(cli.print);
        assert!(!cli.json);

        let config = cli.into_config(false).unwrap();
        assert_eq!(
            config,
            CompareConfig::new("a.bin", "b.bin")
                .output("out.txt")
                .print_mismatches(true)
        );
    }

    #[test]
    fn test_cli_long_forms() {
        let args = ["cmpbytes", "--f1", "a", "--f2", "b", "--out", "o", "--print", "--json", "--no-color"];
        let cli = Cli::parse_from(&args);
        assert!(cli.print);
        assert!(cli.json);
        assert!(cli.no_color);
        assert_eq!(cli.output, Some(PathBuf::from("o")));
    }

    #[test]
    fn test_cli_print_defaults_off() {
        let args = ["cmpbytes", "--f1", "a", "--f2", "b"];
        let config = Cli::parse_from(&args).into_config(true).unwrap();
        assert!(!config.print_mismatches);
        assert_eq!(config.output, None);
        assert!(config.color);
    }

    #[test]
    fn test_cli_missing_second_path() {
        let args = ["cmpbytes", "--f1", "a"];
        let err = Cli::parse_from(&args).into_config(false).unwrap_err();
        assert!(matches!(err, CompareError::MissingPaths));
    }

    #[test]
    fn test_cli_no_args_is_not_a_parse_error() {
        let cli = Cli::try_parse_from(["cmpbytes"]).unwrap();
        assert!(matches!(cli.into_config(false), Err(CompareError::MissingPaths)));
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }
}

//! Command-line argument parsing.

use std::env;
use std::path::PathBuf;

/// Parsed CLI arguments.
#[derive(Debug, Default)]
pub struct CliOptions {
    pub config: Option<PathBuf>,
    pub model: Option<PathBuf>,
    pub scaler: Option<PathBuf>,
    pub outdoor: Option<f64>,
    pub units: Option<u32>,
    pub sweep_out: Option<PathBuf>,
    pub tui: bool,
    pub serve: bool,
    pub port: Option<u16>,
    pub verbose: bool,
}

pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(args)
}

pub fn parse_args_from(args: Vec<String>) -> Result<CliOptions, String> {
    if args.len() == 1 && (args[0] == "--help" || args[0] == "-h") {
        print_usage();
        std::process::exit(0);
    }
    parse_options(&args)
}

fn set_once<T>(slot: &mut Option<T>, value: T, flag: &str) -> Result<(), String> {
    if slot.replace(value).is_some() {
        return Err(format!("{flag} provided more than once"));
    }
    Ok(())
}

fn parse_options(args: &[String]) -> Result<CliOptions, String> {
    let mut i = 0usize;
    let mut opts = CliOptions::default();

    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --config (expected a TOML file path)")?;
                set_once(&mut opts.config, PathBuf::from(path), "--config")?;
            }
            "--model" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --model (expected a JSON file path)")?;
                set_once(&mut opts.model, PathBuf::from(path), "--model")?;
            }
            "--scaler" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --scaler (expected a JSON file path)")?;
                set_once(&mut opts.scaler, PathBuf::from(path), "--scaler")?;
            }
            "--outdoor" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --outdoor (expected °C)")?;
                let value = raw
                    .parse::<f64>()
                    .map_err(|_| format!("--outdoor value \"{raw}\" is not a number"))?;
                set_once(&mut opts.outdoor, value, "--outdoor")?;
            }
            "--units" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --units (expected a unit count)")?;
                let value = raw
                    .parse::<u32>()
                    .map_err(|_| format!("--units value \"{raw}\" is not a valid u32"))?;
                set_once(&mut opts.units, value, "--units")?;
            }
            "--sweep-out" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --sweep-out (expected a file path)")?;
                set_once(&mut opts.sweep_out, PathBuf::from(path), "--sweep-out")?;
            }
            "--port" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --port (expected a u16)")?;
                let value = raw
                    .parse::<u16>()
                    .map_err(|_| format!("--port value \"{raw}\" is not a valid u16"))?;
                set_once(&mut opts.port, value, "--port")?;
            }
            "--tui" => opts.tui = true,
            "--serve" => opts.serve = true,
            "--verbose" | "-v" => opts.verbose = true,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if opts.tui && opts.serve {
        return Err(
            "arguments `--tui` and `--serve` are mutually exclusive; choose one front-end"
                .to_string(),
        );
    }
    if opts.port.is_some() && !opts.serve {
        return Err("`--port` requires `--serve`".to_string());
    }

    Ok(opts)
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("cooling-flex: baseline vs load-shed grid impact for cooling fleets");
    eprintln!();
    eprintln!("Usage: cooling-flex [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>       Load settings from a TOML file");
    eprintln!("  --model <path>        Override the model asset path");
    eprintln!("  --scaler <path>       Override the scaler asset path");
    eprintln!("  --outdoor <°C>        Outdoor ambient temperature (default 35.0)");
    eprintln!("  --units <n>           Number of cooling units (default 1000)");
    eprintln!("  --sweep-out <path>    Export the report over the outdoor range to CSV");
    eprintln!("  --tui                 Interactive terminal dashboard (feature `tui`)");
    eprintln!("  --serve               Start the REST API (feature `api`)");
    eprintln!("  --port <u16>          API server port (default 3000)");
    eprintln!("  --verbose, -v         Debug logging");
    eprintln!("  --help, -h            Show this help message");
}

#[cfg(test)]
mod tests {
    use super::parse_args_from;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn empty_args_use_defaults() {
        let opts = parse_args_from(Vec::new()).expect("parse should succeed");
        assert!(opts.config.is_none());
        assert!(opts.outdoor.is_none());
        assert!(!opts.tui && !opts.serve);
    }

    #[test]
    fn supports_scenario_inputs() {
        let opts = parse_args_from(args(&["--outdoor", "42.5", "--units", "2500"]))
            .expect("parse should succeed");
        assert_eq!(opts.outdoor, Some(42.5));
        assert_eq!(opts.units, Some(2500));
    }

    #[test]
    fn supports_asset_overrides() {
        let opts = parse_args_from(args(&["--model", "m.json", "--scaler", "s.json"]))
            .expect("parse should succeed");
        assert_eq!(
            opts.model.as_deref().and_then(|p| p.to_str()),
            Some("m.json")
        );
        assert_eq!(
            opts.scaler.as_deref().and_then(|p| p.to_str()),
            Some("s.json")
        );
    }

    #[test]
    fn rejects_duplicate_flag() {
        let err = parse_args_from(args(&["--units", "1", "--units", "2"])).unwrap_err();
        assert!(err.contains("more than once"));
    }

    #[test]
    fn rejects_missing_value() {
        let err = parse_args_from(args(&["--outdoor"])).unwrap_err();
        assert!(err.contains("missing value for --outdoor"));
    }

    #[test]
    fn rejects_non_numeric_units() {
        assert!(parse_args_from(args(&["--units", "lots"])).is_err());
        assert!(parse_args_from(args(&["--units", "-5"])).is_err());
    }

    #[test]
    fn tui_and_serve_are_exclusive() {
        let err = parse_args_from(args(&["--tui", "--serve"])).unwrap_err();
        assert!(err.contains("mutually exclusive"));
    }

    #[test]
    fn port_requires_serve() {
        assert!(parse_args_from(args(&["--port", "8080"])).is_err());
        let opts = parse_args_from(args(&["--serve", "--port", "8080"]))
            .expect("parse should succeed");
        assert_eq!(opts.port, Some(8080));
    }

    #[test]
    fn rejects_unknown_argument() {
        let err = parse_args_from(args(&["--bogus"])).unwrap_err();
        assert_eq!(err, "unknown argument: --bogus");
    }
}

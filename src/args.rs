use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Target domain to enumerate subdomains for
    pub domain: Option<String>,

    /// File with one target domain per line
    #[arg(short = 'l', long = "list", value_name = "FILE")]
    pub list: Option<PathBuf>,

    /// Save the final hostname list to output/subdomains.txt
    #[arg(short, long)]
    pub save: bool,

    /// Only keep subdomains that resolve (DNS check)
    #[arg(short, long)]
    pub check: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Maximum number of concurrent DNS lookups
    #[arg(short = 'n', long, default_value = "50")]
    pub concurrency: usize,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positional_domain_and_flags() {
        let args = Args::try_parse_from(["subsweep", "example.com", "-s", "-c"]).unwrap();
        assert_eq!(args.domain.as_deref(), Some("example.com"));
        assert!(args.save);
        assert!(args.check);
        assert_eq!(args.output, None);
        assert_eq!(args.concurrency, 50);
    }

    #[test]
    fn parses_json_output_and_list_file() {
        let args =
            Args::try_parse_from(["subsweep", "-o", "json", "-l", "targets.txt"]).unwrap();
        assert_eq!(args.domain, None);
        assert_eq!(args.output, Some(OutputFormat::Json));
        assert_eq!(args.list.as_deref(), Some(std::path::Path::new("targets.txt")));
    }

    #[test]
    fn rejects_unknown_output_format() {
        assert!(Args::try_parse_from(["subsweep", "example.com", "-o", "xml"]).is_err());
    }
}

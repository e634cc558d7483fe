//! Command-line definition and flag-to-policy mapping.

use clap::{ArgAction, Args, Parser, Subcommand};
use passgen::charset::ClassId;
use passgen::digest::DigestAlgorithm;
use passgen::output::OutputFormat;
use passgen::policy::Policy;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "passgen", version, about = "Secure password and passphrase generator")]
pub struct Cli {
    #[arg(short, long, global = true, help = "TOML configuration file")]
    pub config: Option<PathBuf>,
    #[arg(short, long, global = true, action = ArgAction::Count, help = "Increase log verbosity")]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate passwords
    Generate(GenerateArgs),
    /// Generate a word-based passphrase
    Passphrase(PassphraseArgs),
    /// Analyze the strength of an existing password
    Check { password: String },
    /// Print a hex digest of the input
    Hash {
        input: String,
        #[arg(short, long, default_value_t = DigestAlgorithm::Sha256)]
        algorithm: DigestAlgorithm,
    },
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[arg(short, long)]
    pub length: Option<usize>,
    #[arg(short = 'L', long)]
    pub lower: bool,
    #[arg(short = 'U', long)]
    pub upper: bool,
    #[arg(short, long)]
    pub digits: bool,
    #[arg(short, long)]
    pub symbols: bool,
    #[arg(long, value_name = "CHARS")]
    pub custom: Option<String>,
    #[arg(long, value_name = "N")]
    pub min_lower: Option<usize>,
    #[arg(long, value_name = "N")]
    pub min_upper: Option<usize>,
    #[arg(long, value_name = "N")]
    pub min_digit: Option<usize>,
    #[arg(long, value_name = "N")]
    pub min_symbol: Option<usize>,
    #[arg(long, value_name = "N")]
    pub min_custom: Option<usize>,
    #[arg(long, help = "Require at least one character of every included class")]
    pub strict: bool,
    #[arg(short = 'x', long, value_name = "CHARS")]
    pub exclude: Option<String>,
    #[arg(short = 'a', long)]
    pub avoid_ambiguous: bool,
    #[arg(long)]
    pub avoid_ambiguous_symbols: bool,
    #[arg(short = 'n', long)]
    pub count: Option<usize>,
    #[arg(long, help = "Never repeat a password within the batch")]
    pub unique: bool,
    #[arg(short, long)]
    pub jobs: Option<usize>,
    #[arg(short = 'S', long, help = "Print strength estimates to stderr")]
    pub show_strength: bool,
    #[arg(short, long)]
    pub format: Option<OutputFormat>,
}

impl GenerateArgs {
    /// Builds the unvalidated policy these flags describe.
    pub fn policy(&self, default_length: usize) -> Policy {
        let builtins = [
            (ClassId::Lower, self.lower, self.min_lower),
            (ClassId::Upper, self.upper, self.min_upper),
            (ClassId::Digit, self.digits, self.min_digit),
            (ClassId::Symbol, self.symbols, self.min_symbol),
        ];
        let any_selected = builtins
            .iter()
            .any(|&(_, flag, min)| flag || min.is_some());
        let floor = usize::from(self.strict);

        let mut policy = Policy::new(self.length.unwrap_or(default_length));
        for (class, flag, min) in builtins {
            if !any_selected || flag || min.is_some() {
                policy = policy.require(class, min.unwrap_or(0).max(floor));
            }
        }

        if self.custom.is_some() || self.min_custom.is_some() {
            let chars = self.custom.as_deref().unwrap_or_default();
            policy = policy.with_custom(chars, self.min_custom.unwrap_or(0).max(floor));
        }

        if let Some(exclude) = &self.exclude {
            policy = policy.exclude(exclude.chars());
        }

        policy
            .avoid_ambiguous(self.avoid_ambiguous)
            .avoid_ambiguous_symbols(self.avoid_ambiguous_symbols)
    }
}

#[derive(Args, Debug)]
pub struct PassphraseArgs {
    #[arg(short, long)]
    pub words: Option<usize>,
    #[arg(long)]
    pub separator: Option<String>,
    #[arg(long, help = "Insert a three-digit number")]
    pub number: bool,
    #[arg(long, help = "Insert a symbol")]
    pub symbol: bool,
    #[arg(short = 'S', long, help = "Print strength estimate to stderr")]
    pub show_strength: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn generate_args(args: &[&str]) -> GenerateArgs {
        let cli = Cli::try_parse_from(std::iter::once("passgen").chain(args.iter().copied()))
            .unwrap();
        match cli.command {
            Commands::Generate(args) => args,
            other => panic!("unexpected command {other:?}"),
        }
    }

    fn min_of(policy: &Policy, class: ClassId) -> Option<usize> {
        policy
            .classes
            .iter()
            .find(|spec| spec.class == class)
            .map(|spec| spec.min)
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_class_flags_selects_builtins() {
        let policy = generate_args(&["generate"]).policy(16);
        assert_eq!(policy.length, 16);
        assert_eq!(policy.classes.len(), 4);
        assert!(policy.classes.iter().all(|spec| spec.min == 0));
    }

    #[test]
    fn test_min_implies_class() {
        let policy = generate_args(&["generate", "-l", "12", "-L", "--min-digit", "2"]).policy(16);
        assert_eq!(policy.length, 12);
        assert_eq!(min_of(&policy, ClassId::Lower), Some(0));
        assert_eq!(min_of(&policy, ClassId::Digit), Some(2));
        assert_eq!(min_of(&policy, ClassId::Upper), None);
    }

    #[test]
    fn test_strict_requires_every_included_class() {
        let policy =
            generate_args(&["generate", "--strict", "--custom", "xyz", "--min-upper", "3"]).policy(8);
        assert_eq!(min_of(&policy, ClassId::Upper), Some(3));
        assert_eq!(min_of(&policy, ClassId::Custom), Some(1));
        assert_eq!(min_of(&policy, ClassId::Lower), None);
        assert_eq!(policy.custom, "xyz");
    }

    #[test]
    fn test_exclusions_and_format() {
        let args = generate_args(&["generate", "-x", "abc", "-a", "-f", "hex"]);
        assert_eq!(args.format, Some(OutputFormat::Hex));
        let policy = args.policy(16);
        assert!(policy.avoid_ambiguous);
        assert_eq!(policy.exclude.len(), 3);
    }
}

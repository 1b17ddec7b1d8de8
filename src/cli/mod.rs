pub mod commands;

use std::path::PathBuf;

use clap::builder::{PossibleValuesParser, RangedU64ValueParser};
use clap::Parser;

use crate::config::colors::THEME_NAMES;
use crate::session::Options;

#[derive(Parser, Debug)]
#[command(name = "eksi")]
#[command(about = "Read ekşi sözlük topics and entries in the terminal", long_about = None)]
pub struct Cli {
    /// Number of topics or entries taken from each fetched page
    #[arg(short, long, value_name = "N", value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub count: Option<usize>,

    /// Selecting a topic saves it as a favourite
    #[arg(long)]
    pub favtitle: bool,

    /// Show today's entries of favourite topics
    #[arg(long)]
    pub getfavs: bool,

    /// Save selected entries without asking
    #[arg(long)]
    pub faventry: bool,

    /// Pick a channel before listing topics
    #[arg(long)]
    pub channels: bool,

    /// Show saved favourite entries
    #[arg(long)]
    pub showfavs: bool,

    /// With --showfavs, only entries written today
    #[arg(long, requires = "showfavs")]
    pub today: bool,

    /// Browse saved favourite topics
    #[arg(long)]
    pub favtopics: bool,

    /// Show the latest entries of an author
    #[arg(long, value_name = "NICK")]
    pub author: Option<String>,

    /// Console colour theme
    #[arg(long, value_parser = PossibleValuesParser::new(THEME_NAMES))]
    pub theme: Option<String>,

    /// Config file to use instead of ~/.config/eksi-reader/config.toml
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Session options; `page_size` from the config applies when `--count`
    /// is not given.
    pub fn options(&self, page_size: Option<usize>) -> Options {
        Options {
            count: self.count.or(page_size),
            favtitle: self.favtitle,
            faventry: self.faventry,
            channels: self.channels,
            getfavs: self.getfavs,
            showfavs: self.showfavs,
            today: self.today,
            favtopics: self.favtopics,
            author: self.author.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Mode;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_flags_browses() {
        let cli = Cli::try_parse_from(["eksi"]).unwrap();
        let options = cli.options(None);
        assert_eq!(options.mode(), Mode::Browse);
        assert_eq!(options.count, None);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from(["eksi", "-c", "5", "--favtitle", "--channels"]).unwrap();
        let options = cli.options(Some(10));
        assert_eq!(options.count, Some(5));
        assert!(options.favtitle);
        assert!(options.channels);

        let cli = Cli::try_parse_from(["eksi", "--showfavs", "--today"]).unwrap();
        assert_eq!(cli.options(None).mode(), Mode::SavedEntries { today: true });

        let cli = Cli::try_parse_from(["eksi", "--author", "ssg"]).unwrap();
        assert_eq!(cli.options(None).mode(), Mode::Author("ssg".into()));
    }

    #[test]
    fn test_page_size_fallback() {
        let cli = Cli::try_parse_from(["eksi"]).unwrap();
        assert_eq!(cli.options(Some(10)).count, Some(10));
    }

    #[test]
    fn test_rejected_arguments() {
        assert!(Cli::try_parse_from(["eksi", "--today"]).is_err());
        assert!(Cli::try_parse_from(["eksi", "--theme", "purple"]).is_err());
        assert!(Cli::try_parse_from(["eksi", "--count", "many"]).is_err());
        assert!(Cli::try_parse_from(["eksi", "-c", "0"]).is_err());
    }
}

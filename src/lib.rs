pub mod cli;
pub mod tui;

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_defaults() {
        let cli = cli::Cli::parse_from(["quickadd"]);
        assert_eq!(cli.label, "+ Add entry");
        assert!(!cli.once);
    }

    #[test]
    fn test_cli_custom_label() {
        let cli = cli::Cli::parse_from(["quickadd", "--label", "+ New todo"]);
        assert_eq!(cli.label, "+ New todo");

        let cli = cli::Cli::parse_from(["quickadd", "-l", "+ Note"]);
        assert_eq!(cli.label, "+ Note");
    }

    #[test]
    fn test_cli_once() {
        let cli = cli::Cli::parse_from(["quickadd", "--once"]);
        assert!(cli.once);
    }

    #[test]
    fn test_form_config_from_cli() {
        let cli = cli::Cli::parse_from(["quickadd", "-l", "+ Task", "--once"]);
        let config = cli::FormConfig::from(cli);
        assert_eq!(config.label, "+ Task");
        assert!(config.once);
    }
}

use clap::Parser;

#[derive(Parser)]
#[command(name = "quote-cli")]
#[command(about = "Resolve an ISIN to its end-of-day price history")]
#[command(version)]
pub struct Cli {
    /// ISIN of the instrument to look up (e.g. DE000A0C9QQ8)
    pub isin: String,

    /// Exchange code of the venue to prefer; the first listed venue is used
    /// when omitted
    #[arg(short, long)]
    pub exchange: Option<String>,

    /// How many months of history to request
    #[arg(short, long, default_value_t = 3)]
    pub months: u32,

    /// Override the upstream API base URL
    #[arg(long)]
    pub base_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_isin_with_defaults() {
        let cli = Cli::parse_from(["quote-cli", "DE0001"]);
        assert_eq!(cli.isin, "DE0001");
        assert_eq!(cli.exchange, None);
        assert_eq!(cli.months, 3);
        assert_eq!(cli.base_url, None);
    }

    #[test]
    fn parses_exchange_and_months() {
        let cli = Cli::parse_from(["quote-cli", "DE0001", "-e", "XETR", "--months", "1"]);
        assert_eq!(cli.exchange.as_deref(), Some("XETR"));
        assert_eq!(cli.months, 1);
    }
}

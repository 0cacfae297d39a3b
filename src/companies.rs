/// A company whose IR page is scanned for earnings calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Company {
    pub ticker: &'static str,
    pub name: &'static str,
    pub ir_url: &'static str,
}

pub const COMPANIES: &[Company] = &[
    Company {
        ticker: "AAPL",
        name: "Apple Inc.",
        ir_url: "https://investor.apple.com/investor-relations/default.aspx",
    },
    Company {
        ticker: "TSLA",
        name: "Tesla Inc.",
        ir_url: "https://ir.tesla.com/",
    },
    Company {
        ticker: "GOOGL",
        name: "Alphabet Inc.",
        ir_url: "https://abc.xyz/investor/",
    },
    Company {
        ticker: "MSFT",
        name: "Microsoft Corporation",
        ir_url: "https://www.microsoft.com/en-us/investor/",
    },
    Company {
        ticker: "AMZN",
        name: "Amazon.com Inc.",
        ir_url: "https://ir.aboutamazon.com/quarterly-results/default.aspx",
    },
    Company {
        ticker: "META",
        name: "Meta Platforms Inc.",
        ir_url: "https://investor.atmeta.com/investor-events/default.aspx",
    },
    Company {
        ticker: "NVDA",
        name: "NVIDIA Corporation",
        ir_url: "https://investor.nvidia.com/events-and-presentations/events-and-presentations/default.aspx",
    },
];

/// Restrict the fixed list to `tickers` (case-insensitive), keeping list order.
/// An empty filter selects every company.
pub fn select(tickers: &[String]) -> Vec<&'static Company> {
    COMPANIES
        .iter()
        .filter(|c| tickers.is_empty() || tickers.iter().any(|t| t.eq_ignore_ascii_case(c.ticker)))
        .collect()
}

//! Constituent ticker lists in Yahoo Finance notation.
//!
//! The S&P 500 and NASDAQ-100 lists are large-cap subsets. Lists are
//! maintained by hand and drift from the live index membership.

/// Large-cap subset of the S&P 500 across all sectors.
pub const SP500: &[&str] = &[
    // Information Technology
    "AAPL", "MSFT", "NVDA", "AVGO", "ORCL", "CSCO", "ACN", "AMD", "IBM", "INTC", "TXN", "QCOM",
    "ADBE", "CRM", "NOW",
    // Health Care
    "LLY", "UNH", "JNJ", "ABBV", "MRK", "TMO", "ABT", "DHR", "PFE", "BMY", "AMGN", "GILD",
    // Financials
    "BRK-B", "JPM", "V", "MA", "BAC", "WFC", "MS", "GS", "BLK", "C", "AXP", "SCHW",
    // Consumer Discretionary
    "AMZN", "TSLA", "HD", "MCD", "NKE", "SBUX", "LOW", "TJX", "BKNG", "CMG", "F", "GM",
    // Communication Services
    "GOOGL", "GOOG", "META", "NFLX", "DIS", "CMCSA", "T", "VZ", "TMUS", "EA",
    // Industrials
    "CAT", "UNP", "RTX", "HON", "UPS", "BA", "DE", "LMT", "GE", "MMM", "FDX", "NSC",
    // Consumer Staples
    "WMT", "PG", "COST", "KO", "PEP", "PM", "MO", "CL", "MDLZ", "KHC",
    // Energy
    "XOM", "CVX", "COP", "SLB", "EOG", "MPC", "PSX", "VLO", "OXY", "HAL",
    // Utilities
    "NEE", "SO", "DUK", "CEG", "AEP", "EXC", "XEL", "D",
    // Real Estate
    "PLD", "AMT", "EQIX", "CCI", "PSA", "SPG", "O", "WELL",
    // Materials
    "LIN", "APD", "SHW", "FCX", "NEM", "ECL", "DD", "DOW", "PPG", "NUE",
];

/// Subset of the NASDAQ-100.
pub const NASDAQ100: &[&str] = &[
    "AAPL", "MSFT", "NVDA", "AMZN", "META", "GOOGL", "GOOG", "AVGO", "TSLA", "COST", "NFLX",
    "AMD", "PEP", "ADBE", "LIN", "CSCO", "TMUS", "QCOM", "INTU", "TXN", "AMGN", "ISRG", "AMAT",
    "CMCSA", "BKNG", "HON", "VRTX", "PANW", "ADP", "GILD", "SBUX", "MU", "ADI", "LRCX", "MELI",
    "REGN", "KLAC", "MDLZ", "INTC", "PYPL", "SNPS", "CDNS", "CRWD", "MAR", "CTAS", "ORLY", "CEG",
    "CSX", "ASML", "FTNT", "ABNB", "MRVL", "PDD", "NXPI", "ROP", "WDAY", "ADSK", "DASH", "PCAR",
    "CHTR", "MNST", "CPRT", "AEP", "ROST", "PAYX", "KDP", "ODFL", "FAST", "KHC", "EXC", "DDOG",
    "BKR", "TTD", "CTSH", "TEAM", "VRSK", "EA", "XEL", "GEHC", "LULU", "IDXX", "ZS", "MCHP",
    "ON", "DXCM", "BIIB", "CDW", "TTWO", "GFS", "WBD", "MDB", "ARM",
];

/// Dow Jones Industrial Average.
pub const DJIA: &[&str] = &[
    "AAPL", "AMGN", "AMZN", "AXP", "BA", "CAT", "CRM", "CSCO", "CVX", "DIS", "GS", "HD", "HON",
    "IBM", "JNJ", "JPM", "KO", "MCD", "MMM", "MRK", "MSFT", "NKE", "NVDA", "PG", "SHW", "TRV",
    "UNH", "V", "VZ", "WMT",
];

/// PHLX Semiconductor Sector index.
pub const SOX: &[&str] = &[
    "AMD", "ADI", "AMAT", "ASML", "AZTA", "AVGO", "COHR", "ENTG", "GFS", "INTC", "IPGP", "KLAC",
    "LRCX", "LSCC", "MRVL", "MCHP", "MU", "MPWR", "NOVT", "NVDA", "NXPI", "ON", "QRVO", "QCOM",
    "SWKS", "SYNA", "TSM", "TER", "TXN", "WOLF",
];

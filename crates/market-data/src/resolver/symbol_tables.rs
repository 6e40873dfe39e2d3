//! Static lookup tables for non-equity symbols.
//!
//! Anything that is not listed here (and not explicitly typed by the caller)
//! is treated as an equity ticker.

/// Crypto symbol -> CoinGecko coin id.
pub const COINGECKO_IDS: &[(&str, &str)] = &[
    ("BTC", "bitcoin"),
    ("ETH", "ethereum"),
    ("USDT", "tether"),
    ("BNB", "binancecoin"),
    ("SOL", "solana"),
    ("XRP", "ripple"),
    ("USDC", "usd-coin"),
    ("ADA", "cardano"),
    ("DOGE", "dogecoin"),
    ("TRX", "tron"),
    ("AVAX", "avalanche-2"),
    ("DOT", "polkadot"),
    ("LINK", "chainlink"),
    ("MATIC", "matic-network"),
    ("LTC", "litecoin"),
    ("BCH", "bitcoin-cash"),
    ("SHIB", "shiba-inu"),
    ("ATOM", "cosmos"),
    ("XLM", "stellar"),
    ("UNI", "uniswap"),
    ("NEAR", "near"),
    ("APT", "aptos"),
    ("ARB", "arbitrum"),
    ("OP", "optimism"),
    ("TON", "the-open-network"),
];

/// Commodity symbol -> Yahoo front-month futures ticker.
pub const COMMODITY_TICKERS: &[(&str, &str)] = &[
    ("GOLD", "GC=F"),
    ("SILVER", "SI=F"),
    ("PLATINUM", "PL=F"),
    ("PALLADIUM", "PA=F"),
    ("COPPER", "HG=F"),
    ("OIL", "CL=F"),
    ("CRUDE", "CL=F"),
    ("BRENT", "BZ=F"),
    ("NATGAS", "NG=F"),
    ("GASOLINE", "RB=F"),
    ("CORN", "ZC=F"),
    ("WHEAT", "ZW=F"),
    ("SOYBEAN", "ZS=F"),
    ("COFFEE", "KC=F"),
    ("SUGAR", "SB=F"),
    ("COTTON", "CT=F"),
    ("COCOA", "CC=F"),
];

fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(symbol, _)| *symbol == key)
        .map(|(_, value)| *value)
}

/// CoinGecko id for an uppercase crypto symbol.
pub fn coingecko_id_for(symbol: &str) -> Option<&'static str> {
    lookup(COINGECKO_IDS, symbol)
}

/// Futures ticker for an uppercase commodity symbol.
pub fn commodity_ticker_for(symbol: &str) -> Option<&'static str> {
    lookup(COMMODITY_TICKERS, symbol)
}

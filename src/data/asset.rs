use crate::third_party::coincap::api_path::{COINCAP_ICON_BASE, COINCAP_ICON_SUFFIX};
use crate::third_party::coincap::data::AssetRecord;

#[derive(Clone, Debug, PartialEq)]
pub struct Asset {
    pub rank: String,
    pub symbol: String,
    pub name: String,
    pub price_usd: Option<String>,
    pub market_cap_usd: Option<String>,
}

impl Asset {
    #[cfg(test)]
    pub fn new(rank: impl Into<String>, symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            rank: rank.into(),
            symbol: symbol.into(),
            name: name.into(),
            price_usd: None,
            market_cap_usd: None,
        }
    }

    #[cfg(test)]
    pub fn with_prices(mut self, price_usd: &str, market_cap_usd: &str) -> Self {
        self.price_usd = Some(price_usd.to_string());
        self.market_cap_usd = Some(market_cap_usd.to_string());
        self
    }

    pub fn icon_url(&self) -> String {
        icon_url(&self.symbol)
    }

    pub fn price_display(&self) -> String {
        fixed_2(self.price_usd.as_deref())
    }

    pub fn market_cap_display(&self) -> String {
        fixed_2(self.market_cap_usd.as_deref())
    }
}

impl From<AssetRecord> for Asset {
    fn from(record: AssetRecord) -> Self {
        Self {
            rank: record.rank.into_display(),
            symbol: record.symbol,
            name: record.name,
            price_usd: record.price_usd,
            market_cap_usd: record.market_cap_usd,
        }
    }
}

pub fn icon_url(symbol: &str) -> String {
    format!(
        "{}{}{}",
        COINCAP_ICON_BASE,
        symbol.to_lowercase(),
        COINCAP_ICON_SUFFIX
    )
}

/// Two-decimal rendering of a decimal string. A null value reads as zero,
/// anything unparsable as `NaN`.
pub fn fixed_2(value: Option<&str>) -> String {
    let Some(raw) = value else {
        return "0.00".to_string();
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return "0.00".to_string();
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => format!("{:.2}", v),
        _ => "NaN".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_url_lowercases_symbol() {
        assert_eq!(
            icon_url("BTC"),
            "https://assets.coincap.io/assets/icons/btc@2x.png"
        );
        assert_eq!(
            Asset::new("7", "Doge", "Dogecoin").icon_url(),
            "https://assets.coincap.io/assets/icons/doge@2x.png"
        );
    }

    #[test]
    fn price_renders_two_decimals() {
        let btc = Asset::new("1", "BTC", "Bitcoin").with_prices("43123.4567", "845000000000.1");
        assert_eq!(btc.price_display(), "43123.46");
        assert_eq!(btc.market_cap_display(), "845000000000.10");
    }

    #[test]
    fn missing_and_garbage_prices() {
        assert_eq!(fixed_2(None), "0.00");
        assert_eq!(fixed_2(Some("")), "0.00");
        assert_eq!(fixed_2(Some("n/a")), "NaN");
        assert_eq!(fixed_2(Some("0.004")), "0.00");
    }
}

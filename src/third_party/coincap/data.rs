use serde::Deserialize;

/// Body of `GET /v2/assets`.
#[derive(Debug, Deserialize)]
pub struct ApiAssetsResponse {
    pub data: Vec<AssetRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRecord {
    pub rank: RankField,
    pub symbol: String,
    pub name: String,
    pub price_usd: Option<String>,
    pub market_cap_usd: Option<String>,
}

/// The API sends rank as a string, older payloads as a number.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RankField {
    Number(u64),
    Text(String),
}

impl RankField {
    pub fn into_display(self) -> String {
        match self {
            RankField::Number(n) => n.to_string(),
            RankField::Text(s) => s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_string_and_numeric_ranks() {
        let body = r#"{
            "data": [
                {"id": "bitcoin", "rank": "1", "symbol": "BTC", "name": "Bitcoin",
                 "priceUsd": "43123.4567", "marketCapUsd": "845000000000.123"},
                {"rank": 2, "symbol": "ETH", "name": "Ethereum",
                 "priceUsd": null, "marketCapUsd": "1.5"}
            ],
            "timestamp": 1700000000000
        }"#;

        let parsed: ApiAssetsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.data.len(), 2);

        let mut records = parsed.data.into_iter();
        let btc = records.next().unwrap();
        assert_eq!(btc.rank.into_display(), "1");
        assert_eq!(btc.price_usd.as_deref(), Some("43123.4567"));

        let eth = records.next().unwrap();
        assert_eq!(eth.rank.into_display(), "2");
        assert!(eth.price_usd.is_none());
    }

    #[test]
    fn missing_data_field_is_an_error() {
        let body = r#"{"error": "rate limited"}"#;
        assert!(serde_json::from_str::<ApiAssetsResponse>(body).is_err());
    }
}

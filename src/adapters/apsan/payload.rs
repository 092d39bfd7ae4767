use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRequest<'a> {
    pub amount: u64,
    pub redirect_uri: String,
    pub terminal_id: &'a str,
    pub unique_identifier: &'a str,
}

#[derive(Debug, Serialize)]
pub struct TokenRef<'a> {
    pub token: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundRequest<'a> {
    pub amount: u64,
    pub unique_identifier: &'a str,
    pub res_num: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoLimitRefundRequest<'a> {
    pub amount: u64,
    pub grant_id: &'a str,
    pub res_num: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    #[serde(deserialize_with = "string_or_number")]
    pub result: String,
}

#[derive(Debug, Deserialize)]
pub struct AcknowledgeResponse {
    pub result: AcknowledgeResult,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcknowledgeResult {
    #[serde(default)]
    pub acknowledged: bool,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub grant_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

impl From<StringOrNumber> for String {
    fn from(v: StringOrNumber) -> String {
        match v {
            StringOrNumber::String(s) => s,
            StringOrNumber::Number(n) => n.to_string(),
        }
    }
}

// The bank has returned grant ids as integers.
fn string_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    StringOrNumber::deserialize(d).map(String::from)
}

fn opt_string_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Option::<StringOrNumber>::deserialize(d).map(|v| v.map(String::from))
}

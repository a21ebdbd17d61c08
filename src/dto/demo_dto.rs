use serde::{Deserialize, Serialize};
use validator::Validate;

/// Greeting request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GreetRequest {
    #[serde(rename = "displayName")]
    #[validate(length(min = 1, max = 50))]
    pub display_name: String,

    #[validate(email)]
    pub email: Option<String>,
}

crate::wire_names!(GreetRequest {
    display_name => "displayName",
});

/// Greeting response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GreetResponse {
    pub greeting: String,
}

/// Search query string
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchQuery {
    #[validate(length(min = 1))]
    pub q: String,

    #[validate(range(min = 1, max = 100))]
    pub limit: Option<u32>,
}

crate::wire_names!(SearchQuery {});

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub limit: u32,
}

/// Who the caller is, as far as the bearer middleware knows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhoAmIResponse {
    pub authenticated: bool,
    pub token_length: usize,
    pub path: String,
}

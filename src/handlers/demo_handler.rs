use crate::dto::{GreetRequest, GreetResponse, SearchQuery, SearchResponse, WhoAmIResponse};
use crate::handlers::HttpContext;
use crate::interceptors::ApiError;

/// Code returned when a reserved display name is used.
pub const RESERVED_NAME: i64 = 1001;

const DEFAULT_SEARCH_LIMIT: u32 = 20;

/// Greet the caller by display name
pub async fn greet(request: GreetRequest, _ctx: HttpContext) -> anyhow::Result<GreetResponse> {
    if request.display_name.eq_ignore_ascii_case("admin") {
        return Err(ApiError::new(RESERVED_NAME, "display name is reserved").into());
    }

    Ok(GreetResponse {
        greeting: format!("Hello, {}!", request.display_name),
    })
}

/// Echo a validated search query
pub async fn search(query: SearchQuery, _ctx: HttpContext) -> anyhow::Result<SearchResponse> {
    Ok(SearchResponse {
        query: query.q,
        limit: query.limit.unwrap_or(DEFAULT_SEARCH_LIMIT),
    })
}

pub async fn whoami(ctx: HttpContext) -> anyhow::Result<WhoAmIResponse> {
    let token = ctx.bearer_token();

    Ok(WhoAmIResponse {
        authenticated: token.is_some(),
        token_length: token.map_or(0, str::len),
        path: ctx.original_path().to_string(),
    })
}

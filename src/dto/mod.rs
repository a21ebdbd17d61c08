pub mod demo_dto;

pub use demo_dto::{GreetRequest, GreetResponse, SearchQuery, SearchResponse, WhoAmIResponse};

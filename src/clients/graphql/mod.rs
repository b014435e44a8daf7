//! GraphQL API client for Shopify Admin API.
//!
//! # Response Structure
//!
//! Shopify answers GraphQL queries with HTTP 200 and these body members:
//!
//! - `data`: The query result data
//! - `errors`: Any GraphQL errors
//! - `extensions`: Query cost information
//!
//! [`GraphqlClient::query`] turns a non-empty `errors` member into
//! [`ClientError::Graphql`](crate::clients::ClientError::Graphql) and returns
//! `data` as the response body.

mod client;

pub use client::{GraphqlClient, GRAPHQL_PATH};

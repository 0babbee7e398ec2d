//! HTTP API: routes, handlers, wire types and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

//! DTOs transversais da API

pub mod common;

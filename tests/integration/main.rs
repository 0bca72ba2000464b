//! Integration tests for the extraction-and-crawl engine

mod cache_tests;
mod crawl_tests;
mod fixtures;

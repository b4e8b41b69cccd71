mod common;
mod resolver;
mod scoring;

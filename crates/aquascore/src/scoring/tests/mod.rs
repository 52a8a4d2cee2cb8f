mod common;
mod engine;
mod routing;
mod scorers;

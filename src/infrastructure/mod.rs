pub mod commons;

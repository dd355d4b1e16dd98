pub mod container;
pub mod extractor;
pub mod formats;
pub mod gps;
pub mod grouping;
pub mod scan;
pub mod tags;

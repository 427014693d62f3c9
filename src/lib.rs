//! wikiiif serves IIIF Presentation manifests and Image API descriptors for
//! images hosted on Wikimedia Commons, assembled on the fly from the Commons
//! `imageinfo` API.

pub mod application;
pub mod domain;
pub mod infrastructure;

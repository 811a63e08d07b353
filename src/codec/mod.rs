//! Textual forms of a [`MapState`](crate::MapState): URL hash, short link,
//! geo URI and stored location string, plus the query-string parsing they
//! share.

pub mod geo_uri;
pub mod hash;
pub mod location;
pub mod query;
pub mod short_link;

pub use geo_uri::{decode_geo_uri, encode_geo_uri};
pub use hash::StateCodec;
pub use location::{decode_location, encode_location};
pub use query::{QueryParams, UrlParts};
pub use short_link::{ShortLinkCodec, ShortLinkTarget};

//! Common transport-layer types shared between the server, provider, and
//! compute crates. These structs mirror the shapes that move across the
//! crate seams so none of them has to duplicate the other's definitions.

mod market;

pub use market::{ForecastPoint, ForecastSeries, PricePoint, TickerMeta};

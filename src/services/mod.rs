//! External collaborators: price history and the instrument universe.

pub mod market_data;
pub mod universe;
pub mod yahoo;

pub use market_data::{InMemoryMarketDataProvider, MarketDataProvider, RetrievalError};
pub use universe::{StockUniverse, UniverseEntry, UniverseError};
pub use yahoo::YahooMarketDataProvider;

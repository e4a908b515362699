use crate::database::traits::from_any_row::FromAnyRow;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// A row shape that can be selected by column list and stored in the data cache.
pub trait Projection: FromAnyRow + Serialize + DeserializeOwned + Send + Sync + Unpin + 'static {
    fn columns() -> &'static [&'static str];
}

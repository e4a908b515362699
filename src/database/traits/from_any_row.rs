use sqlx::any::AnyRow;
use sqlx::FromRow;

/// Decodes one `AnyRow`. Implemented for every `sqlx::FromRow` type, so
/// `#[derive(sqlx::FromRow)]` is the usual way to get it.
pub trait FromAnyRow: Sized {
    fn from_any_row(row: &AnyRow) -> Result<Self, sqlx::Error>;
}

impl<T> FromAnyRow for T
where
    T: for<'r> FromRow<'r, AnyRow>,
{
    fn from_any_row(row: &AnyRow) -> Result<Self, sqlx::Error> {
        T::from_row(row)
    }
}

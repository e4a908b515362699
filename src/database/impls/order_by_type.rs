use crate::database::enums::order_by_type::OrderByType;

impl OrderByType {
    pub fn keyword(&self) -> &'static str {
        match self {
            OrderByType::Asc => "ASC",
            OrderByType::Desc => "DESC",
        }
    }
}

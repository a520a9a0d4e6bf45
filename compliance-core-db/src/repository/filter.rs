use std::str::FromStr;
use uuid::Uuid;

use crate::models::assignment::AssignmentStatus;
use crate::repository::pagination::PageRequest;

/// Column the assignment listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderField {
    #[default]
    UpdatedAt,
    CreatedAt,
    Status,
    DueDate,
    ExpirationDate,
}

impl FromStr for OrderField {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "updatedAt" | "updated_at" => Ok(OrderField::UpdatedAt),
            "createdAt" | "created_at" => Ok(OrderField::CreatedAt),
            "status" => Ok(OrderField::Status),
            "dueDate" | "due_date" => Ok(OrderField::DueDate),
            "expirationDate" | "expiration_date" => Ok(OrderField::ExpirationDate),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortOrder {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" | "ASC" => Ok(SortOrder::Asc),
            "desc" | "DESC" => Ok(SortOrder::Desc),
            _ => Err(()),
        }
    }
}

/// Filter over the assignment listing; all predicates are conjunctive.
#[derive(Debug, Clone, Default)]
pub struct AssignmentFilter {
    pub employee_id: Option<Uuid>,
    pub document_type_id: Option<Uuid>,
    pub status: Option<AssignmentStatus>,
    /// Case-insensitive substring match on the employee name.
    pub search: Option<String>,
}

/// Full paginated listing query: 1-based page, filter, ordering.
#[derive(Debug, Clone)]
pub struct AssignmentQuery {
    pub page: usize,
    pub limit: usize,
    pub filter: AssignmentFilter,
    pub order_by: OrderField,
    pub order: SortOrder,
}

impl Default for AssignmentQuery {
    fn default() -> Self {
        AssignmentQuery {
            page: 1,
            limit: 10,
            filter: AssignmentFilter::default(),
            order_by: OrderField::default(),
            order: SortOrder::default(),
        }
    }
}

impl AssignmentQuery {
    /// Offset/limit view of the query; `skip = (page - 1) * limit`.
    pub fn page_request(&self) -> PageRequest {
        PageRequest::for_page(self.limit, self.page)
    }
}

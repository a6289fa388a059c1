//! Pagination and sort parameters for project listings.
//!
//! Inputs are validated, not clamped: out-of-range values are rejected so the
//! HTTP layer can answer 400.

use serde::Serialize;

use crate::errors::ServiceError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(s: &str) -> Result<Self, ServiceError> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(ServiceError::Validation(
                "Sort direction must be either 'asc' or 'desc'".into(),
            )),
        }
    }
}

/// Validated pagination request. `page_number` is 1-based.
#[derive(Clone, Debug)]
pub struct PageRequest {
    pub page_number: u64,
    pub page_size: u64,
    pub sort_field: String,
    pub sort_direction: SortDirection,
}

impl PageRequest {
    pub fn new(
        page_number: u64,
        page_size: u64,
        sort_field: &str,
        sort_direction: &str,
    ) -> Result<Self, ServiceError> {
        if page_number < 1 {
            return Err(ServiceError::Validation(
                "Page number must not be less than one!".into(),
            ));
        }
        if page_size < 1 {
            return Err(ServiceError::Validation(
                "Page size must not be less than one!".into(),
            ));
        }
        let sort_direction = SortDirection::parse(sort_direction)?;
        Ok(Self { page_number, page_size, sort_field: sort_field.to_string(), sort_direction })
    }

    /// 0-based page index for the paginator.
    pub fn page_index(&self) -> u64 {
        self.page_number - 1
    }
}

/// One page of results plus listing metadata.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_number: u64,
    pub page_size: u64,
    pub sort_field: String,
    pub sort_direction: SortDirection,
    pub total_items: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            sort_field: self.sort_field,
            sort_direction: self.sort_direction,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

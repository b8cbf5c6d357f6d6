//! Applies search parameters to a record sequence.
//!
//! # Design
//! The stages run in a fixed order, each consuming the previous stage's
//! output: offset, filter, sort, limit. Parameters arrive as raw strings and
//! are parsed by the stage that uses them, so failures surface in stage
//! order (an out-of-range offset wins over an unparseable limit).

use std::cmp::Ordering;

use search_core::{ErrorCode, OrderBy};
use thiserror::Error;

use crate::dataset::Record;

/// Query string of a search request, undecoded.
///
/// An empty value counts as absent.
#[derive(Debug, Clone, Default)]
pub struct SearchParams {
    pub offset: Option<String>,
    pub limit: Option<String>,
    pub query: Option<String>,
    pub order_field: Option<String>,
    pub order_by: Option<String>,
}

impl SearchParams {
    /// Build from decoded query pairs. The first value of a repeated key
    /// wins and unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = SearchParams::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "offset" => &mut params.offset,
                "limit" => &mut params.limit,
                "query" => &mut params.query,
                "order_field" => &mut params.order_field,
                "order_by" => &mut params.order_by,
                _ => continue,
            };
            if slot.is_none() && !value.is_empty() {
                *slot = Some(value);
            }
        }
        params
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PipelineError {
    #[error("offset {offset} is out of range for {len} records")]
    Range { offset: usize, len: usize },

    #[error("unknown order field {0:?}")]
    BadOrderField(String),

    #[error("bad {name} parameter {value:?}")]
    Param { name: &'static str, value: String },
}

impl PipelineError {
    pub fn code(&self) -> ErrorCode {
        match self {
            PipelineError::Range { .. } => ErrorCode::Range,
            PipelineError::BadOrderField(_) => ErrorCode::BadOrderField,
            PipelineError::Param { .. } => ErrorCode::Param,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OrderField {
    Id,
    Name,
    Age,
}

impl OrderField {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "Id" => Some(OrderField::Id),
            "Name" => Some(OrderField::Name),
            "Age" => Some(OrderField::Age),
            _ => None,
        }
    }

    fn compare(self, a: &Record, b: &Record) -> Ordering {
        match self {
            OrderField::Id => a.id.cmp(&b.id),
            OrderField::Name => a.name.cmp(&b.name),
            OrderField::Age => a.age.cmp(&b.age),
        }
    }
}

/// Run the full pipeline over `records`.
pub fn apply(records: Vec<Record>, params: &SearchParams) -> Result<Vec<Record>, PipelineError> {
    let records = skip_offset(records, params.offset.as_deref())?;
    let records = filter(records, params.query.as_deref());
    let records = sort(
        records,
        params.order_field.as_deref().unwrap_or(""),
        params.order_by.as_deref(),
    )?;
    take_limit(records, params.limit.as_deref())
}

fn parse_count(name: &'static str, raw: &str) -> Result<usize, PipelineError> {
    raw.parse().map_err(|_| PipelineError::Param {
        name,
        value: raw.to_string(),
    })
}

fn skip_offset(mut records: Vec<Record>, raw: Option<&str>) -> Result<Vec<Record>, PipelineError> {
    let Some(raw) = raw else {
        return Ok(records);
    };
    let offset = parse_count("offset", raw)?;
    if offset >= records.len() {
        return Err(PipelineError::Range {
            offset,
            len: records.len(),
        });
    }
    Ok(records.split_off(offset))
}

/// `about=` and `name=` select a substring match; anything else passes through.
pub fn filter(records: Vec<Record>, query: Option<&str>) -> Vec<Record> {
    let query = query.unwrap_or("");
    if let Some(needle) = query.strip_prefix("about=") {
        records
            .into_iter()
            .filter(|r| r.about.contains(needle))
            .collect()
    } else if let Some(needle) = query.strip_prefix("name=") {
        records
            .into_iter()
            .filter(|r| r.name.contains(needle))
            .collect()
    } else {
        records
    }
}

/// Without `order_by` the stage is skipped entirely. With one, a non-empty
/// `order_field` is validated even when the order is `AsIs`; the reorder
/// itself only happens for a non-zero order. Ties keep their incoming order.
pub fn sort(
    mut records: Vec<Record>,
    order_field: &str,
    order_by: Option<&str>,
) -> Result<Vec<Record>, PipelineError> {
    let Some(raw_order) = order_by.filter(|raw| !raw.is_empty()) else {
        return Ok(records);
    };

    let field = match order_field {
        "" => OrderField::Name,
        other => OrderField::parse(other)
            .ok_or_else(|| PipelineError::BadOrderField(other.to_string()))?,
    };

    let order = raw_order
        .parse::<i32>()
        .ok()
        .and_then(OrderBy::from_code)
        .ok_or_else(|| PipelineError::Param {
            name: "order_by",
            value: raw_order.to_string(),
        })?;

    match order {
        OrderBy::AsIs => {}
        OrderBy::Ascending => records.sort_by(|a, b| field.compare(a, b)),
        OrderBy::Descending => records.sort_by(|a, b| field.compare(b, a)),
    }
    Ok(records)
}

fn take_limit(mut records: Vec<Record>, raw: Option<&str>) -> Result<Vec<Record>, PipelineError> {
    let Some(raw) = raw else {
        return Ok(records);
    };
    let limit = parse_count("limit", raw)?;
    records.truncate(limit);
    Ok(records)
}

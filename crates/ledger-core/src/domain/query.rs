//! Typed list/find query

use uuid::Uuid;

use crate::precision::UnitDp;
use crate::transport::QueryParams;

/// Where-expression sent as the `where` parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter(String);

impl Filter {
    pub fn raw(expression: impl Into<String>) -> Self {
        Self(expression.into())
    }

    /// `Name!=null&&Name.StartsWith("<prefix>")`
    pub fn name_starts_with(prefix: &str) -> Self {
        Self(format!(
            "Name!=null&&Name.StartsWith(\"{}\")",
            escape(prefix)
        ))
    }

    pub fn field_equals(field: &str, value: &str) -> Self {
        Self(format!("{}==\"{}\"", field, escape(value)))
    }

    pub fn and(self, other: Filter) -> Self {
        Self(format!("{}&&{}", self.0, other.0))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

impl OrderBy {
    pub fn asc(field: impl Into<String>) -> Self {
        Self { field: field.into(), direction: Direction::Asc }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self { field: field.into(), direction: Direction::Desc }
    }

    fn render(&self) -> String {
        match self.direction {
            Direction::Asc => format!("{} ASC", self.field),
            Direction::Desc => format!("{} DESC", self.field),
        }
    }
}

/// Search options for list/get calls. Every field maps onto one upstream
/// query parameter; unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub ids: Vec<Uuid>,
    pub filter: Option<Filter>,
    pub order: Option<OrderBy>,
    pub unit_dp: Option<UnitDp>,
    pub include_archived: Option<bool>,
    pub statuses: Vec<String>,
    pub contact_ids: Vec<Uuid>,
    pub summary_only: Option<bool>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn id(mut self, id: Uuid) -> Self {
        self.ids.push(id);
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn order(mut self, order: OrderBy) -> Self {
        self.order = Some(order);
        self
    }

    pub fn unit_dp(mut self, unit_dp: UnitDp) -> Self {
        self.unit_dp = Some(unit_dp);
        self
    }

    pub fn include_archived(mut self, include: bool) -> Self {
        self.include_archived = Some(include);
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.statuses.push(status.into());
        self
    }

    pub fn contact_id(mut self, contact_id: Uuid) -> Self {
        self.contact_ids.push(contact_id);
        self
    }

    pub fn summary_only(mut self, summary_only: bool) -> Self {
        self.summary_only = Some(summary_only);
        self
    }

    pub fn to_params(&self) -> QueryParams {
        let mut params = Vec::new();

        if let Some(page) = self.page {
            params.push(("page".to_string(), page.to_string()));
        }
        if !self.ids.is_empty() {
            params.push(("IDs".to_string(), join_ids(&self.ids)));
        }
        if let Some(filter) = &self.filter {
            params.push(("where".to_string(), filter.as_str().to_string()));
        }
        if let Some(order) = &self.order {
            params.push(("order".to_string(), order.render()));
        }
        if let Some(unit_dp) = self.unit_dp {
            params.push(("unitdp".to_string(), unit_dp.as_param().to_string()));
        }
        if let Some(include) = self.include_archived {
            params.push(("includeArchived".to_string(), include.to_string()));
        }
        if !self.statuses.is_empty() {
            params.push(("Statuses".to_string(), self.statuses.join(",")));
        }
        if !self.contact_ids.is_empty() {
            params.push(("ContactIDs".to_string(), join_ids(&self.contact_ids)));
        }
        if let Some(summary) = self.summary_only {
            params.push(("summaryOnly".to_string(), summary.to_string()));
        }

        params
    }
}

fn join_ids(ids: &[Uuid]) -> String {
    ids.iter().map(Uuid::to_string).collect::<Vec<_>>().join(",")
}

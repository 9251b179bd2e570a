//! Catalog Records
//!
//! Shapes returned by the catalog origin. Origin documents use `_id` for
//! identifiers; records serialize them back out as `id`.

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// One row of an interface listing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InterfaceSummary {
    #[serde(alias = "_id")]
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub catid: u64,
    #[serde(default)]
    pub project_id: u64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub add_time: i64,
    #[serde(default)]
    pub up_time: i64,
}

/// A page of interface summaries.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InterfacePage {
    #[serde(default)]
    pub count: u64,
    /// Number of pages available
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub list: Vec<InterfaceSummary>,
}

/// A request parameter, header or form field.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Param {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type", skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub value: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub required: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub example: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub desc: String,
}

/// Full definition of one interface.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InterfaceDetail {
    #[serde(alias = "_id")]
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub project_id: u64,
    #[serde(default)]
    pub catid: u64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub markdown: String,
    #[serde(default)]
    pub req_params: Vec<Param>,
    #[serde(default)]
    pub req_query: Vec<Param>,
    #[serde(default)]
    pub req_headers: Vec<Param>,
    #[serde(default)]
    pub req_body_type: String,
    #[serde(default)]
    pub req_body_form: Vec<Param>,
    #[serde(default)]
    pub req_body_other: String,
    #[serde(default)]
    pub res_body_type: String,
    #[serde(default)]
    pub res_body: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub add_time: i64,
    #[serde(default)]
    pub up_time: i64,
}

/// An interface category of a project.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Category {
    #[serde(alias = "_id")]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub project_id: u64,
}

// == Catalog Value ==
/// Everything the catalog cache can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogValue {
    Page(InterfacePage),
    Detail(InterfaceDetail),
    Categories(Vec<Category>),
}

impl CatalogValue {
    fn kind(&self) -> &'static str {
        match self {
            CatalogValue::Page(_) => "page",
            CatalogValue::Detail(_) => "detail",
            CatalogValue::Categories(_) => "categories",
        }
    }
}

fn mismatch(expected: &str, found: &CatalogValue) -> CatalogError {
    CatalogError::Internal(format!(
        "cached value has kind '{}', expected '{}'",
        found.kind(),
        expected
    ))
}

impl From<InterfacePage> for CatalogValue {
    fn from(page: InterfacePage) -> Self {
        CatalogValue::Page(page)
    }
}

impl From<InterfaceDetail> for CatalogValue {
    fn from(detail: InterfaceDetail) -> Self {
        CatalogValue::Detail(detail)
    }
}

impl From<Vec<Category>> for CatalogValue {
    fn from(categories: Vec<Category>) -> Self {
        CatalogValue::Categories(categories)
    }
}

impl TryFrom<CatalogValue> for InterfacePage {
    type Error = CatalogError;

    fn try_from(value: CatalogValue) -> Result<Self, Self::Error> {
        match value {
            CatalogValue::Page(page) => Ok(page),
            other => Err(mismatch("page", &other)),
        }
    }
}

impl TryFrom<CatalogValue> for InterfaceDetail {
    type Error = CatalogError;

    fn try_from(value: CatalogValue) -> Result<Self, Self::Error> {
        match value {
            CatalogValue::Detail(detail) => Ok(detail),
            other => Err(mismatch("detail", &other)),
        }
    }
}

impl TryFrom<CatalogValue> for Vec<Category> {
    type Error = CatalogError;

    fn try_from(value: CatalogValue) -> Result<Self, Self::Error> {
        match value {
            CatalogValue::Categories(categories) => Ok(categories),
            other => Err(mismatch("categories", &other)),
        }
    }
}

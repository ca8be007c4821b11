//! Resource catalogue.
//!
//! Every listing in the console (the six admin tabs and the public catalog
//! page) is described by a [`ResourceKind`]. The kind owns everything that
//! differs between listings: endpoint, envelope keys, sortable fields,
//! discrete filters, table columns and required form fields. The controller
//! code itself is shared.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A discrete filter a listing exposes (e.g. `status`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSpec {
    /// Query parameter name.
    pub key: &'static str,
    /// Accepted values. Empty means the set is open (e.g. category ids).
    pub values: &'static [&'static str],
}

impl FilterSpec {
    /// Returns `true` if `value` is acceptable for this filter.
    #[must_use]
    pub fn accepts(&self, value: &str) -> bool {
        if self.values.is_empty() {
            !value.trim().is_empty()
        } else {
            self.values.contains(&value)
        }
    }
}

/// A table column: header label and the record field it displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// Header label.
    pub header: &'static str,
    /// Record field name.
    pub field: &'static str,
    /// Fixed display width in characters.
    pub width: usize,
}

const fn col(header: &'static str, field: &'static str, width: usize) -> Column {
    Column { header, field, width }
}

const PRODUCT_STATUS: &[&str] = &["draft", "published", "archived"];
const ORDER_STATUS: &[&str] = &["pending", "paid", "processing", "shipped", "delivered", "cancelled"];
const USER_ROLE: &[&str] = &["admin", "customer"];
const REQUEST_STATUS: &[&str] = &["new", "in_review", "quoted", "accepted", "rejected", "completed"];
const POST_STATUS: &[&str] = &["draft", "published"];

const PRODUCT_COLUMNS: &[Column] = &[
    col("NAME", "name", 30),
    col("PRICE", "price", 10),
    col("STOCK", "stock", 7),
    col("STATUS", "status", 11),
    col("CREATED", "createdAt", 10),
];
const CATEGORY_COLUMNS: &[Column] = &[
    col("NAME", "name", 30),
    col("SLUG", "slug", 24),
    col("CREATED", "createdAt", 10),
];
const ORDER_COLUMNS: &[Column] = &[
    col("ORDER", "orderNumber", 16),
    col("CUSTOMER", "customerName", 24),
    col("TOTAL", "totalPrice", 10),
    col("STATUS", "status", 11),
    col("CREATED", "createdAt", 10),
];
const USER_COLUMNS: &[Column] = &[
    col("NAME", "name", 24),
    col("EMAIL", "email", 30),
    col("ROLE", "role", 9),
    col("CREATED", "createdAt", 10),
];
const REQUEST_COLUMNS: &[Column] = &[
    col("CUSTOMER", "name", 24),
    col("FURNITURE", "furnitureType", 18),
    col("STATUS", "status", 11),
    col("CREATED", "createdAt", 10),
];
const POST_COLUMNS: &[Column] = &[
    col("TITLE", "title", 36),
    col("STATUS", "status", 10),
    col("PUBLISHED", "publishedAt", 10),
];
const CATALOG_COLUMNS: &[Column] = &[
    col("NAME", "name", 30),
    col("PRICE", "price", 10),
    col("CATEGORY", "category", 18),
];

const PRODUCT_FILTERS: &[FilterSpec] = &[
    FilterSpec { key: "status", values: PRODUCT_STATUS },
    FilterSpec { key: "category", values: &[] },
];
const CATALOG_FILTERS: &[FilterSpec] = &[FilterSpec { key: "category", values: &[] }];
const ORDER_FILTERS: &[FilterSpec] = &[FilterSpec { key: "status", values: ORDER_STATUS }];
const USER_FILTERS: &[FilterSpec] = &[FilterSpec { key: "role", values: USER_ROLE }];
const REQUEST_FILTERS: &[FilterSpec] = &[FilterSpec { key: "status", values: REQUEST_STATUS }];
const POST_FILTERS: &[FilterSpec] = &[FilterSpec { key: "status", values: POST_STATUS }];

/// Listings managed by the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    Products,
    Categories,
    Orders,
    Users,
    CustomRequests,
    BlogPosts,
    /// Public storefront product listing.
    Catalog,
}

impl ResourceKind {
    /// All listings, in admin tab order followed by the storefront.
    pub const ALL: [Self; 7] = [
        Self::Products,
        Self::Categories,
        Self::Orders,
        Self::Users,
        Self::CustomRequests,
        Self::BlogPosts,
        Self::Catalog,
    ];

    /// Human-readable plural label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Products => "Products",
            Self::Categories => "Categories",
            Self::Orders => "Orders",
            Self::Users => "Users",
            Self::CustomRequests => "Custom Requests",
            Self::BlogPosts => "Blog Posts",
            Self::Catalog => "Catalog",
        }
    }

    /// Kebab-case identifier, as used on the command line and in config.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::Categories => "categories",
            Self::Orders => "orders",
            Self::Users => "users",
            Self::CustomRequests => "custom-requests",
            Self::BlogPosts => "blog-posts",
            Self::Catalog => "catalog",
        }
    }

    /// List endpoint; single-record endpoints are `{endpoint}/{id}`.
    #[must_use]
    pub const fn endpoint(self) -> &'static str {
        match self {
            Self::Products | Self::Catalog => "/products",
            Self::Categories => "/categories",
            Self::Orders => "/orders",
            Self::Users => "/users",
            Self::CustomRequests => "/custom-requests",
            Self::BlogPosts => "/blog",
        }
    }

    /// Whether list and read calls need the bearer credential.
    #[must_use]
    pub const fn requires_auth(self) -> bool {
        !matches!(self, Self::Catalog)
    }

    /// Whether rows can be edited or deleted from this listing.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        !matches!(self, Self::Catalog)
    }

    /// Whether rows carry a wishlist toggle.
    #[must_use]
    pub const fn has_wishlist(self) -> bool {
        matches!(self, Self::Catalog)
    }

    /// Envelope keys that may hold the item collection, most specific first.
    #[must_use]
    pub const fn collection_keys(self) -> &'static [&'static str] {
        match self {
            Self::Products | Self::Catalog => &["products"],
            Self::Categories => &["categories"],
            Self::Orders => &["orders"],
            Self::Users => &["users"],
            Self::CustomRequests => &["customRequests", "requests"],
            Self::BlogPosts => &["posts", "blogPosts", "blogs"],
        }
    }

    /// Fields the listing can be sorted by.
    #[must_use]
    pub const fn sort_fields(self) -> &'static [&'static str] {
        match self {
            Self::Products => &["createdAt", "name", "price", "stock"],
            Self::Categories => &["createdAt", "name"],
            Self::Orders => &["createdAt", "totalPrice", "status"],
            Self::Users => &["createdAt", "name", "email"],
            Self::CustomRequests => &["createdAt", "status"],
            Self::BlogPosts => &["createdAt", "title", "publishedAt"],
            Self::Catalog => &["createdAt", "price", "name"],
        }
    }

    /// Default sort field.
    #[must_use]
    pub const fn default_sort(self) -> &'static str {
        "createdAt"
    }

    /// Discrete filters exposed by the listing.
    #[must_use]
    pub const fn filters(self) -> &'static [FilterSpec] {
        match self {
            Self::Products => PRODUCT_FILTERS,
            Self::Categories => &[],
            Self::Orders => ORDER_FILTERS,
            Self::Users => USER_FILTERS,
            Self::CustomRequests => REQUEST_FILTERS,
            Self::BlogPosts => POST_FILTERS,
            Self::Catalog => CATALOG_FILTERS,
        }
    }

    /// Looks up a discrete filter by query key.
    #[must_use]
    pub fn filter(self, key: &str) -> Option<&'static FilterSpec> {
        self.filters().iter().find(|f| f.key == key)
    }

    /// Table columns. The first column is the row title.
    #[must_use]
    pub const fn columns(self) -> &'static [Column] {
        match self {
            Self::Products => PRODUCT_COLUMNS,
            Self::Categories => CATEGORY_COLUMNS,
            Self::Orders => ORDER_COLUMNS,
            Self::Users => USER_COLUMNS,
            Self::CustomRequests => REQUEST_COLUMNS,
            Self::BlogPosts => POST_COLUMNS,
            Self::Catalog => CATALOG_COLUMNS,
        }
    }

    /// Form fields that must be non-empty before a create or update is sent.
    #[must_use]
    pub const fn required_fields(self) -> &'static [&'static str] {
        match self {
            Self::Products => &["name", "price", "category"],
            Self::Categories => &["name"],
            Self::Orders | Self::CustomRequests => &["status"],
            Self::Users => &["name", "email", "role"],
            Self::BlogPosts => &["title", "content"],
            Self::Catalog => &[],
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|kind| kind.slug() == normalized)
            .or(match normalized.as_str() {
                "blog" | "posts" => Some(Self::BlogPosts),
                "requests" => Some(Self::CustomRequests),
                "shop" | "storefront" => Some(Self::Catalog),
                _ => None,
            })
            .ok_or_else(|| format!("unknown resource '{s}'"))
    }
}

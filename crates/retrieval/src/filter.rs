//! Filter compiler.
//!
//! Turns typed structured constraints into the search backend's native
//! filter expression string. Constraints combine with logical AND only;
//! there is no OR, grouping, or negation. Compilation is deterministic:
//! declaration order is preserved in the joined string.

use serde::{Deserialize, Serialize};

/// Comparison operator for one constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparison {
    /// `>=` numeric lower bound
    Gte,
    /// `<=` numeric upper bound
    Lte,
    /// `:` exact match on an identifier field
    Exact,
}

/// Scalar value carried by a constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FilterValue {
    Float(f64),
    Int(i64),
    Text(String),
}

impl FilterValue {
    /// Render the value the way the backend expects it: bare numbers for
    /// comparisons, double-quoted text for exact matches. Floats keep
    /// their trailing `.0` so `4.0` compiles as `4.0`, not `4`.
    fn render(&self) -> String {
        match self {
            Self::Float(v) => format!("{:?}", v),
            Self::Int(v) => v.to_string(),
            Self::Text(s) => format!("\"{}\"", escape_text(s)),
        }
    }
}

/// Escape embedded quotes and backslashes before interpolating a text
/// value into the filter string, so a crafted identifier cannot break out
/// of its quoted position.
fn escape_text(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// A typed predicate over one named field.
///
/// A constraint whose value is absent is omitted entirely at compile
/// time; it never compiles into an empty or null predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    pub field: String,
    pub op: Comparison,
    pub value: Option<FilterValue>,
}

impl Constraint {
    pub fn new(field: impl Into<String>, op: Comparison, value: Option<FilterValue>) -> Self {
        Self {
            field: field.into(),
            op,
            value,
        }
    }

    /// Render this constraint, or `None` when the value is absent.
    fn render(&self) -> Option<String> {
        let value = self.value.as_ref()?;
        Some(match self.op {
            Comparison::Gte => format!("{} >= {}", self.field, value.render()),
            Comparison::Lte => format!("{} <= {}", self.field, value.render()),
            Comparison::Exact => format!("{}: {}", self.field, value.render()),
        })
    }
}

/// Compile a constraint set into a backend filter expression.
///
/// Returns `None` when no constraint survives, distinguishing "no
/// filter" from a filter matching nothing.
pub fn compile(constraints: &[Constraint]) -> Option<String> {
    let parts: Vec<String> = constraints.iter().filter_map(Constraint::render).collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" AND "))
    }
}

/// Constraint profile for the item metadata datastore.
///
/// The field-level contract (operator and quoting per field) is fixed for
/// backend compatibility and reproduced exactly here.
#[derive(Debug, Clone, Default)]
pub struct ItemFilterParams {
    /// Minimum average rating (e.g., 4.0)
    pub min_avg_rating: Option<f64>,

    /// Maximum average rating (e.g., 4.5)
    pub max_avg_rating: Option<f64>,

    /// Minimum number of ratings (e.g., 100)
    pub min_rating_number: Option<i64>,

    /// Maximum price (e.g., 50.00)
    pub max_price: Option<f64>,

    /// Parent ASIN identifier for an exact product match
    pub parent_asin: Option<String>,
}

impl ItemFilterParams {
    /// Constraints in the profile's fixed declaration order.
    pub fn constraints(&self) -> Vec<Constraint> {
        vec![
            Constraint::new(
                "average_rating",
                Comparison::Gte,
                self.min_avg_rating.map(FilterValue::Float),
            ),
            Constraint::new(
                "average_rating",
                Comparison::Lte,
                self.max_avg_rating.map(FilterValue::Float),
            ),
            Constraint::new(
                "rating_number",
                Comparison::Gte,
                self.min_rating_number.map(FilterValue::Int),
            ),
            Constraint::new(
                "price",
                Comparison::Lte,
                self.max_price.map(FilterValue::Float),
            ),
            Constraint::new(
                "parent_asin",
                Comparison::Exact,
                self.parent_asin.clone().map(FilterValue::Text),
            ),
        ]
    }
}

/// Constraint profile for the review metadata datastore.
#[derive(Debug, Clone, Default)]
pub struct ReviewFilterParams {
    /// Minimum rating for the review (e.g., 4.0)
    pub min_rating: Option<f64>,

    /// Maximum rating for the review (e.g., 5.0)
    pub max_rating: Option<f64>,

    /// Minimum number of helpful votes (e.g., 5)
    pub min_helpful_votes: Option<i64>,

    /// Parent ASIN identifier to scope reviews to one product
    pub parent_asin: Option<String>,
}

impl ReviewFilterParams {
    /// Constraints in the profile's fixed declaration order.
    pub fn constraints(&self) -> Vec<Constraint> {
        vec![
            Constraint::new(
                "rating",
                Comparison::Gte,
                self.min_rating.map(FilterValue::Float),
            ),
            Constraint::new(
                "rating",
                Comparison::Lte,
                self.max_rating.map(FilterValue::Float),
            ),
            Constraint::new(
                "helpful_vote",
                Comparison::Gte,
                self.min_helpful_votes.map(FilterValue::Int),
            ),
            Constraint::new(
                "parent_asin",
                Comparison::Exact,
                self.parent_asin.clone().map(FilterValue::Text),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_absent_compiles_to_none() {
        let params = ItemFilterParams::default();
        assert_eq!(compile(&params.constraints()), None);
    }

    #[test]
    fn test_empty_set_compiles_to_none() {
        assert_eq!(compile(&[]), None);
    }

    #[test]
    fn test_item_profile_rating_and_price() {
        let params = ItemFilterParams {
            min_avg_rating: Some(4.0),
            max_price: Some(100.0),
            ..Default::default()
        };

        assert_eq!(
            compile(&params.constraints()).as_deref(),
            Some("average_rating >= 4.0 AND price <= 100.0")
        );
    }

    #[test]
    fn test_parent_asin_exact_match() {
        let params = ItemFilterParams {
            parent_asin: Some("B08L6ZW124".to_string()),
            ..Default::default()
        };

        let filter = compile(&params.constraints()).unwrap();
        assert!(filter.contains("parent_asin: \"B08L6ZW124\""));
    }

    #[test]
    fn test_declaration_order_preserved() {
        let params = ItemFilterParams {
            min_avg_rating: Some(4.0),
            max_avg_rating: Some(4.5),
            min_rating_number: Some(100),
            max_price: Some(50.0),
            parent_asin: Some("B000123456".to_string()),
        };

        assert_eq!(
            compile(&params.constraints()).unwrap(),
            "average_rating >= 4.0 AND average_rating <= 4.5 AND \
             rating_number >= 100 AND price <= 50.0 AND \
             parent_asin: \"B000123456\""
        );
    }

    #[test]
    fn test_review_profile_fields() {
        let params = ReviewFilterParams {
            min_rating: Some(4.0),
            min_helpful_votes: Some(5),
            ..Default::default()
        };

        assert_eq!(
            compile(&params.constraints()).unwrap(),
            "rating >= 4.0 AND helpful_vote >= 5"
        );
    }

    #[test]
    fn test_float_keeps_decimal_point() {
        let constraints = [Constraint::new(
            "price",
            Comparison::Lte,
            Some(FilterValue::Float(100.0)),
        )];
        assert_eq!(compile(&constraints).as_deref(), Some("price <= 100.0"));
    }

    #[test]
    fn test_text_value_escaping() {
        let constraints = [Constraint::new(
            "parent_asin",
            Comparison::Exact,
            Some(FilterValue::Text("B\" AND price <= 0".to_string())),
        )];

        let filter = compile(&constraints).unwrap();
        assert_eq!(filter, "parent_asin: \"B\\\" AND price <= 0\"");
    }

    #[test]
    fn test_absent_values_skipped_in_middle() {
        let params = ItemFilterParams {
            min_avg_rating: Some(3.5),
            parent_asin: Some("B0TEST0000".to_string()),
            ..Default::default()
        };

        assert_eq!(
            compile(&params.constraints()).unwrap(),
            "average_rating >= 3.5 AND parent_asin: \"B0TEST0000\""
        );
    }
}

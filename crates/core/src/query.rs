//! OData query construction
//!
//! Pure functions that render structured filter/select/expand inputs into
//! OData v2 query syntax, and assemble [`QueryOptions`] into a query string.
//!
//! Filter string literals are single-quoted verbatim. Embedded quotes are not
//! escaped, so callers must not pass untrusted values containing `'`.

use riskview_domain::{ExpandRelation, FilterCondition, LogicalOperator, QueryOptions};

/// Render a single condition: `field op value`, or `op(field,value)` for the
/// string functions.
pub fn render_condition(condition: &FilterCondition) -> String {
    if condition.operator.is_function() {
        format!("{}({},{})", condition.operator, condition.field, condition.value)
    } else {
        format!("{} {} {}", condition.field, condition.operator, condition.value)
    }
}

/// Join conditions with `and`/`or`. Empty input renders `""`.
pub fn build_filter(conditions: &[FilterCondition], operator: LogicalOperator) -> String {
    let separator = format!(" {operator} ");
    conditions.iter().map(render_condition).collect::<Vec<_>>().join(&separator)
}

/// Join already-rendered clauses, skipping empty ones.
pub fn build_raw_filter<S: AsRef<str>>(clauses: &[S], operator: LogicalOperator) -> String {
    let separator = format!(" {operator} ");
    clauses
        .iter()
        .map(AsRef::as_ref)
        .filter(|clause| !clause.is_empty())
        .collect::<Vec<_>>()
        .join(&separator)
}

/// Comma-joined `$select` list.
pub fn build_select<S: AsRef<str>>(fields: &[S]) -> String {
    fields.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(",")
}

/// `$expand` list; relations with a nested select render as
/// `Name($select=a,b)`.
pub fn build_expand(relations: &[ExpandRelation]) -> String {
    relations
        .iter()
        .map(|relation| {
            if relation.select.is_empty() {
                relation.name.clone()
            } else {
                format!("{}($select={})", relation.name, build_select(&relation.select))
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Parenthesized disjunction `(field eq 'a' or field eq 'b')`. Empty input
/// renders `""` so the group can be dropped by [`build_raw_filter`].
pub fn build_multi_value_filter<S: AsRef<str>>(field: &str, values: &[S]) -> String {
    if values.is_empty() {
        return String::new();
    }

    let conditions: Vec<FilterCondition> =
        values.iter().map(|value| FilterCondition::eq(field, value.as_ref())).collect();

    format!("({})", build_filter(&conditions, LogicalOperator::Or))
}

/// Human-readable query string, `?$filter=...&$top=1`, values unencoded.
/// Returns `""` when no option is set.
pub fn build_query_string(options: &QueryOptions) -> String {
    render_pairs(options, |value| value.to_string())
}

/// Rendering of [`QueryOptions`] into query strings.
pub trait QueryStringExt {
    /// Same as [`build_query_string`].
    fn to_query_string(&self) -> String;

    /// Wire form: identical key order, each value percent-encoded.
    fn to_encoded_query(&self) -> String;
}

impl QueryStringExt for QueryOptions {
    fn to_query_string(&self) -> String {
        build_query_string(self)
    }

    fn to_encoded_query(&self) -> String {
        render_pairs(self, |value| urlencoding::encode(value).into_owned())
    }
}

fn render_pairs(options: &QueryOptions, encode: impl Fn(&str) -> String) -> String {
    let mut pairs: Vec<(&str, String)> = Vec::new();

    let text_options = [
        ("$filter", &options.filter),
        ("$select", &options.select),
        ("$expand", &options.expand),
        ("$orderby", &options.orderby),
    ];
    for (key, value) in text_options {
        if let Some(value) = value.as_deref().filter(|value| !value.is_empty()) {
            pairs.push((key, encode(value)));
        }
    }

    if let Some(top) = options.top {
        pairs.push(("$top", top.to_string()));
    }
    if let Some(skip) = options.skip {
        pairs.push(("$skip", skip.to_string()));
    }
    if options.count == Some(true) {
        pairs.push(("$count", "true".to_string()));
    }

    if pairs.is_empty() {
        return String::new();
    }

    let joined = pairs
        .into_iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");
    format!("?{joined}")
}

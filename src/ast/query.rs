use crate::ast::{Filter, Selector};

/// Top of the syntax tree. Holds exactly one query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Root {
    pub query: Query,
}

/// A query: filters applied left to right.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// Pipeline stages, in execution order
    pub filters: Vec<Filter>,
}

impl Query {
    /// Canonical surface syntax for the query.
    ///
    /// Whitespace is dropped and string literals keep the quotes they were
    /// written with.
    pub fn to_query_string(&self) -> String {
        let mut out = String::new();
        for filter in &self.filters {
            match filter {
                Filter::Identity => out.push('.'),
                Filter::Selector(selector) => {
                    out.push('[');
                    match selector {
                        Selector::Iterator => {}
                        Selector::String(s) => out.push_str(s.raw()),
                        Selector::Integer(i) => out.push_str(i.raw()),
                        Selector::Span(span) => {
                            if let Some(left) = &span.left {
                                out.push_str(left.raw());
                            }
                            out.push(':');
                            if let Some(right) = &span.right {
                                out.push_str(right.raw());
                            }
                        }
                    }
                    out.push(']');
                }
            }
        }
        out
    }
}

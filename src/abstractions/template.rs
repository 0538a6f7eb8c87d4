//! URI template expansion.
//!
//! Graph URL templates use a small subset of RFC 6570: simple string
//! expansion (`{group%2Did}`), reserved expansion (`{+baseurl}`), and
//! form-style query expansion (`{?%24select,%24top}` / `{&...}`).
//! Variable names are matched verbatim, including their percent-encoding.

use crate::error::{GraphError, Result};

/// A value bound to a template variable.
#[derive(Debug, Clone, Copy)]
pub enum TemplateValue<'a> {
    Str(&'a str),
    List(&'a [String]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Simple,
    Reserved,
    Query,
    Continuation,
}

/// Expand `template`, resolving each variable through `lookup`.
///
/// Path variables (simple and reserved expansions) must resolve; query
/// variables that do not resolve are omitted, and a query expression with no
/// resolved variables produces nothing.
pub fn expand<'v, F>(template: &str, lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<TemplateValue<'v>>,
{
    let mut out = String::with_capacity(template.len() + 32);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let close = after.find('}').ok_or_else(|| GraphError::InvalidTemplate {
            template: template.to_string(),
            reason: "unterminated expression".to_string(),
        })?;
        expand_expression(template, &after[..close], &lookup, &mut out)?;
        rest = &after[close + 1..];
    }
    if rest.contains('}') {
        return Err(GraphError::InvalidTemplate {
            template: template.to_string(),
            reason: "unmatched '}'".to_string(),
        });
    }
    out.push_str(rest);
    Ok(out)
}

fn expand_expression<'v, F>(
    template: &str,
    expression: &str,
    lookup: &F,
    out: &mut String,
) -> Result<()>
where
    F: Fn(&str) -> Option<TemplateValue<'v>>,
{
    let (operator, names) = match expression.chars().next() {
        Some('+') => (Operator::Reserved, &expression[1..]),
        Some('?') => (Operator::Query, &expression[1..]),
        Some('&') => (Operator::Continuation, &expression[1..]),
        Some(_) => (Operator::Simple, expression),
        None => {
            return Err(GraphError::InvalidTemplate {
                template: template.to_string(),
                reason: "empty expression".to_string(),
            })
        }
    };

    match operator {
        Operator::Simple | Operator::Reserved => {
            let mut first = true;
            for name in names.split(',') {
                let value = lookup(name).and_then(non_empty).ok_or_else(|| {
                    GraphError::MissingPathParameter {
                        name: name.to_string(),
                        template: template.to_string(),
                    }
                })?;
                if !first {
                    out.push(',');
                }
                first = false;
                push_value(value, operator == Operator::Reserved, out);
            }
        }
        Operator::Query | Operator::Continuation => {
            let mut separator = if operator == Operator::Query { '?' } else { '&' };
            for name in names.split(',') {
                let Some(value) = lookup(name).and_then(non_empty) else {
                    continue;
                };
                out.push(separator);
                separator = '&';
                out.push_str(name);
                out.push('=');
                push_value(value, false, out);
            }
        }
    }
    Ok(())
}

fn non_empty(value: TemplateValue<'_>) -> Option<TemplateValue<'_>> {
    match value {
        TemplateValue::List(items) if items.is_empty() => None,
        other => Some(other),
    }
}

fn push_value(value: TemplateValue<'_>, reserved: bool, out: &mut String) {
    let encode = |s: &str, out: &mut String| {
        if reserved {
            out.push_str(&encode_reserved(s));
        } else {
            out.push_str(&urlencoding::encode(s));
        }
    };
    match value {
        TemplateValue::Str(s) => encode(s, out),
        TemplateValue::List(items) => {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                encode(item, out);
            }
        }
    }
}

/// Percent-encode everything outside the unreserved and reserved sets.
fn encode_reserved(s: &str) -> String {
    const RESERVED: &str = ":/?#[]@!$&'()*+,;=%";
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c.is_ascii_alphanumeric() || "-._~".contains(c) || RESERVED.contains(c) {
            out.push(c);
        } else {
            let mut buf = [0u8; 4];
            for byte in c.encode_utf8(&mut buf).bytes() {
                out.push_str(&format!("%{byte:02X}"));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn strs(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_expand_path_template() {
        let params = strs(&[
            ("baseurl", "https://graph.microsoft.com/v1.0"),
            ("group%2Did", "g1"),
            ("event%2Did", "e1"),
        ]);
        let uri = expand(
            "{+baseurl}/groups/{group%2Did}/events/{event%2Did}{?%24expand,%24select}",
            |name| params.get(name).map(|v| TemplateValue::Str(v)),
        )
        .unwrap();
        assert_eq!(uri, "https://graph.microsoft.com/v1.0/groups/g1/events/e1");
    }

    #[test]
    fn test_simple_expansion_encodes_reserved_characters() {
        let params = strs(&[("baseurl", "http://localhost"), ("user%2Did", "a b/c@d")]);
        let uri = expand("{+baseurl}/users/{user%2Did}", |name| {
            params.get(name).map(|v| TemplateValue::Str(v))
        })
        .unwrap();
        assert_eq!(uri, "http://localhost/users/a%20b%2Fc%40d");
    }

    #[test]
    fn test_query_expansion_joins_lists_and_skips_missing() {
        let select = vec!["id".to_string(), "displayName".to_string()];
        let uri = expand("/groups{?%24filter,%24select,%24top}", |name| match name {
            "%24select" => Some(TemplateValue::List(&select)),
            "%24top" => Some(TemplateValue::Str("5")),
            _ => None,
        })
        .unwrap();
        assert_eq!(uri, "/groups?%24select=id,displayName&%24top=5");
    }

    #[test]
    fn test_query_expansion_encodes_filter_values() {
        let uri = expand("/groups{?%24filter}", |name| match name {
            "%24filter" => Some(TemplateValue::Str("displayName eq 'x'")),
            _ => None,
        })
        .unwrap();
        assert_eq!(uri, "/groups?%24filter=displayName%20eq%20%27x%27");
    }

    #[test]
    fn test_empty_query_expansion_emits_nothing() {
        let empty: Vec<String> = vec![];
        let uri = expand("/groups/$count{?%24filter,%24search}", |name| match name {
            "%24search" => Some(TemplateValue::List(&empty)),
            _ => None,
        })
        .unwrap();
        assert_eq!(uri, "/groups/$count");
    }

    #[test]
    fn test_missing_path_parameter_is_an_error() {
        let err = expand("{+baseurl}/groups/{group%2Did}", |name| match name {
            "baseurl" => Some(TemplateValue::Str("http://localhost")),
            _ => None,
        })
        .unwrap_err();
        assert!(matches!(err, GraphError::MissingPathParameter { ref name, .. } if name == "group%2Did"));
    }

    #[test]
    fn test_function_call_template() {
        let uri = expand(
            "{+baseurl}/reports/getEmailActivityCounts(period='{period}')",
            |name| match name {
                "baseurl" => Some(TemplateValue::Str("https://graph.microsoft.com/v1.0")),
                "period" => Some(TemplateValue::Str("D7")),
                _ => None,
            },
        )
        .unwrap();
        assert_eq!(
            uri,
            "https://graph.microsoft.com/v1.0/reports/getEmailActivityCounts(period='D7')"
        );
    }

    #[test]
    fn test_unterminated_expression() {
        let result = expand("{+baseurl/groups", |_| None);
        assert!(matches!(result, Err(GraphError::InvalidTemplate { .. })));
    }
}

//! Printf-style statement preparation.
//!
//! This is the inline-literal compatibility path: the template's `%s`/`%d`/`%f`
//! placeholders are substituted with rendered argument text so the result is a
//! complete SQL string. It exists for callers that build literal SQL; it is NOT
//! an injection-safe binding mechanism. The safe path is the pipeline protocol's
//! typed parameter binding in [`crate::pipeline`].

use crate::types::RowValues;

/// Wrap a rendered value in single quotes.
///
/// Escaping is deliberately minimal (quote wrapping only) to mirror the behavior
/// of the literal-SQL compatibility contract; embedded quotes pass through.
fn quote_literal(text: &str) -> String {
    format!("'{text}'")
}

/// Render a value the way it appears when substituted for a placeholder.
fn render_inline(value: &RowValues) -> String {
    match value {
        RowValues::Null => "NULL".to_string(),
        RowValues::Bool(b) => if *b { "1" } else { "0" }.to_string(),
        RowValues::Int(i) => i.to_string(),
        RowValues::Float(f) => format!("{f:.6}"),
        RowValues::List(items) => items
            .iter()
            .map(|item| quote_literal(&render_bare(item)))
            .collect::<Vec<_>>()
            .join(","),
        RowValues::Text(s) => quote_literal(s),
    }
}

/// Render a value without quoting, for list elements that get quoted by the caller.
fn render_bare(value: &RowValues) -> String {
    match value {
        RowValues::Null => "NULL".to_string(),
        RowValues::Bool(b) => if *b { "1" } else { "0" }.to_string(),
        RowValues::Int(i) => i.to_string(),
        RowValues::Float(f) => format!("{f:.6}"),
        RowValues::Text(s) => s.clone(),
        RowValues::List(items) => items
            .iter()
            .map(render_bare)
            .collect::<Vec<_>>()
            .join(","),
    }
}

/// Substitute printf-style placeholders in `template` with `args`.
///
/// Recognized specifiers are `%s`, `%d` and `%f`, each consuming one positional
/// argument; `%%` emits a literal `%` and the text that follows it stays verbatim.
/// An unrecognized specifier character is emitted verbatim with its leading `%`,
/// and so is a recognized specifier once the arguments run out (under-flow is
/// tolerated, never an error).
///
/// As a convenience, a single [`RowValues::List`] argument is unpacked into the
/// positional argument list.
///
/// Rendering: `Null` becomes `NULL`, booleans become `1`/`0`, integers render in
/// decimal, floats in fixed notation with six decimal places, lists as
/// comma-joined quoted elements, and text is wrapped in single quotes.
///
/// ```rust
/// use pipeline_middleware::prelude::*;
///
/// let sql = prepare_statement("WHERE id=%d AND name=%s", &[RowValues::Int(5), RowValues::Text("ann".into())]);
/// assert_eq!(sql, "WHERE id=5 AND name='ann'");
/// ```
#[must_use]
pub fn prepare_statement(template: &str, args: &[RowValues]) -> String {
    if !template.contains('%') {
        return template.to_string();
    }

    let unpacked: &[RowValues] = match args {
        [RowValues::List(inner)] => inner,
        other => other,
    };
    let rendered: Vec<String> = unpacked.iter().map(render_inline).collect();

    let mut parts = template.split('%');
    let mut out = parts.next().unwrap_or("").to_string();
    let mut arg_position = 0;

    while let Some(part) = parts.next() {
        if part.is_empty() {
            // "%%": emit one percent; the next segment is literal text, not a
            // specifier.
            out.push('%');
            if let Some(literal) = parts.next() {
                out.push_str(literal);
            }
            continue;
        }

        let spec = part.chars().next().unwrap_or_default();
        let rest = &part[spec.len_utf8()..];

        match spec {
            's' | 'd' | 'f' if arg_position < rendered.len() => {
                out.push_str(&rendered[arg_position]);
                out.push_str(rest);
                arg_position += 1;
            }
            _ => {
                // Unknown specifier, or a recognized one with no argument left.
                out.push('%');
                out.push_str(part);
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_recognized_specifiers() {
        let sql = prepare_statement(
            "WHERE id=%d AND name=%s",
            &[RowValues::Int(5), RowValues::Text("ann".into())],
        );
        assert_eq!(sql, "WHERE id=5 AND name='ann'");
    }

    #[test]
    fn empty_args_leaves_template_unchanged() {
        assert_eq!(
            prepare_statement("SELECT * FROM t WHERE id = 1", &[]),
            "SELECT * FROM t WHERE id = 1"
        );
    }

    #[test]
    fn double_percent_is_a_literal_percent() {
        assert_eq!(prepare_statement("100%% done", &[]), "100% done");
        // Text after %% is literal even when it looks like a specifier.
        assert_eq!(
            prepare_statement("LIKE '%%s' OR id=%d", &[RowValues::Int(3)]),
            "LIKE '%s' OR id=3"
        );
    }

    #[test]
    fn underflow_emits_specifier_verbatim() {
        assert_eq!(
            prepare_statement("a=%d AND b=%s", &[RowValues::Int(1)]),
            "a=1 AND b=%s"
        );
    }

    #[test]
    fn unknown_specifier_is_verbatim() {
        assert_eq!(
            prepare_statement("rate > %x AND id=%d", &[RowValues::Int(9)]),
            "rate > %x AND id=9"
        );
    }

    #[test]
    fn renders_null_bool_float() {
        let sql = prepare_statement(
            "(%s, %s, %f)",
            &[
                RowValues::Null,
                RowValues::Bool(true),
                RowValues::Float(2.5),
            ],
        );
        assert_eq!(sql, "(NULL, 1, 2.500000)");
    }

    #[test]
    fn single_list_argument_is_unpacked() {
        let sql = prepare_statement(
            "id=%d AND name=%s",
            &[RowValues::List(vec![
                RowValues::Int(7),
                RowValues::Text("bob".into()),
            ])],
        );
        assert_eq!(sql, "id=7 AND name='bob'");
    }

    #[test]
    fn list_renders_comma_joined_quoted_elements() {
        let sql = prepare_statement(
            "id IN (%s)",
            &[RowValues::List(vec![RowValues::List(vec![
                RowValues::Int(1),
                RowValues::Int(2),
                RowValues::Text("x".into()),
            ])])],
        );
        assert_eq!(sql, "id IN ('1','2','x')");
    }
}

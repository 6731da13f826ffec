//! Go backend: `package g2error`

use super::{Banner, Row};
use crate::category::{sort_identifiers, CategoryTag};

const RULE: &str =
    "// ----------------------------------------------------------------------------";

pub(super) fn render(banner: &Banner, rows: &[Row<'_>]) -> String {
    let mut out = String::with_capacity(4096 + rows.len() * 96);

    for line in banner.lines() {
        out.push_str(&format!("// {}\n", line));
    }
    out.push_str("\npackage g2error\n\n");

    section(&mut out, &["Types"]);
    out.push_str("type G2ErrorTypeIds int\n\n");

    section(
        &mut out,
        &[
            "\"Category\" errors",
            "One of these errors must be the last in each G2ErrorTypes value list.",
        ],
    );
    for name in struct_names(CategoryTag::categories()) {
        out.push_str(&format!(
            "type {} struct {{\n\terror\n\tG2ErrorTypeIds []G2ErrorTypeIds\n}}\n",
            name
        ));
    }
    out.push('\n');

    section(&mut out, &["Detail errors"]);
    for name in struct_names(CategoryTag::details()) {
        out.push_str(&format!("type {} struct{{ error }}\n", name));
    }
    out.push('\n');

    section(&mut out, &["Constants"]);
    out.push_str("const (\n");
    for (i, tag) in CategoryTag::ALL.iter().enumerate() {
        if i == 0 {
            out.push_str(&format!("\t{} G2ErrorTypeIds = iota\n", tag.go_ident()));
        } else {
            out.push_str(&format!("\t{}\n", tag.go_ident()));
        }
    }
    out.push_str(")\n\n");

    section(&mut out, &["Variables"]);
    out.push_str("// Message templates for g2engine implementations.\n");
    out.push_str("// Note: The lists of G2ErrorTypeIds are from innermost error to outer most error.\n");
    out.push_str("// Example:  #10 is G2RetryableError{G2RetryTimeoutExceededError{errors.New(message)}}\n");
    out.push_str("var G2ErrorTypes = map[int][]G2ErrorTypeIds{\n");

    for row in rows {
        out.push_str(&line(row));
        out.push('\n');
    }

    out.push_str("}\n\n");
    out.push_str("// A list of all G2ErrorTypeIds.\n");
    out.push_str("var AllG2ErrorTypes = []G2ErrorTypeIds{\n");
    for tag in CategoryTag::FOOTER_ORDER {
        out.push_str(&format!("\t{},\n", tag.go_ident()));
    }
    out.push_str("}\n");

    out
}

/// `\t<code>: {<tags>},` with an optional `// ` comment
fn line(row: &Row<'_>) -> String {
    let mut line = format!("\t{}: {{{}}},", row.entry.code, row.tags);
    if let Some(comment) = row.entry.trailing_comment() {
        line.push_str(" // ");
        line.push_str(&comment);
    }
    line
}

fn section(out: &mut String, titles: &[&str]) {
    out.push_str(RULE);
    out.push('\n');
    for title in titles {
        out.push_str(&format!("// {}\n", title));
    }
    out.push_str(RULE);
    out.push_str("\n\n");
}

fn struct_names(tags: impl Iterator<Item = CategoryTag>) -> Vec<String> {
    let mut names: Vec<String> = tags.map(CategoryTag::go_struct).collect();
    sort_identifiers(&mut names);
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::{Backend, RenderOptions};
    use crate::table::{ErrorEntry, ErrorTable};

    fn render_entries(entries: Vec<ErrorEntry>) -> String {
        Backend::Go
            .render(&ErrorTable::new(entries), &RenderOptions::reproducible())
            .unwrap()
    }

    #[test]
    fn test_declarations() {
        let go = render_entries(vec![]);

        assert!(go.contains("\npackage g2error\n"));
        assert!(go.contains("type G2ErrorTypeIds int\n"));
        assert!(go.contains(
            "type G2BaseError struct {\n\terror\n\tG2ErrorTypeIds []G2ErrorTypeIds\n}\n"
        ));
        assert!(go.contains("type G2NotFoundError struct{ error }\n"));
        assert!(go.contains("\tG2Base G2ErrorTypeIds = iota\n\tG2BadInput\n"));

        let category_order: Vec<usize> = [
            "type G2BadInputError ",
            "type G2BaseError ",
            "type G2ConfigurationError ",
            "type G2RetryableError ",
            "type G2UnrecoverableError ",
            "type G2DatabaseConnectionLostError ",
            "type G2DatabaseError ",
            "type G2LicenseError ",
        ]
        .iter()
        .map(|needle| go.find(needle).unwrap())
        .collect();
        let mut sorted = category_order.clone();
        sorted.sort_unstable();
        assert_eq!(category_order, sorted);
    }

    #[test]
    fn test_each_constant_declared_once() {
        let go = render_entries(vec![]);
        let constants = go
            .split("const (\n")
            .nth(1)
            .and_then(|rest| rest.split(")\n").next())
            .unwrap();
        assert_eq!(constants.lines().count(), CategoryTag::ALL.len());
    }

    #[test]
    fn test_multiline_comment_stays_on_one_line() {
        let go = render_entries(vec![ErrorEntry::new(5, Some("G2LicenseError"))
            .with_name("LIC")
            .with_comment("expired\nrenew it")]);
        assert!(go.contains("\t5: {G2License, G2Unrecoverable}, // LIC - expired renew it\n"));
    }
}

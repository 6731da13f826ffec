//! Python backend: the `g2errors` module

use super::{Banner, Row};
use crate::category::{sort_identifiers, CategoryTag};

const RULE: &str =
    "# -----------------------------------------------------------------------------";

/// Module-level list of every tag identifier, in footer order
const ALL_TYPES_NAME: &str = "ALL_G2_ERROR_TYPES";

const IMPORTS: &str = "\
import datetime
import json
import threading
import traceback
from ctypes import c_char, create_string_buffer, sizeof
from typing import Any, Callable, Dict
";

pub(super) fn render(banner: &Banner, rows: &[Row<'_>]) -> String {
    let mut out = String::with_capacity(8192 + rows.len() * 96);

    out.push_str("#! /usr/bin/env python3\n\"\"\"\n");
    for line in banner.lines() {
        out.push_str(line);
        out.push('\n');
    }
    out.push_str("\"\"\"\n\n");
    out.push_str(IMPORTS);

    out.push_str("\n# Metadata\n\n__all__ = [\n");
    for name in exported_names() {
        out.push_str(&format!("    \"{}\",\n", name));
    }
    out.push_str("]\n");
    out.push_str("__version__ = \"0.0.1\"  # See https://www.python.org/dev/peps/pep-0396/\n");
    out.push_str("__date__ = \"2023-10-30\"\n");
    out.push_str("__updated__ = \"2023-10-30\"\n");

    section(&mut out, &["Base G2Error"]);
    class(&mut out, CategoryTag::Base, "Exception");

    section(
        &mut out,
        &[
            "Category exceptions",
            "- These exceptions represent categories of actions that can be taken by",
            "  the calling program.",
        ],
    );
    let base = CategoryTag::Base.python_class();
    for category in CategoryTag::categories().filter(|t| *t != CategoryTag::Base) {
        class(&mut out, category, &base);
    }

    for category in CategoryTag::categories() {
        let details: Vec<CategoryTag> = CategoryTag::details_of(category).collect();
        if details.is_empty() {
            continue;
        }

        let title = format!("Detail exceptions for {}", category.python_class());
        let mut titles = vec![title.as_str()];
        titles.extend(detail_notes(category));
        section(&mut out, &titles);

        let parent = category.python_class();
        for detail in details {
            class(&mut out, detail, &parent);
        }
    }

    section(
        &mut out,
        &[
            "Determine Exception based on Senzing reason code.",
            "Reference: https://senzing.zendesk.com/hc/en-us/articles/360026678133-Engine-Error-codes",
        ],
    );
    out.push_str("\nEXCEPTION_MAP = {\n");

    for row in rows {
        out.push_str(&line(row));
        out.push('\n');
    }

    out.push_str("}\n\n");
    out.push_str("# A list of all G2 error type identifiers.\n");
    out.push_str(&format!("{} = [\n", ALL_TYPES_NAME));
    for tag in CategoryTag::FOOTER_ORDER {
        out.push_str(&format!("    \"{}\",\n", tag.go_ident()));
    }
    out.push_str("]\n");
    out.push_str(RUNTIME_HELPERS);

    out
}

/// `    <code>: <Class>,` with an optional `  # ` comment.
///
/// Only the innermost class is emitted; the class hierarchy already carries
/// the enclosing category.
fn line(row: &Row<'_>) -> String {
    let mut line = format!("    {}: {},", row.entry.code, row.tags.innermost().python_class());
    if let Some(comment) = row.entry.trailing_comment() {
        line.push_str("  # ");
        line.push_str(&comment);
    }
    line
}

fn exported_names() -> Vec<String> {
    let mut names: Vec<String> = CategoryTag::ALL
        .iter()
        .map(|tag| tag.python_class())
        .collect();
    names.push(ALL_TYPES_NAME.to_string());
    names.push("new_g2exception".to_string());
    sort_identifiers(&mut names);
    names
}

fn detail_notes(category: CategoryTag) -> Vec<&'static str> {
    match category {
        CategoryTag::BadInput => vec![
            "- Processing did not complete.",
            "- These exceptions are \"per record\" exceptions.",
            "- The record should be recorded as \"bad\".  (logged, queued as failure)",
            "- Processing may continue.",
        ],
        CategoryTag::Retryable => vec![
            "- Processing did not complete.",
            "- These exceptions may be remedied programmatically.",
            "- The call to the Senzing method should be retried.",
            "- Processing may continue.",
        ],
        CategoryTag::Unrecoverable => vec![
            "- Processing did not complete.",
            "- These exceptions cannot be remedied programmatically.",
            "- Processing cannot continue.",
        ],
        _ => Vec::new(),
    }
}

fn section(out: &mut String, titles: &[&str]) {
    out.push_str("\n\n");
    out.push_str(RULE);
    out.push('\n');
    for title in titles {
        out.push_str(&format!("# {}\n", title));
    }
    out.push_str(RULE);
    out.push('\n');
}

fn class(out: &mut String, tag: CategoryTag, parent: &str) {
    out.push_str(&format!(
        "\n\nclass {}({}):\n    \"\"\"{}\"\"\"\n",
        tag.python_class(),
        parent,
        tag.docstring()
    ));
}

const RUNTIME_HELPERS: &str = r#"

# -----------------------------------------------------------------------------
# ErrorBuffer class
# -----------------------------------------------------------------------------


class ErrorBuffer(threading.local):
    """Buffer to call C"""

    # pylint: disable=R0903

    def __init__(self) -> None:
        super().__init__()
        self.string_buffer = create_string_buffer(65535)
        self.string_buffer_size = sizeof(self.string_buffer)


ERROR_BUFFER = ErrorBuffer()
ERROR_BUFFER_TYPE = c_char * 65535


# -----------------------------------------------------------------------------
# Helper functions to create a senzing-specific Exception
# -----------------------------------------------------------------------------


def get_location(caller_skip: int) -> str:
    """
    Determine caller.

    :meta private:
    """
    stack = traceback.format_stack()
    return stack[len(stack) - caller_skip].strip()


def get_message_level(error_id: int) -> str:
    """
    Determine the severity of the error.

    :meta private:
    """
    error_levels = {
        6000: "PANIC",
        5000: "FATAL",
        4000: "ERROR",
        3000: "WARN",
        2000: "INFO",
        1000: "DEBUG",
        0: "TRACE",
    }
    for error_level, error_message in error_levels.items():
        if error_id > error_level:
            return error_message
    return "PANIC"


def get_message_text(error_id: int, id_messages: Dict[int, str], *args: Any) -> str:
    """
    Format the message text from a template and variables.

    :meta private:
    """
    return id_messages.get(error_id, f"No message for index {error_id}.").format(*args)


def get_senzing_error_code(error_text: str) -> int:
    """
    Given an exception string, find the exception code.

    :meta private:
    """
    if len(error_text) == 0:
        return 0
    exception_message_splits = error_text.split("|", 1)
    try:
        result = int(exception_message_splits[0].strip().rstrip("EIW"))
    except ValueError:
        print(f"ERROR: Could not parse error text '{error_text}'")
        result = 9999
    assert isinstance(result, int)
    return result


def get_senzing_error_text(
    get_last_exception: Callable[[ERROR_BUFFER_TYPE, int], str],  # type: ignore
    clear_last_exception: Callable[[], None],
) -> str:
    """
    Get the last exception from the Senzing engine.

    :meta private:
    """
    get_last_exception(
        ERROR_BUFFER.string_buffer,
        sizeof(ERROR_BUFFER.string_buffer),
    )
    clear_last_exception()
    result = ERROR_BUFFER.string_buffer.value.decode()
    assert isinstance(result, str)
    return result


def new_g2exception(
    get_last_exception: Callable[[ERROR_BUFFER_TYPE, int], str],  # type: ignore
    clear_last_exception: Callable[[], None],
    product_id: str,
    error_id: int,
    id_messages: Dict[int, str],
    caller_skip: int,
    *args: Any,
) -> Exception:
    """
    Generate a new Senzing Exception based on the error_id.

    :meta private:
    """

    senzing_error_text = get_senzing_error_text(
        get_last_exception, clear_last_exception
    )
    senzing_error_code = get_senzing_error_code(senzing_error_text)
    message = {
        "time": datetime.datetime.now(datetime.timezone.utc).isoformat("T"),
        "text": get_message_text(error_id, id_messages, *args),
        "level": get_message_level(error_id),
        "id": f"senzing-{product_id}{error_id:4d}",
        "location": get_location(caller_skip),
        "errorCode": senzing_error_code,
        "errorText": senzing_error_text,
        "details": args,
    }
    senzing_error_class = EXCEPTION_MAP.get(senzing_error_code, G2Error)
    return senzing_error_class(json.dumps(message))
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::{Backend, RenderOptions};
    use crate::table::{ErrorEntry, ErrorTable};

    fn render_entries(entries: Vec<ErrorEntry>) -> String {
        Backend::Python
            .render(&ErrorTable::new(entries), &RenderOptions::reproducible())
            .unwrap()
    }

    #[test]
    fn test_hierarchy() {
        let py = render_entries(vec![]);

        assert!(py.contains("class G2Error(Exception):\n    \"\"\"Base exception for G2 related python code.\"\"\"\n"));
        assert!(py.contains("class G2BadInputError(G2Error):\n"));
        assert!(py.contains("class G2UnrecoverableError(G2Error):\n"));
        assert!(py.contains("class G2NotFoundError(G2BadInputError):\n"));
        assert!(py.contains("class G2RetryTimeoutExceededError(G2RetryableError):\n"));
        assert!(py.contains("class G2UnhandledError(G2UnrecoverableError):\n"));
        assert!(py.contains("# Detail exceptions for G2RetryableError\n"));

        // every class defined exactly once, each before first use as a parent
        for tag in CategoryTag::ALL {
            let needle = format!("\nclass {}(", tag.python_class());
            assert_eq!(py.matches(&needle).count(), 1, "{}", tag);
            if let Some(category) = tag.implied_category() {
                let parent = format!("\nclass {}(", category.python_class());
                assert!(py.find(&parent).unwrap() < py.find(&needle).unwrap());
            }
        }
    }

    #[test]
    fn test_license_docstring_is_clean() {
        let py = render_entries(vec![]);
        assert!(py.contains("class G2LicenseError(G2UnrecoverableError):\n    \"\"\"Licence exception\"\"\"\n"));
    }

    #[test]
    fn test_all_exports() {
        let names = exported_names();
        assert_eq!(names.first().map(String::as_str), Some("ALL_G2_ERROR_TYPES"));
        assert_eq!(names.get(1).map(String::as_str), Some("G2BadInputError"));
        assert_eq!(names.last().map(String::as_str), Some("new_g2exception"));
        let retryable = names.iter().position(|n| n == "G2RetryableError").unwrap();
        let timeout = names.iter().position(|n| n == "G2RetryTimeoutExceededError").unwrap();
        assert!(retryable < timeout);
        assert_eq!(names.len(), CategoryTag::ALL.len() + 2);
    }

    #[test]
    fn test_module_metadata() {
        let py = render_entries(vec![]);
        assert!(py.contains("    \"ALL_G2_ERROR_TYPES\",\n    \"G2BadInputError\",\n"));
        assert!(py.contains("\n__date__ = \"2023-10-30\"\n__updated__ = \"2023-10-30\"\n"));
        assert_eq!(py.matches("\nALL_G2_ERROR_TYPES = [\n").count(), 1);
    }

    #[test]
    fn test_map_lines_and_helpers() {
        let py = render_entries(vec![
            ErrorEntry::new(7, Some("G2DatabaseConnectionLostError")).with_comment("lost"),
            ErrorEntry::new(8, Some("G2ConfigurationError")),
        ]);
        assert!(py.contains(
            "EXCEPTION_MAP = {\n    7: G2DatabaseConnectionLostError,  # lost\n    8: G2ConfigurationError,\n}\n"
        ));
        assert!(py.contains("\ndef new_g2exception(\n"));
        assert!(py.contains("EXCEPTION_MAP.get(senzing_error_code, G2Error)"));
        assert!(py.ends_with("return senzing_error_class(json.dumps(message))\n"));
    }
}

//! Splitting of `func` tag signatures.
//!
//! `Page(title string, items []Item)` becomes the routine name `Page`, the
//! typed argument list `title string, items []Item` and the name-only list
//! `title, items`. This is a textual heuristic: a parameter whose type
//! contains a comma (e.g. `m map[string]func(a, b int)`) is split in the
//! wrong place and yields a wrong name-only list instead of an error.

use super::error::SignatureError;

/// The parts of a `func` signature needed to emit both routines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub name: String,
    pub args: String,
    pub arg_names: String,
}

impl Signature {
    pub fn split(raw: &str) -> Result<Self, SignatureError> {
        let open = raw
            .find('(')
            .ok_or_else(|| SignatureError::MissingOpenParen(raw.to_string()))?;
        let name = raw[..open].trim_end_matches(is_space);

        let rest = &raw[open + 1..];
        let close = rest
            .rfind(')')
            .ok_or_else(|| SignatureError::MissingCloseParen(raw.to_string()))?;
        let args = &rest[..close];

        let arg_names = args
            .split(',')
            .map(|arg| {
                let arg = arg.trim_start_matches(is_space);
                match arg.find(is_space) {
                    Some(end) => &arg[..end],
                    None => arg,
                }
            })
            .collect::<Vec<_>>()
            .join(", ");

        Ok(Self {
            name: name.to_string(),
            args: args.to_string(),
            arg_names,
        })
    }
}

fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_simple_signature() {
        let sig = Signature::split("Page(title string, n int)").unwrap();
        assert_eq!(sig.name, "Page");
        assert_eq!(sig.args, "title string, n int");
        assert_eq!(sig.arg_names, "title, n");
    }

    #[test]
    fn split_trims_space_before_paren() {
        let sig = Signature::split("Page \t(title string)").unwrap();
        assert_eq!(sig.name, "Page");
        assert_eq!(sig.args, "title string");
        assert_eq!(sig.arg_names, "title");
    }

    #[test]
    fn split_without_args() {
        let sig = Signature::split("Empty()").unwrap();
        assert_eq!(sig.name, "Empty");
        assert_eq!(sig.args, "");
        assert_eq!(sig.arg_names, "");
    }

    #[test]
    fn split_keeps_composite_types() {
        let sig = Signature::split("List(items []Item, byID map[int]*Item)").unwrap();
        assert_eq!(sig.args, "items []Item, byID map[int]*Item");
        assert_eq!(sig.arg_names, "items, byID");
    }

    #[test]
    fn split_uses_last_close_paren() {
        let sig = Signature::split("Cb(f func() error)").unwrap();
        assert_eq!(sig.args, "f func() error");
        assert_eq!(sig.arg_names, "f");
    }

    #[test]
    fn split_name_count_matches_segment_count() {
        let sig = Signature::split("X(a int,\n\tb string,  c bool)").unwrap();
        assert_eq!(sig.arg_names, "a, b, c");
        assert_eq!(
            sig.args.split(',').count(),
            sig.arg_names.split(", ").count()
        );
    }

    #[test]
    fn split_bare_type_is_taken_as_name() {
        // No validation: a parameter without a name passes its type through.
        let sig = Signature::split("F(int)").unwrap();
        assert_eq!(sig.arg_names, "int");
    }

    #[test]
    fn split_comma_inside_type_is_a_known_limitation() {
        let sig = Signature::split("F(cb func(a, b int))").unwrap();
        assert_eq!(sig.args, "cb func(a, b int)");
        assert_eq!(sig.arg_names, "cb, b");
    }

    #[test]
    fn split_missing_open_paren() {
        let err = Signature::split("Page").unwrap_err();
        assert_eq!(err, SignatureError::MissingOpenParen("Page".into()));
    }

    #[test]
    fn split_missing_close_paren() {
        let err = Signature::split("Page(title string").unwrap_err();
        assert_eq!(
            err,
            SignatureError::MissingCloseParen("Page(title string".into())
        );
    }
}

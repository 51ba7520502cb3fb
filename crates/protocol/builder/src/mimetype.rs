//! Re-derives the mediatype parts the contract expects from a create
//! operation's raw content URI. The detector already validated the URI; this
//! is a narrower re-parse that only needs the `type/subtype` split.

/// Returns `(mimetype, media_type, mime_subtype)`. Any content URI that is not
/// a well-formed `data:<mimetype>[;base64],...` yields three empty strings —
/// the contract accepts an empty mimetype for untyped content.
pub fn parse(content_uri: &str) -> (String, String, String) {
    let Some(rest) = content_uri.strip_prefix("data:") else {
        return (String::new(), String::new(), String::new());
    };
    let Some((meta, _data)) = rest.split_once(',') else {
        return (String::new(), String::new(), String::new());
    };

    let mimetype = meta.strip_suffix(";base64").unwrap_or(meta);
    let type_part = mimetype.split(';').next().unwrap_or_default();

    match type_part.split_once('/') {
        Some((media_type, mime_subtype)) => {
            (mimetype.to_owned(), media_type.to_owned(), mime_subtype.to_owned())
        }
        None => (mimetype.to_owned(), String::new(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_a_typed_mimetype() {
        let (mimetype, media_type, mime_subtype) = parse("data:image/png;base64,aGVsbG8=");
        assert_eq!(mimetype, "image/png");
        assert_eq!(media_type, "image");
        assert_eq!(mime_subtype, "png");
    }

    #[test]
    fn untyped_uri_yields_empty_parts() {
        assert_eq!(parse("data:,hello"), (String::new(), String::new(), String::new()));
    }

    #[test]
    fn non_data_uri_yields_empty_parts() {
        assert_eq!(parse("not a data uri"), (String::new(), String::new(), String::new()));
    }
}

use crate::api::Marker;
use crate::constant::*;

/// A doc comment split into its `@tag` annotations and the remaining free text.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct DocComment {
    pub(crate) markers: Vec<Marker>,
    pub(crate) body: String,
}

fn split_list(payload: &str) -> Vec<String> {
    payload
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_empty(payload: &str) -> Option<String> {
    if payload.is_empty() {
        None
    } else {
        Some(payload.to_string())
    }
}

/// Read the annotations out of a doc comment.
///
/// Recognized, one per line:
///  @argument [description]
///  @option [name[, alias ..]]
///  @rest [description]
///  @values a, b, c
///  @var type
/// Other `@` lines are dropped; everything else is the body.
pub(crate) fn parse(doc: &str) -> DocComment {
    let mut markers = Vec::default();
    let mut body: Vec<&str> = Vec::default();

    for line in doc.lines() {
        let trimmed = line.trim();

        if !trimmed.starts_with('@') {
            body.push(trimmed);
            continue;
        }

        let (tag, payload) = match trimmed.split_once(char::is_whitespace) {
            Some((tag, payload)) => (tag, payload.trim()),
            None => (trimmed, ""),
        };

        match tag {
            ARGUMENT_TAG => markers.push(Marker::Argument {
                description: non_empty(payload),
            }),
            OPTION_TAG => markers.push(Marker::Option {
                names: split_list(payload),
                description: None,
            }),
            REST_TAG => markers.push(Marker::Rest {
                description: non_empty(payload),
            }),
            VALUES_TAG => markers.push(Marker::Values(split_list(payload))),
            TYPE_TAG => {
                if let Some(declared) = payload.split_whitespace().next() {
                    markers.push(Marker::Type(declared.to_string()));
                }
            }
            _ => {
                // Unrelated annotation (ex: `@see`).
            }
        }
    }

    DocComment {
        markers,
        body: body.join("\n").trim().to_string(),
    }
}

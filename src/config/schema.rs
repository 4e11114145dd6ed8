// rizer/src/config/schema.rs
use serde_json::Value;
use std::fmt;

const MODES: [&str; 3] = ["width", "height", "ratio"];

#[derive(Debug, Clone, Copy)]
enum Kind {
    Mode,
    Numbers,
    Text,
    Flag,
}

const FIELDS: [(&str, Kind); 6] = [
    ("mode", Kind::Mode),
    ("levels", Kind::Numbers),
    ("filenamePattern", Kind::Text),
    ("outputFormat", Kind::Text),
    ("outputDirectory", Kind::Text),
    ("allowUpscale", Kind::Flag),
];

/// One schema violation, addressed by JSON pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: String,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.path, self.message)
    }
}

fn violation(path: impl Into<String>, message: impl Into<String>) -> Violation {
    Violation {
        path: path.into(),
        message: message.into(),
    }
}

/// Checks a raw config value, collecting every violation.
pub fn validate(config: &Value) -> Vec<Violation> {
    let object = match config.as_object() {
        Some(object) => object,
        None => return vec![violation("/", "must be object")],
    };

    let mut violations = Vec::new();

    for (key, value) in object {
        let path = format!("/{}", key);
        match FIELDS.iter().find(|(name, _)| *name == key.as_str()) {
            Some((_, kind)) => check_field(&path, *kind, value, &mut violations),
            None => violations.push(violation(
                path,
                "must NOT have additional properties",
            )),
        }
    }

    violations
}

fn check_field(path: &str, kind: Kind, value: &Value, violations: &mut Vec<Violation>) {
    match kind {
        Kind::Mode => match value.as_str() {
            Some(mode) if MODES.contains(&mode) => {}
            Some(_) => violations.push(violation(
                path,
                format!("must be equal to one of the allowed values: {}", MODES.join(", ")),
            )),
            None => violations.push(violation(path, "must be string")),
        },
        Kind::Numbers => match value.as_array() {
            Some(items) => {
                for (i, item) in items.iter().enumerate() {
                    if !item.is_number() {
                        violations.push(violation(format!("{}/{}", path, i), "must be number"));
                    }
                }
            }
            None => violations.push(violation(path, "must be array")),
        },
        Kind::Text => {
            if !value.is_string() {
                violations.push(violation(path, "must be string"));
            }
        }
        Kind::Flag => {
            if !value.is_boolean() {
                violations.push(violation(path, "must be boolean"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_complete_config() {
        let config = json!({
            "mode": "width",
            "levels": [320, 640.5],
            "filenamePattern": "${name}-${suffix}${ext}",
            "outputFormat": "webp",
            "outputDirectory": "out",
            "allowUpscale": true
        });
        assert!(validate(&config).is_empty());
    }

    #[test]
    fn empty_object_is_valid() {
        assert!(validate(&json!({})).is_empty());
    }

    #[test]
    fn reports_every_problem() {
        let config = json!({
            "mode": "diagonal",
            "levels": [1, "2", true],
            "allowUpscale": "yes",
            "outputDirectory": 3,
            "quality": 80
        });
        let messages: Vec<String> = validate(&config).iter().map(ToString::to_string).collect();

        assert_eq!(messages.len(), 6);
        assert!(messages.iter().any(|m| m.starts_with("/mode must be equal to one of")));
        assert!(messages.contains(&"/levels/1 must be number".to_string()));
        assert!(messages.contains(&"/levels/2 must be number".to_string()));
        assert!(messages.contains(&"/allowUpscale must be boolean".to_string()));
        assert!(messages.contains(&"/outputDirectory must be string".to_string()));
        assert!(messages.contains(&"/quality must NOT have additional properties".to_string()));
    }

    #[test]
    fn levels_must_be_an_array() {
        let messages = validate(&json!({ "levels": 0.5 }));
        assert_eq!(messages, vec![violation("/levels", "must be array")]);
    }

    #[test]
    fn root_must_be_object() {
        assert_eq!(validate(&json!([1, 2])), vec![violation("/", "must be object")]);
    }
}

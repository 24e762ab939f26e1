//! Row visibility conditions.
//!
//! Rows carry strings such as `userRole == "Captain" or position == "Manager"`.
//! They are parsed once into a [`Condition`] and evaluated against the
//! selected role and its simulated position on every role change. A part that
//! mentions a field matches when its first quoted value equals the token or
//! when the part text contains it anywhere, so `in [...]` lists and `&&`/`||`
//! chains inside one part still match. Anything the parser does not recognize
//! evaluates to true, so malformed conditions show rows rather than hide them.

use crate::domain::constants::{lookup, ROLE_POSITIONS};

const ROLE_FIELD: &str = "userRole";
const POSITION_FIELD: &str = "position";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    Always,
    Role(Mention),
    Position(Mention),
    Or(Vec<Condition>),
}

/// One condition part that names a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mention {
    pub quoted: Option<String>,
    pub text: String,
}

impl Mention {
    fn new(part: &str) -> Self {
        Self {
            quoted: first_quoted(part).map(str::to_string),
            text: part.to_string(),
        }
    }

    fn matches(&self, token: &str) -> bool {
        self.quoted.as_deref() == Some(token) || self.text.contains(token)
    }
}

impl Condition {
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(text) = raw.map(str::trim).filter(|t| !t.is_empty()) else {
            return Condition::Always;
        };
        let mut parts: Vec<Condition> = split_on_or(text).into_iter().map(parse_part).collect();
        if parts.len() == 1 {
            parts.remove(0)
        } else {
            Condition::Or(parts)
        }
    }

    pub fn evaluate(&self, role: &str, position: &str) -> bool {
        match self {
            Condition::Always => true,
            Condition::Role(m) => m.matches(role),
            Condition::Position(m) => m.matches(position),
            Condition::Or(parts) => parts.iter().any(|p| p.evaluate(role, position)),
        }
    }

    pub fn evaluate_for_role(&self, role: &str) -> bool {
        self.evaluate(role, position_for_role(role))
    }
}

/// Simulated position for a role; unknown roles hold a position of the same name.
pub fn position_for_role(role: &str) -> &str {
    lookup(ROLE_POSITIONS, role).unwrap_or(role)
}

fn split_on_or(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let bytes = text.as_bytes();
    let mut i = 0;
    while i + 2 <= bytes.len() {
        let at_keyword = &bytes[i..i + 2] == b"or"
            && (i == 0 || bytes[i - 1].is_ascii_whitespace())
            && (i + 2 == bytes.len() || bytes[i + 2].is_ascii_whitespace())
            && !inside_quotes(&text[..i]);
        if at_keyword {
            parts.push(text[start..i].trim());
            start = i + 2;
            i += 2;
        } else {
            i += 1;
        }
    }
    parts.push(text[start..].trim());
    parts
}

fn inside_quotes(prefix: &str) -> bool {
    let mut open: Option<char> = None;
    for c in prefix.chars() {
        match open {
            Some(q) if c == q => open = None,
            None if c == '"' || c == '\'' => open = Some(c),
            _ => {}
        }
    }
    open.is_some()
}

fn parse_part(part: &str) -> Condition {
    if part.contains(ROLE_FIELD) {
        Condition::Role(Mention::new(part))
    } else if part.contains(POSITION_FIELD) {
        Condition::Position(Mention::new(part))
    } else {
        Condition::Always
    }
}

fn first_quoted(part: &str) -> Option<&str> {
    let open = part.find(['"', '\''])?;
    let rest = &part[open + 1..];
    let close = rest.find(['"', '\''])?;
    let value = &rest[..close];
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role(part: &str) -> Condition {
        Condition::Role(Mention::new(part))
    }

    fn position(part: &str) -> Condition {
        Condition::Position(Mention::new(part))
    }

    #[test]
    fn ops_manager_matches_through_position() {
        let c = Condition::parse(Some(r#"userRole == "Captain" or position == "Manager""#));
        assert_eq!(
            c,
            Condition::Or(vec![
                role(r#"userRole == "Captain""#),
                position(r#"position == "Manager""#),
            ])
        );
        assert_eq!(position_for_role("Ops Manager"), "Manager");
        assert!(c.evaluate_for_role("Ops Manager"));
        assert!(c.evaluate_for_role("Captain"));
        assert!(!c.evaluate_for_role("Pilot"));
    }

    #[test]
    fn absent_or_blank_condition_is_always_visible() {
        assert_eq!(Condition::parse(None), Condition::Always);
        assert_eq!(Condition::parse(Some("   ")), Condition::Always);
        assert!(Condition::parse(None).evaluate_for_role("Pilot"));
    }

    #[test]
    fn unrecognized_syntax_is_vacuously_true() {
        let c = Condition::parse(Some("department != 'Finance'"));
        assert_eq!(c, Condition::Always);
        assert!(c.evaluate_for_role("Dispatcher"));
    }

    #[test]
    fn or_inside_words_and_quotes_does_not_split() {
        let c = Condition::parse(Some("position == 'Coordinator'"));
        assert_eq!(c, position("position == 'Coordinator'"));

        let c = Condition::parse(Some("userRole == 'Captain or Pilot'"));
        assert_eq!(c, role("userRole == 'Captain or Pilot'"));
        assert!(c.evaluate_for_role("Pilot"));
    }

    #[test]
    fn single_quotes_and_unquoted_operands() {
        let c = Condition::parse(Some("userRole == 'First Officer'"));
        assert!(c.evaluate_for_role("First Officer"));
        assert!(!c.evaluate_for_role("Captain"));

        let c = Condition::parse(Some("userRole == Dispatcher"));
        assert_eq!(c, role("userRole == Dispatcher"));
        assert!(c.evaluate_for_role("Dispatcher"));
    }

    #[test]
    fn later_values_in_one_part_still_match() {
        let c = Condition::parse(Some(r#"userRole == "Captain" || userRole == "Pilot""#));
        assert!(c.evaluate_for_role("Captain"));
        assert!(c.evaluate_for_role("Pilot"));
        assert!(!c.evaluate_for_role("Dispatcher"));

        let c = Condition::parse(Some("userRole in ['Captain', 'Pilot']"));
        assert!(c.evaluate_for_role("Pilot"));
        assert!(!c.evaluate_for_role("First Officer"));
    }

    #[test]
    fn role_check_sees_the_whole_mixed_part() {
        let c = Condition::parse(Some(r#"position == "Manager" and userRole == "Dispatcher""#));
        assert!(matches!(c, Condition::Role(_)));
        assert!(c.evaluate_for_role("Dispatcher"));
        assert!(!c.evaluate_for_role("Pilot"));
    }

    #[test]
    fn first_quoted_value_is_kept_for_exact_match() {
        let m = Mention::new("userRole == 'Flight Attendant'");
        assert_eq!(m.quoted.as_deref(), Some("Flight Attendant"));
        assert!(m.matches("Flight Attendant"));
        assert!(!m.matches("Pilot"));
    }

    #[test]
    fn unknown_role_holds_its_own_position() {
        assert_eq!(position_for_role("Ground Crew"), "Ground Crew");
        let c = Condition::parse(Some("position == 'Ground Crew'"));
        assert!(c.evaluate_for_role("Ground Crew"));
    }
}

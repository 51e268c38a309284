use crate::ast::ReferenceSpec;

/// `REFERENCES table(cols) [MATCH ..] [ON DELETE ..] [ON UPDATE ..]` as
/// ordered segments, shared by column and table foreign keys.
pub fn reference_clause(reference: &ReferenceSpec) -> Vec<String> {
    let mut segments = vec![format!(
        "REFERENCES {}({})",
        reference.table,
        reference.columns.join(", ")
    )];

    if let Some(mode) = &reference.match_mode {
        segments.push(format!("MATCH {}", mode.as_str()));
    }
    if let Some(action) = &reference.on_delete {
        segments.push(format!("ON DELETE {}", action));
    }
    if let Some(action) = &reference.on_update {
        segments.push(format!("ON UPDATE {}", action));
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::MatchMode;

    fn reference(table: &str, columns: &[&str]) -> ReferenceSpec {
        ReferenceSpec {
            table: table.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            match_mode: None,
            on_delete: None,
            on_update: None,
        }
    }

    #[test]
    fn test_bare_reference() {
        let r = reference("users", &["id"]);
        assert_eq!(reference_clause(&r), vec!["REFERENCES users(id)"]);
    }

    #[test]
    fn test_composite_target() {
        let r = reference("t", &["a", "b"]);
        assert_eq!(reference_clause(&r).join(" "), "REFERENCES t(a, b)");
    }

    #[test]
    fn test_delete_before_update() {
        let mut r = reference("t", &["c"]);
        r.on_update = Some("y".into());
        r.on_delete = Some("x".into());
        assert_eq!(
            reference_clause(&r).join(" "),
            "REFERENCES t(c) ON DELETE x ON UPDATE y"
        );
    }

    #[test]
    fn test_match_before_actions() {
        let mut r = reference("t", &["c"]);
        r.match_mode = Some(MatchMode::Simple);
        r.on_delete = Some("SET NULL".into());
        assert_eq!(
            reference_clause(&r).join(" "),
            "REFERENCES t(c) MATCH SIMPLE ON DELETE SET NULL"
        );

        r.match_mode = Some(MatchMode::parse("FULL"));
        assert_eq!(reference_clause(&r)[1], "MATCH FULL");

        r.match_mode = Some(MatchMode::parse("anything"));
        assert_eq!(reference_clause(&r)[1], "MATCH anything");
    }
}
